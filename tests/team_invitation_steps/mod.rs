//! Step definitions for team invitation BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
