//! Unit tests for the team context.

mod domain_tests;
