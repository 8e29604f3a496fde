//! Application services for team and membership management.

mod membership;

pub use membership::{TeamService, TeamServiceError, TeamServiceResult};
