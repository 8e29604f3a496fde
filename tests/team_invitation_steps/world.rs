//! Shared world state for team invitation BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use aalto::identity::{
    adapters::{Pbkdf2PasswordHasher, memory::InMemoryUserRepository},
    domain::UserId,
    services::AccountService,
};
use aalto::notification::adapters::memory::InMemoryNotificationStore;
use aalto::team::{
    adapters::memory::{InMemoryMembershipRepository, InMemoryTeamRepository},
    domain::{TeamId, TeamMembership},
    services::{TeamService, TeamServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Account service type used by the BDD world.
pub type TestAccountService =
    AccountService<InMemoryUserRepository, Pbkdf2PasswordHasher, DefaultClock>;

/// Team service type used by the BDD world.
pub type TestTeamService = TeamService<
    InMemoryTeamRepository,
    InMemoryMembershipRepository,
    InMemoryUserRepository,
    InMemoryNotificationStore<DefaultClock>,
    DefaultClock,
>;

/// Scenario world for team invitation behaviour tests.
pub struct InvitationWorld {
    /// Account registration service.
    pub accounts: TestAccountService,
    /// Team and membership service under test.
    pub teams: TestTeamService,
    /// Registered users by scenario name.
    pub users: HashMap<String, UserId>,
    /// Created teams by scenario name.
    pub team_ids: HashMap<String, TeamId>,
    /// Outcome of the most recent explicit invitation attempt.
    pub last_invite: Option<Result<TeamMembership, TeamServiceError>>,
    /// Outcome of the most recent removal attempt.
    pub last_removal: Option<Result<(), TeamServiceError>>,
}

impl InvitationWorld {
    /// Creates a world with a freshly assembled in-memory service graph.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let users = Arc::new(InMemoryUserRepository::new());
        let notifications = Arc::new(InMemoryNotificationStore::new(Arc::clone(&clock)));

        let accounts = AccountService::new(
            Arc::clone(&users),
            Arc::new(Pbkdf2PasswordHasher::new()),
            Arc::clone(&clock),
        );
        let teams = TeamService::new(
            Arc::new(InMemoryTeamRepository::new()),
            Arc::new(InMemoryMembershipRepository::new()),
            users,
            notifications,
            clock,
        );

        Self {
            accounts,
            teams,
            users: HashMap::new(),
            team_ids: HashMap::new(),
            last_invite: None,
            last_removal: None,
        }
    }

    /// Resolves a scenario user name to its registered identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the name was never registered in this
    /// scenario.
    pub fn user_id(&self, name: &str) -> Result<UserId, eyre::Report> {
        self.users
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario user: {name}"))
    }

    /// Resolves a scenario team name to its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the team was never created in this scenario.
    pub fn team_id(&self, name: &str) -> Result<TeamId, eyre::Report> {
        self.team_ids
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("unknown scenario team: {name}"))
    }
}

impl Default for InvitationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> InvitationWorld {
    InvitationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
