//! Shared assembly helpers for in-memory integration tests.
//!
//! Builds the whole service graph once per test, the way an embedding
//! application would: every service shares the same repository instances.

use std::sync::Arc;

use aalto::identity::{
    adapters::{Pbkdf2PasswordHasher, memory::InMemoryUserRepository},
    domain::User,
    services::{AccountService, RegisterAccountRequest},
};
use aalto::notification::{
    adapters::memory::InMemoryNotificationStore, services::InboxService,
};
use aalto::project::{adapters::memory::InMemoryProjectRepository, services::ProjectService};
use aalto::task::{
    adapters::{MembershipAffiliation, memory::InMemoryTaskRepository},
    services::TaskService,
};
use aalto::team::{
    adapters::memory::{InMemoryMembershipRepository, InMemoryTeamRepository},
    services::TeamService,
};
use mockable::DefaultClock;

/// Account service type used by the integration harness.
pub type TestAccountService =
    AccountService<InMemoryUserRepository, Pbkdf2PasswordHasher, DefaultClock>;

/// Team service type used by the integration harness.
pub type TestTeamService = TeamService<
    InMemoryTeamRepository,
    InMemoryMembershipRepository,
    InMemoryUserRepository,
    InMemoryNotificationStore<DefaultClock>,
    DefaultClock,
>;

/// Project service type used by the integration harness.
pub type TestProjectService =
    ProjectService<InMemoryProjectRepository, InMemoryTeamRepository, DefaultClock>;

/// Task service type used by the integration harness.
pub type TestTaskService = TaskService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryProjectRepository,
    MembershipAffiliation<InMemoryMembershipRepository>,
    InMemoryNotificationStore<DefaultClock>,
    DefaultClock,
>;

/// Inbox service type used by the integration harness.
pub type TestInboxService = InboxService<InMemoryNotificationStore<DefaultClock>>;

/// Fully assembled in-memory application.
pub struct App {
    /// Account registration and authentication.
    pub accounts: TestAccountService,
    /// Team and membership management.
    pub teams: TestTeamService,
    /// Project catalogue.
    pub projects: TestProjectService,
    /// Task lifecycle and visibility.
    pub tasks: TestTaskService,
    /// Notification inbox.
    pub inbox: TestInboxService,
}

/// Assembles the service graph over shared in-memory repositories.
#[must_use]
pub fn app() -> App {
    let clock = Arc::new(DefaultClock);
    let users = Arc::new(InMemoryUserRepository::new());
    let teams = Arc::new(InMemoryTeamRepository::new());
    let memberships = Arc::new(InMemoryMembershipRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let notifications = Arc::new(InMemoryNotificationStore::new(Arc::clone(&clock)));

    App {
        accounts: AccountService::new(
            Arc::clone(&users),
            Arc::new(Pbkdf2PasswordHasher::new()),
            Arc::clone(&clock),
        ),
        teams: TeamService::new(
            Arc::clone(&teams),
            Arc::clone(&memberships),
            Arc::clone(&users),
            Arc::clone(&notifications),
            Arc::clone(&clock),
        ),
        projects: ProjectService::new(
            Arc::clone(&projects),
            Arc::clone(&teams),
            Arc::clone(&clock),
        ),
        tasks: TaskService::new(
            Arc::clone(&tasks),
            Arc::clone(&users),
            Arc::clone(&projects),
            Arc::new(MembershipAffiliation::new(Arc::clone(&memberships))),
            Arc::clone(&notifications),
            Arc::clone(&clock),
        ),
        inbox: InboxService::new(Arc::clone(&notifications)),
    }
}

/// Registers a user with a derived email address and fixed password.
pub async fn register(app: &App, name: &str) -> User {
    app.accounts
        .register(RegisterAccountRequest::new(
            name,
            format!("{name}@example.com"),
            "correct horse battery staple",
        ))
        .await
        .expect("registration should succeed")
}
