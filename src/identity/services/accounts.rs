//! Service layer for account registration, authentication, and profile
//! maintenance.

use crate::identity::{
    domain::{EmailAddress, IdentityDomainError, User, UserId, Username},
    ports::{PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterAccountRequest {
    username: String,
    email: String,
    password: String,
}

impl RegisterAccountRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),

    /// The username is already registered to another account.
    #[error("username '{0}' is already taken")]
    UsernameTaken(Username),

    /// The email address is already registered to another account.
    #[error("email address '{0}' is already taken")]
    EmailTaken(EmailAddress),

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The username/password pair did not authenticate.
    ///
    /// Deliberately does not reveal whether the account exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Credential hashing or verification failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for account service operations.
pub type AccountServiceResult<T> = Result<T, AccountServiceError>;

/// Account registration and authentication orchestration service.
#[derive(Clone)]
pub struct AccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> AccountService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(users: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Registers a new account.
    ///
    /// The plain password is hashed before anything is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Domain`] when a field fails
    /// validation, [`AccountServiceError::UsernameTaken`] or
    /// [`AccountServiceError::EmailTaken`] when a unique attribute is
    /// already registered, or a hashing/repository error.
    pub async fn register(&self, request: RegisterAccountRequest) -> AccountServiceResult<User> {
        let username = Username::new(request.username)?;
        let email = EmailAddress::new(request.email)?;
        let password = validated_password(&request.password)?;

        if self.users.find_by_username(&username).await?.is_some() {
            return Err(AccountServiceError::UsernameTaken(username));
        }
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountServiceError::EmailTaken(email));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(username, email, password_hash, &*self.clock);
        self.users.create(&user).await?;
        Ok(user)
    }

    /// Authenticates a username/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::InvalidCredentials`] when the account
    /// is unknown or the password does not verify; the two cases are not
    /// distinguishable by the caller. Returns
    /// [`AccountServiceError::Domain`] when either input is empty.
    pub async fn authenticate(&self, username: &str, password: &str) -> AccountServiceResult<User> {
        let username = Username::new(username)?;
        let password = validated_password(password)?;

        let Some(user) = self.users.find_by_username(&username).await? else {
            return Err(AccountServiceError::InvalidCredentials);
        };

        if self.hasher.verify(password, user.password_hash())? {
            Ok(user)
        } else {
            Err(AccountServiceError::InvalidCredentials)
        }
    }

    /// Updates an account's username and email address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::UserNotFound`] when the id does not
    /// resolve, or a conflict variant when the new username/email belongs
    /// to another account.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        new_username: impl Into<String>,
        new_email: impl Into<String>,
    ) -> AccountServiceResult<User> {
        let username = Username::new(new_username)?;
        let email = EmailAddress::new(new_email)?;

        let mut user = self.find_by_id_or_error(user_id).await?;

        if let Some(existing) = self.users.find_by_username(&username).await? {
            if existing.id() != user_id {
                return Err(AccountServiceError::UsernameTaken(username));
            }
        }
        if let Some(existing) = self.users.find_by_email(&email).await? {
            if existing.id() != user_id {
                return Err(AccountServiceError::EmailTaken(email));
            }
        }

        user.update_profile(username, email);
        self.users.update(&user).await?;
        Ok(user)
    }

    /// Deletes an account.
    ///
    /// Cascading cleanup of owned tasks and memberships is the storage
    /// layer's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::UserNotFound`] when the id does not
    /// resolve.
    pub async fn delete_account(&self, user_id: UserId) -> AccountServiceResult<()> {
        match self.users.delete(user_id).await {
            Ok(()) => Ok(()),
            Err(UserRepositoryError::NotFound(id)) => Err(AccountServiceError::UserNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Finds a user by identifier.
    ///
    /// Returns `Ok(None)` when no account has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn find_by_id(&self, user_id: UserId) -> AccountServiceResult<Option<User>> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// Returns all registered users.
    ///
    /// # Errors
    ///
    /// Returns [`AccountServiceError::Repository`] when persistence lookup
    /// fails.
    pub async fn list_all(&self) -> AccountServiceResult<Vec<User>> {
        Ok(self.users.list_all().await?)
    }

    async fn find_by_id_or_error(&self, user_id: UserId) -> AccountServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(AccountServiceError::UserNotFound(user_id))
    }
}

/// Rejects empty passwords before they reach the hasher.
fn validated_password(plain: &str) -> Result<&str, IdentityDomainError> {
    if plain.trim().is_empty() {
        return Err(IdentityDomainError::EmptyPassword);
    }
    Ok(plain)
}
