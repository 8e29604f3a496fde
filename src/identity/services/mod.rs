//! Application services for account management.

mod accounts;

pub use accounts::{
    AccountService, AccountServiceError, AccountServiceResult, RegisterAccountRequest,
};
