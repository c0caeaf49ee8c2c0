//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUserAccount, Role, User, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` on a clash.
    async fn insert(&self, account: &NewUserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account together with its password hash.
    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// List users ordered by last then first name, optionally by role.
    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserPersistenceError>;

    /// Set the blocked flag, returning the updated user if it exists.
    async fn set_blocked(
        &self,
        id: &UserId,
        blocked: bool,
    ) -> Result<Option<User>, UserPersistenceError>;
}
