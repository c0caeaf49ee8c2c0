//! Driving port for registration and authentication use-cases.
//!
//! Inbound adapters call this port to register, sign in, and resolve the
//! session user without importing persistence or hashing infrastructure.

use async_trait::async_trait;

use crate::domain::{Error, Registration, SignInCredentials, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a candidate or lecturer.
    async fn sign_up(&self, registration: Registration) -> Result<User, Error>;

    /// Verify credentials. Blocked accounts are refused with `forbidden`.
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<User, Error>;

    /// Resolve the session user, refusing unknown or blocked accounts.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
