//! Registration, sign-in, and session user resolution.
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::access::require_user;
use crate::domain::ports::{AccountCommand, PasswordHasher, UserRepository};
use crate::domain::{
    EmailAddress, Error, NewUserAccount, Password, PersonName, Registration, Role,
    SignInCredentials, User, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Administrator account created at startup when configured.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub email: EmailAddress,
    pub password: Password,
}

/// Account service implementing [`AccountCommand`].
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create a service over the user store and password hasher.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Create the configured administrator unless the email is already
    /// registered. An existing non-admin account with that email is an error.
    pub async fn ensure_admin(&self, bootstrap: AdminBootstrap) -> Result<User, Error> {
        if let Some(existing) = self.users.find_account_by_email(&bootstrap.email).await? {
            if existing.user.role != Role::Admin {
                return Err(Error::conflict(format!(
                    "{} is registered as a {}, not an admin",
                    bootstrap.email, existing.user.role
                )));
            }
            return Ok(existing.user);
        }

        let account = NewUserAccount {
            id: UserId::random(),
            first_name: bootstrap.first_name,
            last_name: bootstrap.last_name,
            email: bootstrap.email,
            role: Role::Admin,
            password_hash: self.hasher.hash(bootstrap.password.expose())?,
            created_at: self.clock.utc(),
        };
        self.users.insert(&account).await?;
        info!(user_id = %account.id, "bootstrapped admin account");
        Ok(account.into_account().user)
    }
}

#[async_trait]
impl AccountCommand for AccountService {
    async fn sign_up(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            first_name,
            last_name,
            email,
            password,
            role,
        } = registration;
        if role == Role::Admin {
            return Err(Error::forbidden("admin accounts cannot self-register"));
        }

        let account = NewUserAccount {
            id: UserId::random(),
            first_name,
            last_name,
            email,
            role,
            password_hash: self.hasher.hash(password.expose())?,
            created_at: self.clock.utc(),
        };
        self.users.insert(&account).await?;
        info!(user_id = %account.id, role = %account.role, "registered account");
        Ok(account.into_account().user)
    }

    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<User, Error> {
        let Some(account) = self.users.find_account_by_email(credentials.email()).await? else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !self
            .hasher
            .verify(credentials.password(), &account.password_hash)?
        {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        if account.user.is_blocked {
            warn!(user_id = %account.user.id, "blocked account attempted sign-in");
            return Err(Error::forbidden("account is blocked"));
        }
        Ok(account.user)
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        require_user(self.users.as_ref(), user_id).await
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
