//! `UserRepository` over the in-memory tables.

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUserAccount, Role, User, UserAccount, UserId};

use super::InMemoryStore;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, account: &NewUserAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        if state
            .users
            .values()
            .any(|existing| existing.user.email == account.email)
        {
            return Err(UserPersistenceError::duplicate_email(account.email.to_string()));
        }
        state
            .users
            .insert(account.id, account.clone().into_account());
        Ok(())
    }

    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|account| account.user.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.get(id).map(|account| account.user.clone()))
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock(UserPersistenceError::query)?;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|account| role.is_none_or(|role| account.user.role == role))
            .map(|account| account.user.clone())
            .collect();
        users.sort_by(|left, right| {
            (left.last_name.as_ref(), left.first_name.as_ref(), left.id).cmp(&(
                right.last_name.as_ref(),
                right.first_name.as_ref(),
                right.id,
            ))
        });
        Ok(users)
    }

    async fn set_blocked(
        &self,
        id: &UserId,
        blocked: bool,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.lock(UserPersistenceError::query)?;
        Ok(state.users.get_mut(id).map(|account| {
            account.user.is_blocked = blocked;
            account.user.clone()
        }))
    }
}
