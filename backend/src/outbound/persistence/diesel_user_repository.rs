//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUserAccount, Role, User, UserAccount, UserId};

use super::diesel_error_mapping::{DbFailure, map_db_failure};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

map_db_failure!(UserPersistenceError);

const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_user().map_err(UserPersistenceError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &NewUserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row = NewUserRow {
            id: *account.id.as_uuid(),
            first_name: account.first_name.as_ref(),
            last_name: account.last_name.as_ref(),
            email: account.email.as_ref(),
            password_hash: &account.password_hash,
            role: account.role.as_str(),
            created_at: account.created_at,
            updated_at: account.created_at,
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                let failure = DbFailure::from(err);
                if failure.violates(EMAIL_CONSTRAINT) {
                    UserPersistenceError::duplicate_email(account.email.to_string())
                } else {
                    failure.into()
                }
            })
    }

    async fn find_account_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;

        row.map(|row| row.into_account().map_err(UserPersistenceError::query))
            .transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;

        row.map(to_user).transpose()
    }

    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let mut query = users::table
            .select(UserRow::as_select())
            .order((users::last_name.asc(), users::first_name.asc(), users::id.asc()))
            .into_boxed();
        if let Some(role) = role {
            query = query.filter(users::role.eq(role.as_str()));
        }
        let rows: Vec<UserRow> = query.load(&mut conn).await.map_err(DbFailure::from)?;

        rows.into_iter().map(to_user).collect()
    }

    async fn set_blocked(
        &self,
        id: &UserId,
        blocked: bool,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<UserRow> = diesel::update(users::table.find(id.as_uuid()))
            .set((
                users::is_blocked.eq(blocked),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;

        row.map(to_user).transpose()
    }
}
