//! Actor resolution shared by the role services.
//!
//! Sessions carry only a user id, so every call re-reads the account. A block
//! placed after sign-in therefore takes effect on the next request.

use std::sync::Arc;

use super::ports::{
    ApplicationRepository, CandidateProfileRepository, CourseRepository, UserRepository,
};
use super::{Error, Role, User, UserId};

/// Repository handles shared by the domain services.
#[derive(Clone)]
pub struct RepositorySet {
    pub users: Arc<dyn UserRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub profiles: Arc<dyn CandidateProfileRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
}

/// Load an unblocked user, refusing unknown ids with `unauthorized`.
pub(crate) async fn require_user(users: &dyn UserRepository, id: &UserId) -> Result<User, Error> {
    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    if user.is_blocked {
        return Err(Error::forbidden("account is blocked"));
    }
    Ok(user)
}

/// Load an unblocked user holding `role`.
pub(crate) async fn require_actor(
    users: &dyn UserRepository,
    id: &UserId,
    role: Role,
) -> Result<User, Error> {
    let user = require_user(users, id).await?;
    if user.role != role {
        return Err(Error::forbidden(format!("{role} role required")));
    }
    Ok(user)
}
