//! PostgreSQL-backed `ApplicationRepository` implementation using Diesel ORM.
//!
//! Every search filter and the lecturer scope run in SQL. The final ordering
//! reuses [`ApplicationSort::compare`] on the filtered rows so case folding
//! matches the in-memory store rather than the database collation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{
    ApplicationDetails, ApplicationId, ApplicationSearch, ApplicationStatus, CandidateApplication,
    LecturerComment, Ranking, UserId,
};

use super::diesel_error_mapping::{DbFailure, map_db_failure};
use super::models::{ApplicationRow, CandidateSummaryRow, CourseSummaryRow, ranking_to_db};
use super::pool::DbPool;
use super::schema::{candidate_applications, courses, lecturer_courses, users};

map_db_failure!(ApplicationRepositoryError);

const SESSION_CONSTRAINT: &str = "candidate_applications_unique_session";
const RANKING_CONSTRAINT: &str = "candidate_applications_unique_ranking";
const RANKED_WHEN_ACCEPTED: &str = "candidate_applications_ranked_when_accepted";

type DetailsRow = (ApplicationRow, CandidateSummaryRow, CourseSummaryRow);

/// Diesel-backed implementation of the `ApplicationRepository` port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn corrupt(message: String) -> ApplicationRepositoryError {
    ApplicationRepositoryError::query(message)
}

fn to_application(row: ApplicationRow) -> Result<CandidateApplication, ApplicationRepositoryError> {
    CandidateApplication::try_from(row).map_err(corrupt)
}

fn to_details(
    (application, candidate, course): DetailsRow,
) -> Result<ApplicationDetails, ApplicationRepositoryError> {
    Ok(ApplicationDetails {
        application: to_application(application)?,
        candidate: candidate.try_into().map_err(corrupt)?,
        course: course.try_into().map_err(corrupt)?,
    })
}

/// `ILIKE` pattern matching `needle` anywhere, with wildcards taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

macro_rules! details_query {
    () => {
        candidate_applications::table
            .inner_join(users::table)
            .inner_join(courses::table)
            .select((
                ApplicationRow::as_select(),
                CandidateSummaryRow::as_select(),
                CourseSummaryRow::as_select(),
            ))
            .into_boxed()
    };
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(
        &self,
        application: &CandidateApplication,
    ) -> Result<(), ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        diesel::insert_into(candidate_applications::table)
            .values(&ApplicationRow::from(application))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                let failure = DbFailure::from(err);
                if failure.violates(SESSION_CONSTRAINT) {
                    ApplicationRepositoryError::duplicate()
                } else {
                    failure.into()
                }
            })
    }

    async fn find_details(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<ApplicationDetails>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<DetailsRow> = details_query!()
            .filter(candidate_applications::id.eq(*id.as_uuid()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(DbFailure::from)?;
        row.map(to_details).transpose()
    }

    async fn list_for_candidate(
        &self,
        candidate_id: &UserId,
    ) -> Result<Vec<ApplicationDetails>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let rows: Vec<DetailsRow> = details_query!()
            .filter(candidate_applications::candidate_id.eq(*candidate_id.as_uuid()))
            .order((
                candidate_applications::created_at.desc(),
                candidate_applications::id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(DbFailure::from)?;
        rows.into_iter().map(to_details).collect()
    }

    async fn search(
        &self,
        search: &ApplicationSearch,
    ) -> Result<Vec<ApplicationDetails>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let mut query = details_query!();
        if let Some(course_id) = search.course_id {
            query = query.filter(candidate_applications::course_id.eq(*course_id.as_uuid()));
        }
        if let Some(session_type) = search.session_type {
            query = query.filter(candidate_applications::session_type.eq(session_type.as_str()));
        }
        if let Some(status) = search.status {
            query = query.filter(candidate_applications::status.eq(status.as_str()));
        }
        if let Some(availability) = search.availability {
            query = query.filter(candidate_applications::availability.eq(availability.as_str()));
        }
        if let Some(lecturer_id) = search.restrict_to_lecturer {
            query = query.filter(
                candidate_applications::course_id.eq_any(
                    lecturer_courses::table
                        .filter(lecturer_courses::lecturer_id.eq(*lecturer_id.as_uuid()))
                        .select(lecturer_courses::course_id),
                ),
            );
        }
        if let Some(skill) = search.skill.as_deref() {
            query = query.filter(
                sql::<Bool>(
                    "EXISTS (SELECT 1 FROM unnest(candidate_applications.skills) AS skill \
                     WHERE lower(skill) = lower(",
                )
                .bind::<Text, _>(skill.to_owned())
                .sql("))"),
            );
        }
        if let Some(name) = search.candidate_name.as_deref() {
            query = query.filter(
                users::first_name
                    .concat(" ")
                    .concat(users::last_name)
                    .ilike(contains_pattern(name)),
            );
        }
        let rows: Vec<DetailsRow> = query.load(&mut conn).await.map_err(DbFailure::from)?;

        let mut results = rows
            .into_iter()
            .map(to_details)
            .collect::<Result<Vec<_>, _>>()?;
        results.sort_by(|left, right| search.sort.compare(left, right));
        Ok(results)
    }

    async fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let target = candidate_applications::table.find(*id.as_uuid());
        let result: QueryResult<ApplicationRow> = if status == ApplicationStatus::Accepted {
            diesel::update(target)
                .set((
                    candidate_applications::status.eq(status.as_str()),
                    candidate_applications::updated_at.eq(updated_at),
                ))
                .returning(ApplicationRow::as_returning())
                .get_result(&mut conn)
                .await
        } else {
            diesel::update(target)
                .set((
                    candidate_applications::status.eq(status.as_str()),
                    candidate_applications::ranking.eq(None::<i32>),
                    candidate_applications::updated_at.eq(updated_at),
                ))
                .returning(ApplicationRow::as_returning())
                .get_result(&mut conn)
                .await
        };
        let row: Option<ApplicationRow> = result.optional().map_err(DbFailure::from)?;
        row.map(to_application).transpose()
    }

    async fn set_ranking(
        &self,
        id: &ApplicationId,
        ranking: Option<Ranking>,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<ApplicationRow> =
            diesel::update(candidate_applications::table.find(*id.as_uuid()))
                .set((
                    candidate_applications::ranking.eq(ranking.map(ranking_to_db)),
                    candidate_applications::updated_at.eq(updated_at),
                ))
                .returning(ApplicationRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|err| {
                    let failure = DbFailure::from(err);
                    match ranking {
                        Some(rank) if failure.violates(RANKING_CONSTRAINT) => {
                            ApplicationRepositoryError::ranking_taken(rank.get())
                        }
                        Some(_) if failure.violates(RANKED_WHEN_ACCEPTED) => {
                            ApplicationRepositoryError::not_accepted()
                        }
                        _ => failure.into(),
                    }
                })?;
        row.map(to_application).transpose()
    }

    async fn set_comment(
        &self,
        id: &ApplicationId,
        comment: &LecturerComment,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CandidateApplication>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(DbFailure::from)?;
        let row: Option<ApplicationRow> =
            diesel::update(candidate_applications::table.find(*id.as_uuid()))
                .set((
                    candidate_applications::comment.eq(Some(comment.as_str())),
                    candidate_applications::updated_at.eq(updated_at),
                ))
                .returning(ApplicationRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(DbFailure::from)?;
        row.map(to_application).transpose()
    }
}
