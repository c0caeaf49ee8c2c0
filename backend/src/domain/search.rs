//! Filter and sort criteria for browsing applications.
//!
//! Every populated filter narrows the result set; unset filters are ignored.
//! The SQL adapter translates the filters into predicates and the in-memory
//! store applies [`ApplicationSearch::matches`]; both order with
//! [`ApplicationSort::compare`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApplicationDetails, ApplicationStatus, Availability, CourseId, SessionType, UserId};

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationSort {
    /// Newest first.
    #[default]
    CreatedAt,
    /// Course name, then candidate name.
    CourseName,
    /// Full-time before part-time, then candidate name.
    Availability,
    /// Rank 1 first, unranked last.
    Ranking,
    /// Candidate "first last", case-insensitive.
    CandidateName,
}

/// Raised for an unrecognised sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("sortBy must be one of created_at, course_name, availability, ranking, candidate_name")]
pub struct UnknownSortError;

impl FromStr for ApplicationSort {
    type Err = UnknownSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "created_at" | "createdat" | "newest" => Ok(Self::CreatedAt),
            "course_name" | "coursename" | "course" => Ok(Self::CourseName),
            "availability" => Ok(Self::Availability),
            "ranking" | "rank" => Ok(Self::Ranking),
            "candidate_name" | "candidatename" | "name" => Ok(Self::CandidateName),
            _ => Err(UnknownSortError),
        }
    }
}

impl fmt::Display for ApplicationSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CreatedAt => "created_at",
            Self::CourseName => "course_name",
            Self::Availability => "availability",
            Self::Ranking => "ranking",
            Self::CandidateName => "candidate_name",
        };
        f.write_str(label)
    }
}

impl ApplicationSort {
    /// Total order applied to results by every adapter.
    pub fn compare(self, left: &ApplicationDetails, right: &ApplicationDetails) -> Ordering {
        let by_name = || {
            left.candidate
                .full_name()
                .to_lowercase()
                .cmp(&right.candidate.full_name().to_lowercase())
        };
        let primary = match self {
            Self::CreatedAt => right
                .application
                .created_at
                .cmp(&left.application.created_at),
            Self::CourseName => left
                .course
                .name
                .to_lowercase()
                .cmp(&right.course.name.to_lowercase())
                .then_with(by_name),
            Self::Availability => left
                .application
                .availability
                .cmp(&right.application.availability)
                .then_with(by_name),
            Self::Ranking => match (left.application.ranking, right.application.ranking) {
                (Some(l), Some(r)) => l.cmp(&r),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(by_name),
            Self::CandidateName => by_name(),
        };
        primary.then_with(|| left.application.id.cmp(&right.application.id))
    }
}

/// Search criteria for applications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationSearch {
    pub course_id: Option<CourseId>,
    pub session_type: Option<SessionType>,
    pub status: Option<ApplicationStatus>,
    pub availability: Option<Availability>,
    /// Case-insensitive exact match against any listed skill.
    pub skill: Option<String>,
    /// Case-insensitive substring of "first last".
    pub candidate_name: Option<String>,
    /// Only courses assigned to this lecturer.
    pub restrict_to_lecturer: Option<UserId>,
    pub sort: ApplicationSort,
}

impl ApplicationSearch {
    /// Drop blank text filters so `?skill=` behaves like an absent filter.
    #[must_use]
    pub fn normalised(mut self) -> Self {
        self.skill = trimmed_non_empty(self.skill);
        self.candidate_name = trimmed_non_empty(self.candidate_name);
        self
    }

    /// Whether `details` satisfies every filter except the lecturer scope,
    /// which needs assignment data the details do not carry.
    pub fn matches(&self, details: &ApplicationDetails) -> bool {
        let application = &details.application;
        self.course_id.is_none_or(|id| application.course_id == id)
            && self
                .session_type
                .is_none_or(|kind| application.session_type == kind)
            && self.status.is_none_or(|status| application.status == status)
            && self
                .availability
                .is_none_or(|availability| application.availability == availability)
            && self
                .skill
                .as_deref()
                .is_none_or(|skill| application.skills.contains_ignore_case(skill))
            && self.candidate_name.as_deref().is_none_or(|needle| {
                details
                    .candidate
                    .full_name()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
            })
    }
}

fn trimmed_non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
