//! Selection tallies for lecturer statistics and admin reports.
//!
//! All functions are pure: callers fetch applications first and pass them in.
//! Results are sorted by candidate name (then id) so output is deterministic.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;
use utoipa::ToSchema;

use super::{
    ApplicationDetails, ApplicationStatus, CandidateSummary, Course, CourseSummary, User, UserId,
};

/// Default threshold for [`candidates_chosen_for_more_than`].
pub const DEFAULT_SELECTION_THRESHOLD: u32 = 3;

/// A candidate and how many of their applications were accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateTally {
    pub candidate: CandidateSummary,
    pub accepted_count: u32,
}

/// Lecturer-facing selection statistics.
///
/// ## Invariants
/// - `most_chosen` holds every candidate sharing the highest non-zero count.
/// - `least_chosen` holds every candidate sharing the lowest non-zero count;
///   it equals `most_chosen` when all chosen candidates tie.
/// - `not_chosen` holds applicants with no accepted application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStatistics {
    pub most_chosen: Vec<CandidateTally>,
    pub least_chosen: Vec<CandidateTally>,
    pub not_chosen: Vec<CandidateSummary>,
}

/// Accepted candidates for one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSelection {
    pub course: CourseSummary,
    pub candidates: Vec<CandidateSummary>,
}

fn name_key(candidate: &CandidateSummary) -> (String, UserId) {
    (candidate.full_name().to_lowercase(), candidate.id)
}

fn tally(applications: &[ApplicationDetails]) -> Vec<CandidateTally> {
    let mut counts: HashMap<UserId, CandidateTally> = HashMap::new();
    for details in applications {
        let entry = counts
            .entry(details.candidate.id)
            .or_insert_with(|| CandidateTally {
                candidate: details.candidate.clone(),
                accepted_count: 0,
            });
        if details.application.status == ApplicationStatus::Accepted {
            entry.accepted_count = entry.accepted_count.saturating_add(1);
        }
    }
    let mut tallies: Vec<_> = counts.into_values().collect();
    tallies.sort_by_key(|t| name_key(&t.candidate));
    tallies
}

/// Compute most, least, and not chosen applicants across `applications`.
///
/// # Examples
/// ```
/// use teachteam::domain::selection_statistics;
///
/// let stats = selection_statistics(&[]);
/// assert!(stats.most_chosen.is_empty());
/// ```
pub fn selection_statistics(applications: &[ApplicationDetails]) -> SelectionStatistics {
    let tallies = tally(applications);
    let chosen = tallies.iter().filter(|t| t.accepted_count > 0);
    let max = chosen.clone().map(|t| t.accepted_count).max();
    let min = chosen.map(|t| t.accepted_count).min();

    let pick = |target: Option<u32>| -> Vec<CandidateTally> {
        target.map_or_else(Vec::new, |count| {
            tallies
                .iter()
                .filter(|t| t.accepted_count == count)
                .cloned()
                .collect()
        })
    };

    SelectionStatistics {
        most_chosen: pick(max),
        least_chosen: pick(min),
        not_chosen: tallies
            .iter()
            .filter(|t| t.accepted_count == 0)
            .map(|t| t.candidate.clone())
            .collect(),
    }
}

/// Every course with the candidates accepted for it. Courses without
/// selections are listed with an empty candidate list.
pub fn chosen_candidates_by_course(
    courses: &[Course],
    applications: &[ApplicationDetails],
) -> Vec<CourseSelection> {
    let mut accepted: HashMap<_, BTreeMap<(String, UserId), CandidateSummary>> = HashMap::new();
    for details in applications
        .iter()
        .filter(|d| d.application.status == ApplicationStatus::Accepted)
    {
        accepted
            .entry(details.application.course_id)
            .or_default()
            .insert(name_key(&details.candidate), details.candidate.clone());
    }

    let mut selections: Vec<_> = courses
        .iter()
        .map(|course| CourseSelection {
            course: CourseSummary {
                id: course.id,
                code: course.code.clone(),
                name: course.name.clone(),
            },
            candidates: accepted
                .remove(&course.id)
                .map(|by_name| by_name.into_values().collect())
                .unwrap_or_default(),
        })
        .collect();
    selections.sort_by(|l, r| l.course.code.cmp(&r.course.code));
    selections
}

/// Candidates accepted for more than `threshold` distinct courses.
pub fn candidates_chosen_for_more_than(
    applications: &[ApplicationDetails],
    threshold: u32,
) -> Vec<CandidateTally> {
    let mut courses: HashMap<UserId, (CandidateSummary, BTreeSet<_>)> = HashMap::new();
    for details in applications
        .iter()
        .filter(|d| d.application.status == ApplicationStatus::Accepted)
    {
        courses
            .entry(details.candidate.id)
            .or_insert_with(|| (details.candidate.clone(), BTreeSet::new()))
            .1
            .insert(details.application.course_id);
    }

    let mut tallies: Vec<_> = courses
        .into_values()
        .map(|(candidate, distinct)| CandidateTally {
            candidate,
            accepted_count: u32::try_from(distinct.len()).unwrap_or(u32::MAX),
        })
        .filter(|t| t.accepted_count > threshold)
        .collect();
    tallies.sort_by_key(|t| name_key(&t.candidate));
    tallies
}

/// Candidate accounts with no accepted application, including candidates
/// who never applied.
pub fn unchosen_candidates(
    candidates: &[User],
    applications: &[ApplicationDetails],
) -> Vec<CandidateSummary> {
    let chosen: BTreeSet<UserId> = applications
        .iter()
        .filter(|d| d.application.status == ApplicationStatus::Accepted)
        .map(|d| d.candidate.id)
        .collect();
    let mut unchosen: Vec<_> = candidates
        .iter()
        .filter(|user| !chosen.contains(&user.id))
        .map(|user| CandidateSummary {
            id: user.id,
            first_name: user.first_name.to_string(),
            last_name: user.last_name.to_string(),
            email: user.email.clone(),
        })
        .collect();
    unchosen.sort_by_key(name_key);
    unchosen
}
