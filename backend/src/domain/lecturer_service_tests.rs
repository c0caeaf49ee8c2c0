//! Tests for the lecturer service.

use rstest::rstest;

use super::*;
use crate::domain::ports::ApplicationRepositoryError;
use crate::domain::test_fixtures::{
    MockRepos, course_fixture, details_fixture, fixture_clock, user_fixture,
};
use crate::domain::{ErrorCode, User};

fn lecturer() -> User {
    user_fixture("Turing", Role::Lecturer)
}

fn service(repos: MockRepos) -> LecturerService {
    LecturerService::new(repos.into_set(), fixture_clock())
}

fn details_with_status(status: ApplicationStatus) -> ApplicationDetails {
    let mut details = details_fixture("Ada", "Lovelace", "Full Stack Development");
    details.application.status = status;
    details
}

fn expect_application(repos: &mut MockRepos, details: ApplicationDetails, assigned: bool) {
    repos
        .applications
        .expect_find_details()
        .return_once(move |_| Ok(Some(details)));
    repos
        .courses
        .expect_is_assigned()
        .return_once(move |_, _| Ok(assigned));
}

#[tokio::test]
async fn unassigned_course_is_forbidden() {
    let user = lecturer();
    let user_id = user.id;
    let details = details_with_status(ApplicationStatus::Pending);
    let application_id = details.application.id;
    let mut repos = MockRepos::with_users(vec![user]);
    expect_application(&mut repos, details, false);
    repos.applications.expect_update_status().never();

    let err = service(repos)
        .set_status(&user_id, &application_id, ApplicationStatus::Accepted)
        .await
        .expect_err("not assigned");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn assigned_lecturer_can_accept() {
    let user = lecturer();
    let user_id = user.id;
    let details = details_with_status(ApplicationStatus::Pending);
    let application_id = details.application.id;
    let mut accepted = details.application.clone();
    accepted.status = ApplicationStatus::Accepted;
    let mut repos = MockRepos::with_users(vec![user]);
    expect_application(&mut repos, details, true);
    repos
        .applications
        .expect_update_status()
        .withf(|_, status, _| *status == ApplicationStatus::Accepted)
        .return_once(move |_, _, _| Ok(Some(accepted)));

    let application = service(repos)
        .set_status(&user_id, &application_id, ApplicationStatus::Accepted)
        .await
        .expect("status updated");

    assert_eq!(application.status, ApplicationStatus::Accepted);
}

#[rstest]
#[case(ApplicationStatus::Pending)]
#[case(ApplicationStatus::Rejected)]
#[tokio::test]
async fn ranking_requires_acceptance(#[case] status: ApplicationStatus) {
    let user = lecturer();
    let user_id = user.id;
    let details = details_with_status(status);
    let application_id = details.application.id;
    let mut repos = MockRepos::with_users(vec![user]);
    expect_application(&mut repos, details, true);
    repos.applications.expect_set_ranking().never();

    let err = service(repos)
        .set_ranking(
            &user_id,
            &application_id,
            Some(Ranking::new(1).expect("rank")),
        )
        .await
        .expect_err("not accepted");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn taken_ranking_is_conflict() {
    let user = lecturer();
    let user_id = user.id;
    let details = details_with_status(ApplicationStatus::Accepted);
    let application_id = details.application.id;
    let mut repos = MockRepos::with_users(vec![user]);
    expect_application(&mut repos, details, true);
    repos
        .applications
        .expect_set_ranking()
        .return_once(|_, _, _| Err(ApplicationRepositoryError::ranking_taken(1_u32)));

    let err = service(repos)
        .set_ranking(
            &user_id,
            &application_id,
            Some(Ranking::new(1).expect("rank")),
        )
        .await
        .expect_err("rank held elsewhere");

    assert_eq!(err.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn search_is_scoped_to_the_lecturer() {
    let user = lecturer();
    let user_id = user.id;
    let mut repos = MockRepos::with_users(vec![user]);
    repos
        .applications
        .expect_search()
        .withf(move |search| {
            search.restrict_to_lecturer == Some(user_id) && search.skill.is_none()
        })
        .return_once(|_| Ok(Vec::new()));

    let results = service(repos)
        .search_applications(
            &user_id,
            ApplicationSearch {
                skill: Some("   ".to_owned()),
                ..ApplicationSearch::default()
            },
        )
        .await
        .expect("search runs");

    assert!(results.is_empty());
}

#[tokio::test]
async fn search_on_foreign_course_is_forbidden() {
    let user = lecturer();
    let user_id = user.id;
    let mut repos = MockRepos::with_users(vec![user]);
    repos
        .courses
        .expect_is_assigned()
        .return_once(|_, _| Ok(false));
    repos.applications.expect_search().never();

    let err = service(repos)
        .search_applications(
            &user_id,
            ApplicationSearch {
                course_id: Some(CourseId::random()),
                ..ApplicationSearch::default()
            },
        )
        .await
        .expect_err("foreign course");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn candidate_profile_requires_an_application_on_own_course() {
    let user = lecturer();
    let user_id = user.id;
    let own = course_fixture("COSC2758", "Full Stack Development");
    let details = details_fixture("Ada", "Lovelace", "Other Course");
    let candidate_id = details.candidate.id;
    let mut repos = MockRepos::with_users(vec![user]);
    repos
        .courses
        .expect_courses_for_lecturer()
        .return_once(move |_| Ok(vec![own]));
    repos
        .applications
        .expect_list_for_candidate()
        .return_once(move |_| Ok(vec![details]));
    repos.profiles.expect_load().never();

    let err = service(repos)
        .candidate_profile(&user_id, &candidate_id)
        .await
        .expect_err("candidate applied elsewhere");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn statistics_tally_accepted_applications() {
    let user = lecturer();
    let user_id = user.id;
    let mut chosen = details_with_status(ApplicationStatus::Accepted);
    chosen.candidate.first_name = "Chosen".to_owned();
    let mut ignored = details_fixture("Ignored", "Person", "Full Stack Development");
    ignored.application.status = ApplicationStatus::Rejected;
    let mut repos = MockRepos::with_users(vec![user]);
    repos
        .applications
        .expect_search()
        .return_once(move |_| Ok(vec![chosen, ignored]));

    let stats = service(repos)
        .statistics(&user_id, None)
        .await
        .expect("statistics");

    assert_eq!(stats.most_chosen.len(), 1);
    assert_eq!(stats.most_chosen[0].candidate.first_name, "Chosen");
    assert_eq!(stats.not_chosen.len(), 1);
}
