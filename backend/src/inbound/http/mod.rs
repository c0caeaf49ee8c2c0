//! HTTP inbound adapter exposing the REST endpoints under `/api`.

use actix_web::web;

pub mod applications;
pub mod auth;
pub mod candidates;
pub mod courses;
pub mod error;
pub mod health;
pub mod lecturer;
pub mod response;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;

/// Register every REST handler; mount inside `web::scope("/api")`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::sign_up)
        .service(auth::sign_in)
        .service(auth::sign_out)
        .service(auth::me)
        .service(courses::list_courses)
        .service(courses::get_course)
        .service(candidates::get_profile)
        .service(candidates::update_profile)
        .service(candidates::add_credential)
        .service(candidates::remove_credential)
        .service(candidates::add_previous_role)
        .service(candidates::remove_previous_role)
        .service(applications::apply)
        .service(applications::my_applications)
        .service(lecturer::assigned_courses)
        .service(lecturer::search_applications)
        .service(lecturer::candidate_profile)
        .service(lecturer::set_status)
        .service(lecturer::set_ranking)
        .service(lecturer::set_comment)
        .service(lecturer::statistics);
}

/// Body and query extractor settings reporting failures in the error envelope.
pub fn extractor_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            crate::domain::Error::invalid_request(format!("invalid path: {err}")).into()
        }));
}
