use std::fmt::Display;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::accounts::LoginError;
use super::applications::SubmissionError;
use super::domain::{
    ApplicationId, ApplicationRequest, HeadRegistration, LoginCredentials, TeacherRegistration,
    VacancyDraft, VacancyId,
};
use super::ladder::{LadderError, StatusChange};
use super::outcome::Confirmation;
use super::registration::RegistrationError;
use super::repository::{HiringRepository, RepositoryError};
use super::service::HiringServices;
use super::vacancies::VacancyError;

type Services<R> = State<Arc<HiringServices<R>>>;

/// Router builder exposing every hiring operation as JSON.
pub fn hiring_router<R>(services: Arc<HiringServices<R>>) -> Router
where
    R: HiringRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R>))
        .route(
            "/api/v1/applications/:application_id",
            get(application_details_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/advance",
            post(advance_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/descend",
            post(descend_handler::<R>),
        )
        .route(
            "/api/v1/applications/:application_id/reject",
            post(reject_handler::<R>),
        )
        .route(
            "/api/v1/teachers/:ci/applications/current",
            get(current_applications_handler::<R>),
        )
        .route(
            "/api/v1/teachers/:ci/applications/history",
            get(application_history_handler::<R>),
        )
        .route(
            "/api/v1/vacancies",
            get(available_vacancies_handler::<R>).post(create_vacancy_handler::<R>),
        )
        .route(
            "/api/v1/vacancy-drafts/validate",
            post(validate_vacancy_handler::<R>),
        )
        .route(
            "/api/v1/vacancies/:vacancy_id",
            get(vacancy_detail_handler::<R>),
        )
        .route(
            "/api/v1/vacancies/:vacancy_id/applications",
            get(applicants_handler::<R>),
        )
        .route(
            "/api/v1/heads/:ci/vacancies/current",
            get(head_current_vacancies_handler::<R>),
        )
        .route(
            "/api/v1/heads/:ci/vacancies/history",
            get(head_vacancy_history_handler::<R>),
        )
        .route(
            "/api/v1/registration/teachers",
            post(register_teacher_handler::<R>),
        )
        .route(
            "/api/v1/registration/heads",
            post(register_head_handler::<R>),
        )
        .route("/api/v1/login/teachers", post(login_teacher_handler::<R>))
        .route("/api/v1/login/heads", post(login_head_handler::<R>))
        .route("/api/v1/subjects", get(subjects_handler::<R>))
        .with_state(services)
}

fn confirmed<T: Serialize>(status: StatusCode, confirmation: Confirmation<T>) -> Response {
    let payload = json!({
        "success": true,
        "message": confirmation.message,
        "data": confirmation.value,
    });
    (status, Json(payload)).into_response()
}

fn refused(status: StatusCode, error: &impl Display) -> Response {
    let payload = json!({
        "success": false,
        "message": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

fn listing<T: Serialize>(result: Result<T, RepositoryError>) -> Response {
    match result {
        Ok(data) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": data }))).into_response()
        }
        Err(error) => refused(StatusCode::INTERNAL_SERVER_ERROR, &error),
    }
}

fn ladder_response(result: Result<Confirmation<StatusChange>, LadderError>) -> Response {
    match result {
        Ok(confirmation) => confirmed(StatusCode::OK, confirmation),
        Err(error @ LadderError::NotFound { .. }) => refused(StatusCode::NOT_FOUND, &error),
        Err(error @ (LadderError::AtFloor { .. } | LadderError::Locked { .. })) => {
            refused(StatusCode::CONFLICT, &error)
        }
        Err(error @ LadderError::Repository { .. }) => {
            refused(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
    }
}

pub(crate) async fn advance_handler<R>(
    State(services): Services<R>,
    Path(application_id): Path<i64>,
) -> Response
where
    R: HiringRepository + 'static,
{
    ladder_response(services.ladder.advance(ApplicationId(application_id)))
}

pub(crate) async fn descend_handler<R>(
    State(services): Services<R>,
    Path(application_id): Path<i64>,
) -> Response
where
    R: HiringRepository + 'static,
{
    ladder_response(services.ladder.descend(ApplicationId(application_id)))
}

pub(crate) async fn reject_handler<R>(
    State(services): Services<R>,
    Path(application_id): Path<i64>,
) -> Response
where
    R: HiringRepository + 'static,
{
    ladder_response(services.ladder.reject(ApplicationId(application_id)))
}

pub(crate) async fn submit_handler<R>(
    State(services): Services<R>,
    Json(request): Json<ApplicationRequest>,
) -> Response
where
    R: HiringRepository + 'static,
{
    match services.applications.submit(request) {
        Ok(confirmation) => confirmed(StatusCode::CREATED, confirmation),
        Err(
            error @ (SubmissionError::UnknownTeacher { .. }
            | SubmissionError::UnknownVacancy { .. }),
        ) => refused(StatusCode::NOT_FOUND, &error),
        Err(error @ SubmissionError::VacancyExpired { .. }) => refused(StatusCode::GONE, &error),
        Err(error @ SubmissionError::AlreadyApplied { .. }) => {
            refused(StatusCode::CONFLICT, &error)
        }
        Err(error @ SubmissionError::Repository(_)) => {
            refused(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
    }
}

pub(crate) async fn application_details_handler<R>(
    State(services): Services<R>,
    Path(application_id): Path<i64>,
) -> Response
where
    R: HiringRepository + 'static,
{
    match services.applications.details(ApplicationId(application_id)) {
        Ok(Some(view)) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": view }))).into_response()
        }
        Ok(None) => refused(StatusCode::NOT_FOUND, &"No se encontro la postulacion"),
        Err(error) => refused(StatusCode::INTERNAL_SERVER_ERROR, &error),
    }
}

pub(crate) async fn current_applications_handler<R>(
    State(services): Services<R>,
    Path(ci): Path<String>,
) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.applications.current_for_teacher(&ci))
}

pub(crate) async fn application_history_handler<R>(
    State(services): Services<R>,
    Path(ci): Path<String>,
) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.applications.history_for_teacher(&ci))
}

pub(crate) async fn applicants_handler<R>(
    State(services): Services<R>,
    Path(vacancy_id): Path<i64>,
) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.applications.applicants(VacancyId(vacancy_id)))
}

#[derive(Debug, Deserialize)]
pub(crate) struct AvailableQuery {
    #[serde(default)]
    ci: String,
}

pub(crate) async fn available_vacancies_handler<R>(
    State(services): Services<R>,
    Query(query): Query<AvailableQuery>,
) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.vacancies.available(&query.ci))
}

pub(crate) async fn create_vacancy_handler<R>(
    State(services): Services<R>,
    Json(draft): Json<VacancyDraft>,
) -> Response
where
    R: HiringRepository + 'static,
{
    match services.vacancies.create(draft) {
        Ok(confirmation) => confirmed(StatusCode::CREATED, confirmation),
        Err(error @ VacancyError::Repository(_)) => {
            refused(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
        Err(error) => refused(StatusCode::UNPROCESSABLE_ENTITY, &error),
    }
}

pub(crate) async fn validate_vacancy_handler<R>(
    State(services): Services<R>,
    Json(draft): Json<VacancyDraft>,
) -> Response
where
    R: HiringRepository + 'static,
{
    let valid = services.vacancies.validate(&draft);
    (StatusCode::OK, Json(json!({ "success": true, "valid": valid }))).into_response()
}

pub(crate) async fn vacancy_detail_handler<R>(
    State(services): Services<R>,
    Path(vacancy_id): Path<i64>,
) -> Response
where
    R: HiringRepository + 'static,
{
    match services.vacancies.detail(VacancyId(vacancy_id)) {
        Ok(Some(view)) => {
            (StatusCode::OK, Json(json!({ "success": true, "data": view }))).into_response()
        }
        Ok(None) => refused(StatusCode::NOT_FOUND, &"No se encontro la vacante"),
        Err(error) => refused(StatusCode::INTERNAL_SERVER_ERROR, &error),
    }
}

pub(crate) async fn head_current_vacancies_handler<R>(
    State(services): Services<R>,
    Path(ci): Path<String>,
) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.vacancies.head_current(&ci))
}

pub(crate) async fn head_vacancy_history_handler<R>(
    State(services): Services<R>,
    Path(ci): Path<String>,
) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.vacancies.head_history(&ci))
}

fn registration_response<T: Serialize>(
    result: Result<Confirmation<T>, RegistrationError>,
) -> Response {
    match result {
        Ok(confirmation) => confirmed(StatusCode::CREATED, confirmation),
        Err(error @ RegistrationError::CredentialsInUse) => refused(StatusCode::CONFLICT, &error),
        Err(error @ RegistrationError::UnknownCareers { .. }) => {
            refused(StatusCode::UNPROCESSABLE_ENTITY, &error)
        }
        Err(error @ RegistrationError::Repository(_)) => {
            refused(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
    }
}

pub(crate) async fn register_teacher_handler<R>(
    State(services): Services<R>,
    Json(registration): Json<TeacherRegistration>,
) -> Response
where
    R: HiringRepository + 'static,
{
    let result = services
        .registration
        .register_teacher(registration)
        .map(|confirmation| Confirmation::new(confirmation.message, confirmation.value.1));
    registration_response(result)
}

pub(crate) async fn register_head_handler<R>(
    State(services): Services<R>,
    Json(registration): Json<HeadRegistration>,
) -> Response
where
    R: HiringRepository + 'static,
{
    let result = services
        .registration
        .register_head(registration)
        .map(|confirmation| Confirmation::new(confirmation.message, confirmation.value.1));
    registration_response(result)
}

fn login_response(result: Result<Confirmation<String>, LoginError>) -> Response {
    match result {
        Ok(confirmation) => {
            let payload = json!({
                "success": true,
                "message": confirmation.message,
                "ci": confirmation.value,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error @ LoginError::Repository(_)) => {
            refused(StatusCode::INTERNAL_SERVER_ERROR, &error)
        }
        Err(error) => refused(StatusCode::UNAUTHORIZED, &error),
    }
}

pub(crate) async fn login_teacher_handler<R>(
    State(services): Services<R>,
    Json(credentials): Json<LoginCredentials>,
) -> Response
where
    R: HiringRepository + 'static,
{
    login_response(services.accounts.login_teacher(&credentials))
}

pub(crate) async fn login_head_handler<R>(
    State(services): Services<R>,
    Json(credentials): Json<LoginCredentials>,
) -> Response
where
    R: HiringRepository + 'static,
{
    login_response(services.accounts.login_head(&credentials))
}

pub(crate) async fn subjects_handler<R>(State(services): Services<R>) -> Response
where
    R: HiringRepository + 'static,
{
    listing(services.subjects.list())
}
