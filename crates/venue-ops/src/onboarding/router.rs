//! HTTP surface for the onboarding console. Handlers stay thin: decode the
//! payload, call the service, map domain errors onto status codes.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::domain::{BusinessModel, ProcessId, ProcessStatus, StaffAssignee};
use super::repository::{
    IdentityProvider, ProcessRepository, ProcessViews, RepositoryError,
};
use super::service::{
    AddOnSubmission, IntroUpdate, OnboardingError, OnboardingService, RentalSubmission,
    SpaceInfoUpdate,
};

/// Router builder exposing the onboarding process and space endpoints.
pub fn onboarding_router<R, I>(service: Arc<OnboardingService<R, I>>) -> Router
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    Router::new()
        .route(
            "/api/onboarding/processes-list",
            get(list_handler::<R, I>),
        )
        .route("/api/onboarding/process", get(get_handler::<R, I>))
        .route(
            "/api/onboarding/process/intro",
            put(intro_handler::<R, I>),
        )
        .route(
            "/api/onboarding/process/space-info",
            put(space_info_handler::<R, I>),
        )
        .route(
            "/api/onboarding/process/space-photos",
            put(space_photos_handler::<R, I>),
        )
        .route(
            "/api/onboarding/process/schedule",
            put(schedule_handler::<R, I>),
        )
        .route(
            "/api/onboarding/process/reasign",
            put(reassign_handler::<R, I>),
        )
        .route(
            "/api/onboarding/process/archive",
            put(archive_handler::<R, I>),
        )
        .route(
            "/api/onboarding/process/complete",
            put(complete_handler::<R, I>),
        )
        .route("/api/space/rental", put(rental_handler::<R, I>))
        .route("/api/space/packages", put(packages_handler::<R, I>))
        .route("/api/space/services", put(services_handler::<R, I>))
        .route("/api/space/extras", put(extras_handler::<R, I>))
        .route(
            "/api/space/business-model",
            put(business_model_handler::<R, I>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListQuery {
    pub(crate) status: Option<ProcessStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessQuery {
    pub(crate) id: ProcessId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IntroPayload {
    pub(crate) id: ProcessId,
    #[serde(flatten)]
    pub(crate) update: IntroUpdate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpaceInfoPayload {
    pub(crate) id: ProcessId,
    #[serde(flatten)]
    pub(crate) update: SpaceInfoUpdate,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpacePhotosPayload {
    pub(crate) id: ProcessId,
    pub(crate) photos: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchedulePayload {
    pub(crate) id: ProcessId,
    pub(crate) date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReassignPayload {
    pub(crate) id: ProcessId,
    pub(crate) assignee: Option<StaffAssignee>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessActionPayload {
    pub(crate) id: ProcessId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RentalPayload {
    pub(crate) id: ProcessId,
    #[serde(flatten)]
    pub(crate) submission: RentalSubmission,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddOnsPayload {
    pub(crate) id: ProcessId,
    pub(crate) entries: Vec<AddOnSubmission>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BusinessModelPayload {
    pub(crate) id: ProcessId,
    pub(crate) business_model: BusinessModel,
}

fn error_response(error: OnboardingError) -> Response {
    let status = match &error {
        OnboardingError::Validation(_)
        | OnboardingError::IncompleteConfiguration { .. }
        | OnboardingError::InvalidScheduleDate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        OnboardingError::Transition(_) => StatusCode::CONFLICT,
        OnboardingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        OnboardingError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        OnboardingError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        OnboardingError::Identity(_) => StatusCode::UNAUTHORIZED,
    };

    let mut payload = json!({ "error": error.to_string() });
    if let OnboardingError::IncompleteConfiguration { missing } = &error {
        payload["missing_sections"] = json!(missing
            .iter()
            .map(|section| section.slug())
            .collect::<Vec<_>>());
    }

    (status, axum::Json(payload)).into_response()
}

fn process_response(process: super::domain::OnboardingProcess) -> Response {
    (StatusCode::OK, axum::Json(process.view())).into_response()
}

pub(crate) async fn list_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.list(query.status) {
        Ok(processes) => {
            let summaries: Vec<_> = processes
                .iter()
                .map(|process| process.summary())
                .collect();
            (StatusCode::OK, axum::Json(summaries)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    Query(query): Query<ProcessQuery>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.get(&query.id) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn intro_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<IntroPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.update_intro(&payload.id, payload.update) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn space_info_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<SpaceInfoPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.update_space_info(&payload.id, payload.update) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn space_photos_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<SpacePhotosPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.update_photos(&payload.id, payload.photos) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn schedule_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<SchedulePayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.schedule(&payload.id, payload.date, Utc::now()) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reassign_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<ReassignPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.reassign(&payload.id, payload.assignee) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn archive_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<ProcessActionPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.archive(&payload.id) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<ProcessActionPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.complete(&payload.id) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rental_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<RentalPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.submit_rental(&payload.id, payload.submission, Utc::now()) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn packages_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<AddOnsPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.submit_packages(&payload.id, payload.entries) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn services_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<AddOnsPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.submit_services(&payload.id, payload.entries) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn extras_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<AddOnsPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.submit_extras(&payload.id, payload.entries) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn business_model_handler<R, I>(
    State(service): State<Arc<OnboardingService<R, I>>>,
    axum::Json(payload): axum::Json<BusinessModelPayload>,
) -> Response
where
    R: ProcessRepository + 'static,
    I: IdentityProvider + 'static,
{
    match service.update_business_model(&payload.id, payload.business_model) {
        Ok(process) => process_response(process),
        Err(error) => error_response(error),
    }
}
