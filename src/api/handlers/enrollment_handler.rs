//! Enrollment handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::{JsonBody, ValidatedJson};
use crate::api::AppState;
use crate::domain::{EligibilityCheck, Eligibility, EnrollStudent, EnrollmentOutcome};
use crate::errors::AppResult;

/// Enrollment created or reactivated
#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentCreated {
    #[schema(example = "Enrollment created successfully")]
    pub message: String,
    #[serde(flatten)]
    pub outcome: EnrollmentOutcome,
}

/// Create enrollment routes
pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(enroll))
        .route("/check", post(check_eligibility))
}

/// Enroll a student in a course and register modules
#[utoipa::path(
    post,
    path = "/api/enrollments",
    tag = "Enrollments",
    request_body = EnrollStudent,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentCreated),
        (status = 400, description = "Missing fields or modules outside the course"),
        (status = 409, description = "Unfinished modules block enrollment, or a module is already registered")
    )
)]
pub async fn enroll(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<EnrollStudent>,
) -> AppResult<(StatusCode, Json<EnrollmentCreated>)> {
    let outcome = state.enrollment_service.enroll(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentCreated {
            message: "Enrollment created successfully".to_string(),
            outcome,
        }),
    ))
}

/// Run the enrollment guard without enrolling
#[utoipa::path(
    post,
    path = "/api/enrollments/check",
    tag = "Enrollments",
    request_body = EligibilityCheck,
    responses(
        (status = 200, description = "Student may enroll", body = Eligibility),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Unfinished modules block enrollment")
    )
)]
pub async fn check_eligibility(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<EligibilityCheck>,
) -> AppResult<Json<Eligibility>> {
    let eligibility = state.enrollment_service.check_eligibility(payload).await?;
    Ok(Json(eligibility))
}
