//! Marks entry, listing and retraction handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::domain::{MarkEntry, MarksFilter, MarksRecorded, MarksRetracted, RecordMarks};
use crate::errors::AppResult;
use crate::types::{ApiResponse, Paginated, PaginationParams};

/// Marks deleted and module reset
#[derive(Debug, Serialize, ToSchema)]
pub struct MarksRetractedResponse {
    #[schema(example = "Marks deleted successfully")]
    pub message: String,
    pub details: MarksRetracted,
}

/// Create marks routes
pub fn marks_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_marks).post(record_marks))
        .route("/:student_id/:module_id", delete(retract_marks))
}

/// Record theory and practical marks for a module
#[utoipa::path(
    post,
    path = "/api/student-performance",
    tag = "Marks",
    request_body = RecordMarks,
    responses(
        (status = 201, description = "Marks recorded", body = crate::types::MarksRecordedResponse),
        (status = 400, description = "Names the validation or eligibility rule that failed")
    )
)]
pub async fn record_marks(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RecordMarks>,
) -> AppResult<(StatusCode, Json<ApiResponse<MarksRecorded>>)> {
    let recorded = state.marks_service.record_marks(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            recorded,
            "Marks recorded successfully",
        )),
    ))
}

/// Delete recorded marks and reset the module to Enrolled
#[utoipa::path(
    delete,
    path = "/api/student-performance/{student_id}/{module_id}",
    tag = "Marks",
    params(
        ("student_id" = String, Path, description = "Student ID"),
        ("module_id" = i32, Path, description = "Module ID")
    ),
    responses(
        (status = 200, description = "Marks deleted", body = MarksRetractedResponse),
        (status = 404, description = "Record not found")
    )
)]
pub async fn retract_marks(
    State(state): State<AppState>,
    Path((student_id, module_id)): Path<(String, i32)>,
) -> AppResult<Json<MarksRetractedResponse>> {
    let details = state
        .marks_service
        .retract_marks(student_id, module_id)
        .await?;

    Ok(Json(MarksRetractedResponse {
        message: "Marks deleted successfully".to_string(),
        details,
    }))
}

/// List recorded marks, newest first
#[utoipa::path(
    get,
    path = "/api/student-performance",
    tag = "Marks",
    params(MarksFilter, PaginationParams),
    responses(
        (status = 200, description = "One page of marks", body = crate::types::PaginatedMarks)
    )
)]
pub async fn list_marks(
    State(state): State<AppState>,
    Query(filter): Query<MarksFilter>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<Paginated<MarkEntry>>> {
    let page = state.progress_service.list_marks(filter, pagination).await?;
    Ok(Json(page))
}
