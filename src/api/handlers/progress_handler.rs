//! Read-only progress handlers: per-student module views, course progress,
//! the college-wide summary and the activity feed.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::AppState;
use crate::domain::{
    ActivityEntry, CourseProgress, EnrolledModule, PerformanceSummary, RegisteredModule,
};
use crate::errors::AppResult;

/// Query for a student's registered modules
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentModulesQuery {
    /// Student ID (required)
    pub student_id: Option<String>,
    /// Restrict to one course
    pub course_id: Option<i32>,
}

/// Query for a student's course progress
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProgressQuery {
    /// Student ID (required)
    pub student_id: Option<String>,
}

/// Routes mounted next to the marks routes under `/student-performance`
pub fn student_progress_routes() -> Router<AppState> {
    Router::new()
        .route("/modules", get(enrolled_modules))
        .route("/progress", get(course_progress))
}

/// Routes under `/student-modules`
pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route("/:student_id/:course_id", get(registered_modules))
        .route("/:student_id/:course_id/:level_id", get(registered_modules_in_level))
}

/// Routes under `/performance`
pub fn performance_routes() -> Router<AppState> {
    Router::new().route("/summary", get(performance_summary))
}

/// Routes under `/activities`
pub fn activity_routes() -> Router<AppState> {
    Router::new().route("/recent", get(recent_activity))
}

/// Modules a student is registered for, with marks where entered
#[utoipa::path(
    get,
    path = "/api/student-performance/modules",
    tag = "Progress",
    params(StudentModulesQuery),
    responses(
        (status = 200, description = "Registered modules ordered by level then title", body = Vec<EnrolledModule>),
        (status = 400, description = "student_id is required")
    )
)]
pub async fn enrolled_modules(
    State(state): State<AppState>,
    Query(query): Query<StudentModulesQuery>,
) -> AppResult<Json<Vec<EnrolledModule>>> {
    let modules = state
        .progress_service
        .enrolled_modules(query.student_id.unwrap_or_default(), query.course_id)
        .await?;
    Ok(Json(modules))
}

/// Completion of each active enrollment
#[utoipa::path(
    get,
    path = "/api/student-performance/progress",
    tag = "Progress",
    params(ProgressQuery),
    responses(
        (status = 200, description = "One entry per active enrollment", body = Vec<CourseProgress>),
        (status = 400, description = "student_id is required")
    )
)]
pub async fn course_progress(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> AppResult<Json<Vec<CourseProgress>>> {
    let progress = state
        .progress_service
        .course_progress(query.student_id.unwrap_or_default())
        .await?;
    Ok(Json(progress))
}

/// Modules of a course still awaiting marks
#[utoipa::path(
    get,
    path = "/api/student-modules/{student_id}/{course_id}",
    tag = "Progress",
    params(
        ("student_id" = String, Path, description = "Student ID"),
        ("course_id" = i32, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Modules in Enrolled status", body = Vec<RegisteredModule>)
    )
)]
pub async fn registered_modules(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, i32)>,
) -> AppResult<Json<Vec<RegisteredModule>>> {
    let modules = state
        .progress_service
        .registered_modules(student_id, course_id, None)
        .await?;
    Ok(Json(modules))
}

/// Modules of one course level still awaiting marks
#[utoipa::path(
    get,
    path = "/api/student-modules/{student_id}/{course_id}/{level_id}",
    tag = "Progress",
    params(
        ("student_id" = String, Path, description = "Student ID"),
        ("course_id" = i32, Path, description = "Course ID"),
        ("level_id" = i32, Path, description = "Level ID")
    ),
    responses(
        (status = 200, description = "Modules in Enrolled status", body = Vec<RegisteredModule>)
    )
)]
pub async fn registered_modules_in_level(
    State(state): State<AppState>,
    Path((student_id, course_id, level_id)): Path<(String, i32, i32)>,
) -> AppResult<Json<Vec<RegisteredModule>>> {
    let modules = state
        .progress_service
        .registered_modules(student_id, course_id, Some(level_id))
        .await?;
    Ok(Json(modules))
}

/// College-wide grade distribution
#[utoipa::path(
    get,
    path = "/api/performance/summary",
    tag = "Progress",
    responses(
        (status = 200, description = "Performance summary", body = PerformanceSummary)
    )
)]
pub async fn performance_summary(
    State(state): State<AppState>,
) -> AppResult<Json<PerformanceSummary>> {
    let summary = state.progress_service.performance_summary().await?;
    Ok(Json(summary))
}

/// Latest entries of the activity feed
#[utoipa::path(
    get,
    path = "/api/activities/recent",
    tag = "Progress",
    responses(
        (status = 200, description = "Most recent activities", body = Vec<ActivityEntry>)
    )
)]
pub async fn recent_activity(State(state): State<AppState>) -> AppResult<Json<Vec<ActivityEntry>>> {
    let entries = state.progress_service.recent_activity().await?;
    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{body_json, state_with};
    use crate::config::MSG_STUDENT_ID_REQUIRED;
    use crate::errors::AppError;
    use crate::services::MockProgressService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use tower::ServiceExt;

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_missing_student_id_is_rejected() {
        let mut service = MockProgressService::new();
        service
            .expect_enrolled_modules()
            .withf(|student_id, course_id| student_id.is_empty() && course_id.is_none())
            .returning(|_, _| Err(AppError::validation(MSG_STUDENT_ID_REQUIRED)));

        let app = student_progress_routes().with_state(state_with(service));
        let response = app.oneshot(get("/modules")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], MSG_STUDENT_ID_REQUIRED);
    }

    #[tokio::test]
    async fn test_course_progress_serializes_rates() {
        let mut service = MockProgressService::new();
        service
            .expect_course_progress()
            .withf(|student_id| student_id == "VTC-1")
            .returning(|_| {
                Ok(vec![CourseProgress {
                    course_id: 1,
                    course_name: "Electrical Installation".into(),
                    total_enrolled_modules: 3,
                    completed_modules: 2,
                    failed_modules: 0,
                    pending_modules: 1,
                    completion_rate: 66.67,
                }])
            });

        let app = student_progress_routes().with_state(state_with(service));
        let response = app.oneshot(get("/progress?student_id=VTC-1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["completion_rate"], 66.67);
        assert_eq!(body[0]["pending_modules"], 1);
    }

    #[tokio::test]
    async fn test_level_segment_is_optional() {
        let mut service = MockProgressService::new();
        service
            .expect_registered_modules()
            .withf(|student_id, course_id, level_id| {
                student_id == "VTC-1" && *course_id == 4 && level_id.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(vec![]));
        service
            .expect_registered_modules()
            .withf(|_, _, level_id| *level_id == Some(2))
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![RegisteredModule {
                    module_id: 12,
                    title: "Motor Control".into(),
                    level_name: "Level 2".into(),
                }])
            });

        let app = registration_routes().with_state(state_with(service));

        let response = app.clone().oneshot(get("/VTC-1/4")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));

        let response = app.oneshot(get("/VTC-1/4/2")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body[0]["title"], "Motor Control");
    }

    #[tokio::test]
    async fn test_summary_and_activity_feed() {
        let mut service = MockProgressService::new();
        service.expect_performance_summary().returning(|| {
            Ok(PerformanceSummary {
                total_students_assessed: 2,
                total_assessments: 3,
                average_score: 61.33,
                distinctions: 1,
                credits: 0,
                passes: 1,
                fails: 1,
            })
        });
        service.expect_recent_activity().returning(|| {
            Ok(vec![ActivityEntry {
                id: 7,
                student: "Amina Otieno".into(),
                action: "Marks entered for \"Welding I\" (Grade: Pass)".into(),
                course: "Module: WLD101".into(),
                time: Utc::now(),
                kind: "result".into(),
            }])
        });

        let state = state_with(service);

        let response = performance_routes()
            .with_state(state.clone())
            .oneshot(get("/summary"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["fails"], 1);
        assert_eq!(body["average_score"], 61.33);

        let response = activity_routes()
            .with_state(state)
            .oneshot(get("/recent"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body[0]["type"], "result");
        assert_eq!(body[0]["student"], "Amina Otieno");
    }
}
