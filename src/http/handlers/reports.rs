use crate::domain::report::{GetUserReportRequest, GetUserReportResponse};
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

/// The single externally reachable query operation. Internal failures come
/// back as a structured error payload on a 200, never as a transport fault.
pub async fn get_user_report(
    State(state): State<AppState>,
    Query(req): Query<GetUserReportRequest>,
) -> impl IntoResponse {
    match state
        .report_builder
        .build_report(req.user_id, &req.start_date, &req.end_date)
        .await
    {
        Ok(file_url) => (
            axum::http::StatusCode::OK,
            Json(GetUserReportResponse::ok(file_url)),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(user_id = req.user_id, "failed to build report: {err}");
            (
                axum::http::StatusCode::OK,
                Json(GetUserReportResponse::internal_error(format!(
                    "failed to build report for user {}: {err}",
                    req.user_id
                ))),
            )
                .into_response()
        }
    }
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
