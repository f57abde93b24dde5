use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct GetUserReportRequest {
    pub user_id: i64,
    pub start_date: String,
    pub end_date: String,
}

/// Response envelope for `GetUserReport`. Business failures ride inside the
/// payload on a normal response, never as a transport fault.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetUserReportResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: i32,
    pub message: String,
    pub description: String,
}

impl GetUserReportResponse {
    pub fn ok(file_url: String) -> Self {
        Self {
            message: Some(file_url),
            error: None,
        }
    }

    pub fn internal_error(description: String) -> Self {
        Self {
            message: None,
            error: Some(ErrorPayload {
                code: 500,
                message: "Internal Server Error".to_string(),
                description,
            }),
        }
    }
}
