//! Request-level errors
//!
//! Every failure a route can hit ends up here and is answered with
//! `{"success": false, "error": "<message>"}` and status 200, so clients
//! only ever branch on `success`.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::chart::ChartError;
use crate::nonparametric::StatsError;
use crate::runner::UnknownTestKind;
use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    UnknownTest(#[from] UnknownTestKind),

    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("upload failed: {0}")]
    Multipart(String),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Failure payload
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        Json(ErrorBody {
            success: false,
            error: self.to_string(),
        })
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_upload_message_passes_through() {
        let err = AppError::from(UploadError::NoFileSelected);
        assert_eq!(err.to_string(), "no file selected");
    }

    #[test]
    fn test_unknown_test_message() {
        let err = AppError::from(UnknownTestKind("anova".into()));
        assert_eq!(err.to_string(), "unknown test type: anova");
    }

    #[test]
    fn test_stats_message_prefixed() {
        let err = AppError::from(StatsError::NonFinite);
        assert_eq!(
            err.to_string(),
            "statistics error: Sample contains a non-finite value"
        );
    }

    #[test]
    fn test_response_is_ok_status() {
        let response = AppError::InvalidRequest("missing field".into()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
