//! Response building.
//!
//! # Responsibilities
//! - JSON error bodies (`{"error": "..."}`) with the matching status
//! - JSONP (callback-wrapped) bodies for script-tag clients
//! - Mapping dataset failures to 500s

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::dataset::DatasetError;

/// Body of the 404 returned when no sentence matches.
pub const NO_MATCH_MESSAGE: &str = "没有找到符合条件的句子";

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An error that renders as a JSON body with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn no_match() -> Self {
        Self::new(StatusCode::NOT_FOUND, NO_MATCH_MESSAGE)
    }

    pub fn file_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "file not found")
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<DatasetError> for ApiError {
    fn from(e: DatasetError) -> Self {
        tracing::error!(error = %e, "Dataset unavailable");
        Self::internal("failed to load sentences")
    }
}

/// Keep only characters legal in a JSONP callback: `[A-Za-z0-9_$.\[\]]`.
///
/// Returns `None` when nothing survives.
pub fn sanitize_callback(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '[' | ']'))
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Render `value` as `/**/ typeof cb === 'function' && cb(<json>);`.
///
/// `callback` must already be sanitized.
pub fn jsonp_body<T: Serialize>(callback: &str, value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029");
    Ok(format!(
        "/**/ typeof {callback} === 'function' && {callback}({json});"
    ))
}

/// A 200 JSONP response.
pub fn jsonp<T: Serialize>(callback: &str, value: &T) -> Result<Response, ApiError> {
    let body = jsonp_body(callback, value).map_err(|e| {
        tracing::error!(error = %e, "Failed to serialize JSONP body");
        ApiError::internal("failed to serialize response")
    })?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/javascript; charset=utf-8"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Hitokoto;

    #[test]
    fn callback_sanitization() {
        assert_eq!(sanitize_callback("cb").as_deref(), Some("cb"));
        assert_eq!(sanitize_callback("jQuery.cb[0]").as_deref(), Some("jQuery.cb[0]"));
        assert_eq!(sanitize_callback("$_1").as_deref(), Some("$_1"));
        assert_eq!(sanitize_callback("alert(1);//").as_deref(), Some("alert1"));
        assert_eq!(sanitize_callback("();"), None);
    }

    #[test]
    fn jsonp_wraps_record() {
        let record = Hitokoto::from_text("hi");
        assert_eq!(
            jsonp_body("cb", &record).unwrap(),
            r#"/**/ typeof cb === 'function' && cb({"hitokoto":"hi"});"#
        );
    }

    #[test]
    fn jsonp_escapes_line_separators() {
        let record = Hitokoto::from_text("a\u{2028}b\u{2029}c");
        let body = jsonp_body("f", &record).unwrap();
        assert!(body.contains(r"a\u2028b\u2029c"));
        assert!(!body.contains('\u{2028}'));
    }

    #[test]
    fn jsonp_response_headers() {
        let response = jsonp("cb", &Hitokoto::from_text("hi")).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/javascript; charset=utf-8"
        );
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[test]
    fn error_status_is_preserved() {
        let response = ApiError::no_match().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
