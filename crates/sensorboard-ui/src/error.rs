//! Error type for the dashboard handlers

use crate::handlers::Layout;
use askama::Template;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sensorboard_egress::EgressError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Remote(#[from] EgressError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Export failures are answered as JSON so the page can alert the user
    #[error("Export failed: {0}")]
    Export(String),

    #[error("Halaman tidak ditemukan")]
    NotFound,

    #[error("Akses ditolak")]
    Forbidden,
}

pub type Result<T> = std::result::Result<T, UiError>;

impl UiError {
    pub fn status(&self) -> StatusCode {
        match self {
            UiError::Remote(EgressError::InvalidId(_)) => StatusCode::NOT_FOUND,
            UiError::Remote(_) | UiError::Export(_) => StatusCode::BAD_GATEWAY,
            UiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UiError::NotFound => StatusCode::NOT_FOUND,
            UiError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// Code shown next to the message on the error banner
    pub fn code(&self) -> Option<u16> {
        match self {
            UiError::Remote(err) => err.status_code(),
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    layout: Layout,
    message: String,
    code: String,
}

impl IntoResponse for UiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let UiError::Export(message) = &self {
            return (status, Json(json!({ "message": message }))).into_response();
        }

        let template = ErrorTemplate {
            layout: Layout::anonymous(),
            message: self.to_string(),
            code: self.code().map(|c| c.to_string()).unwrap_or_default(),
        };
        match template.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                error!("Failed to render error page: {}", e);
                (status, self.to_string()).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let remote = UiError::Remote(EgressError::Remote {
            status_code: 500,
            message: "database offline".to_string(),
        });
        assert_eq!(remote.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(remote.code(), Some(500));
        assert_eq!(UiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(UiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            UiError::Remote(EgressError::InvalidId("..".to_string())).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_export_error_is_json() {
        let response = UiError::Export("Remote API error (500): boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "Remote API error (500): boom");
    }

    #[tokio::test]
    async fn test_remote_error_renders_banner() {
        let response = UiError::Remote(EgressError::Remote {
            status_code: 503,
            message: "maintenance".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("maintenance"));
        assert!(html.contains("503"));
    }
}
