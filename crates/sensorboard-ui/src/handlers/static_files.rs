//! Static file handlers - embedded in binary

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

const JAVASCRIPT: &str = "application/javascript; charset=utf-8";

/// Serve embedded CSS
pub async fn serve_css() -> Response {
    let css = include_str!("../static/css/style.css");
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        css,
    )
        .into_response()
}

/// Serve embedded app.js (filters, export button, delete confirmation)
pub async fn serve_app_js() -> Response {
    let js = include_str!("../static/js/app.js");
    (StatusCode::OK, [(header::CONTENT_TYPE, JAVASCRIPT)], js).into_response()
}

/// Serve embedded dashboard.js (live charts)
pub async fn serve_dashboard_js() -> Response {
    let js = include_str!("../static/js/dashboard.js");
    (StatusCode::OK, [(header::CONTENT_TYPE, JAVASCRIPT)], js).into_response()
}
