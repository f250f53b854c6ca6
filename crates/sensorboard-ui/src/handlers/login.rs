//! Login boundary

use super::Layout;
use crate::{
    AppState,
    auth::{removal_cookie, session_cookie, session_id},
    error::Result,
};
use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use sensorboard_egress::EgressError;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    layout: Layout,
    admin_name: String,
    error: String,
}

fn render_login(admin_name: &str, error: &str) -> Result<Html<String>> {
    let template = LoginTemplate {
        layout: Layout::anonymous(),
        admin_name: admin_name.to_string(),
        error: error.to_string(),
    };
    Ok(Html(template.render()?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[serde(default)]
    pub admin_name: String,
    #[serde(default)]
    pub admin_password: String,
}

pub async fn login_page(State(state): State<AppState>, jar: CookieJar) -> Result<Response> {
    let signed_in = session_id(&jar, &state.config.cookie_name)
        .and_then(|id| state.sessions.get(&id))
        .is_some();
    if signed_in {
        return Ok(Redirect::to("/").into_response());
    }
    Ok(render_login("", "")?.into_response())
}

pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let admin_name = form.admin_name.trim();
    if admin_name.is_empty() || form.admin_password.is_empty() {
        let page = render_login(admin_name, "Nama dan password wajib diisi")?;
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
    }

    match state.client.login(admin_name, &form.admin_password).await {
        Ok(session) => {
            info!(admin = %session.admin_name, role = ?session.admin_role, "Admin signed in");
            let id = state.sessions.create(session);
            let jar = jar.add(session_cookie(&state.config.cookie_name, id));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(e) => {
            warn!(admin = %admin_name, error = %e, "Login failed");
            let (status, message) = match &e {
                EgressError::Unauthorized => (
                    StatusCode::UNAUTHORIZED,
                    "Nama atau password salah".to_string(),
                ),
                EgressError::Remote {
                    status_code: 400..=499,
                    message,
                } => (StatusCode::UNAUTHORIZED, message.clone()),
                other => (StatusCode::BAD_GATEWAY, other.to_string()),
            };
            let page = render_login(admin_name, &message)?;
            Ok((status, page).into_response())
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let removed = session_id(&jar, &state.config.cookie_name).and_then(|id| state.sessions.remove(&id));
    if let Some(session) = removed {
        info!(admin = %session.admin_name, "Admin signed out");
    }
    let jar = jar.remove(removal_cookie(&state.config.cookie_name));
    (jar, Redirect::to("/login"))
}
