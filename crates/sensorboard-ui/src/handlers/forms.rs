//! Create and edit forms for income and expense entries

use super::Layout;
use crate::{
    AppState,
    auth::RequireSession,
    error::Result,
    resources::EntryResource,
};
use askama::Template;
use axum::{
    Form,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use sensorboard_core::{Session, models::EntryPayload};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Template)]
#[template(path = "form.html")]
struct FormTemplate {
    layout: Layout,
    title: String,
    action: String,
    back_href: &'static str,
    name: String,
    nominal: String,
    error: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nominal: String,
}

impl EntryForm {
    /// Trimmed payload, or a message when a field is missing
    fn payload(&self, id: Option<String>) -> std::result::Result<EntryPayload, &'static str> {
        let name = self.name.trim();
        let nominal = self.nominal.trim();
        if name.is_empty() || nominal.is_empty() {
            return Err("Nama dan Nominal wajib diisi");
        }
        if nominal.parse::<f64>().is_err() {
            return Err("Nominal harus berupa angka");
        }
        Ok(EntryPayload {
            id,
            name: name.to_string(),
            nominal: nominal.to_string(),
        })
    }
}

fn render_form<R: EntryResource>(
    session: &Session,
    id: Option<&str>,
    form: &EntryForm,
    error: &str,
) -> Result<Html<String>> {
    let route = R::RESOURCE.route();
    let (title, action) = match id {
        Some(id) => (format!("Edit {}", R::TITLE), format!("{}/edit/{}", route, id)),
        None => (format!("Tambah {}", R::TITLE), format!("{}/create", route)),
    };

    let template = FormTemplate {
        layout: Layout::for_resource(session, R::RESOURCE),
        title,
        action,
        back_href: route,
        name: form.name.clone(),
        nominal: form.nominal.clone(),
        error: error.to_string(),
    };
    Ok(Html(template.render()?))
}

pub async fn create_form<R: EntryResource>(
    RequireSession(session): RequireSession,
) -> Result<Html<String>> {
    render_form::<R>(&session, None, &EntryForm::default(), "")
}

pub async fn create_submit<R: EntryResource>(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Response> {
    save::<R>(&state, &session, None, form).await
}

pub async fn edit_form<R: EntryResource>(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let entry: R = state.client.detail(&id).await?;
    let form = EntryForm {
        name: entry.name().to_string(),
        nominal: entry.nominal().to_string(),
    };
    render_form::<R>(&session, Some(&id), &form, "")
}

pub async fn edit_submit<R: EntryResource>(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<EntryForm>,
) -> Result<Response> {
    save::<R>(&state, &session, Some(id), form).await
}

/// Send the entry to the remote API; on failure the form is shown again
/// with the entered values and an error banner
async fn save<R: EntryResource>(
    state: &AppState,
    session: &Session,
    id: Option<String>,
    form: EntryForm,
) -> Result<Response> {
    let payload = match form.payload(id.clone()) {
        Ok(payload) => payload,
        Err(message) => {
            return Ok(render_form::<R>(session, id.as_deref(), &form, message)?.into_response());
        }
    };

    match state.client.save(R::RESOURCE, &payload).await {
        Ok(()) => {
            info!(resource = %R::RESOURCE, update = id.is_some(), "Saved entry");
            Ok(Redirect::to(R::RESOURCE.route()).into_response())
        }
        Err(e) => {
            warn!(resource = %R::RESOURCE, error = %e, "Failed to save entry");
            Ok(render_form::<R>(session, id.as_deref(), &form, &e.to_string())?.into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, nominal: &str) -> EntryForm {
        EntryForm {
            name: name.to_string(),
            nominal: nominal.to_string(),
        }
    }

    #[test]
    fn test_payload_is_trimmed() {
        let payload = form(" Panen ", " 75000 ").payload(None).unwrap();
        assert_eq!(payload.name, "Panen");
        assert_eq!(payload.nominal, "75000");
        assert_eq!(payload.id, None);
    }

    #[test]
    fn test_payload_requires_fields() {
        assert!(form("", "100").payload(None).is_err());
        assert!(form("Gaji", "  ").payload(None).is_err());
    }

    #[test]
    fn test_payload_requires_numeric_nominal() {
        assert_eq!(
            form("Gaji", "seratus").payload(None),
            Err("Nominal harus berupa angka")
        );
    }

    #[test]
    fn test_update_payload_keeps_id() {
        let payload = form("Gaji", "100").payload(Some("i-1".to_string())).unwrap();
        assert_eq!(payload.id.as_deref(), Some("i-1"));
    }
}
