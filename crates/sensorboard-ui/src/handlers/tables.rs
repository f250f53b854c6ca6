//! List pages, spreadsheet export and delete actions
//!
//! Every handler is generic over the resource, so one set of functions serves
//! sensors, income, expense and reports.

use super::Layout;
use crate::{
    AppState,
    auth::RequireSession,
    error::{Result, UiError},
    export::{self, build_grid, export_filename, write_workbook},
    resources::{self, TableResource},
    table::{PageLink, RenderedTable, page_links, render_table},
};
use askama::Template;
use axum::{
    Form,
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
};
use chrono::Local;
use sensorboard_core::{
    PageEnvelope, PageRequest, RawPageQuery, build_query,
    query::{DateRange, SIZE_OPTIONS},
};
use std::collections::HashMap;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Current filter state as shown in the filter form
#[derive(Debug, Clone)]
pub struct FilterView {
    pub search: String,
    pub ranges: Vec<SelectOption>,
    pub sizes: Vec<SelectOption>,
    pub start: String,
    pub end: String,
}

impl FilterView {
    fn from_request(request: &PageRequest) -> Self {
        let mut ranges: Vec<_> = DateRange::KNOWN
            .iter()
            .map(|(range, label)| SelectOption {
                value: range.as_str().to_string(),
                label: label.to_string(),
                selected: *range == request.date_range,
            })
            .collect();
        if let DateRange::Other(value) = &request.date_range {
            ranges.push(SelectOption {
                value: value.clone(),
                label: value.clone(),
                selected: true,
            });
        }

        let mut sizes: Vec<_> = SIZE_OPTIONS
            .iter()
            .map(|size| SelectOption {
                value: size.to_string(),
                label: size.to_string(),
                selected: *size == request.size,
            })
            .collect();
        if !SIZE_OPTIONS.contains(&request.size) {
            sizes.push(SelectOption {
                value: request.size.to_string(),
                label: request.size.to_string(),
                selected: true,
            });
        }

        Self {
            search: request.search.clone(),
            ranges,
            sizes,
            start: request.start.clone().unwrap_or_default(),
            end: request.end.clone().unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "list.html")]
struct ListTemplate {
    layout: Layout,
    title: &'static str,
    route: &'static str,
    table: RenderedTable,
    links: Vec<PageLink>,
    filters: FilterView,
    export_enabled: bool,
    export_href: String,
    create_href: String,
    error: String,
}

/// List page; the URL is taken as raw pairs so repeated or malformed
/// parameters are normalized instead of rejected
pub async fn list_page<R: TableResource>(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Html<String>> {
    let pairs = || params.iter().map(|(key, value)| (key.as_str(), value.as_str()));
    let request = build_query(&RawPageQuery::from_pairs(pairs()));
    // Banner message carried back after a failed action
    let error = pairs()
        .find(|(key, _)| *key == "error")
        .map(|(_, value)| value.to_string())
        .unwrap_or_default();
    let mut envelope: PageEnvelope<R> = state.client.list(&request).await?;

    // Some list endpoints omit the paging counters
    if envelope.size == 0 {
        envelope.size = request.size;
        envelope.page = request.page;
    }

    let columns = resources::columns::<R>(envelope.page, envelope.size, &session);
    let table = render_table(&columns, &envelope);
    let route = R::RESOURCE.route();

    let template = ListTemplate {
        layout: Layout::for_resource(&session, R::RESOURCE),
        title: R::TITLE,
        route,
        links: page_links(route, &request, &table.pagination),
        table,
        filters: FilterView::from_request(&request),
        export_enabled: state.config.export_enabled,
        export_href: format!("{}/export", route),
        create_href: if R::EDITABLE {
            format!("{}/create", route)
        } else {
            String::new()
        },
        error,
    };
    Ok(Html(template.render()?))
}

/// Download the whole unpaginated list as a spreadsheet
pub async fn export<R: TableResource>(
    RequireSession(_session): RequireSession,
    State(state): State<AppState>,
) -> Result<Response> {
    if !state.config.export_enabled {
        return Err(UiError::NotFound);
    }

    let rows: Vec<R> = state
        .client
        .list_all()
        .await
        .map_err(|e| UiError::Export(e.to_string()))?;
    let count = rows.len();

    let grid = build_grid(R::EXPORT_HEADERS, rows.iter().map(R::export_row).collect());
    let bytes = write_workbook(&grid).map_err(|e| UiError::Export(e.to_string()))?;
    let filename = export_filename(R::EXPORT_LABEL, Local::now().date_naive());

    info!(resource = %R::RESOURCE, rows = count, file = %filename, "Exported list");

    Ok((
        [
            (header::CONTENT_TYPE, export::CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Forward a delete to the remote API and go back to the list
pub async fn delete<R: TableResource>(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect> {
    if !R::DELETABLE {
        return Err(UiError::NotFound);
    }
    if !session.is_super_admin() {
        warn!(admin = %session.admin_name, resource = %R::RESOURCE, "Delete refused");
        return Err(UiError::Forbidden);
    }

    let route = R::RESOURCE.route();
    let id = match form.get(R::RESOURCE.id_field()).map(|id| id.trim()) {
        Some(id) if !id.is_empty() => id,
        _ => return Ok(redirect_with_error(route, "Data tidak ditemukan")),
    };

    match state.client.delete(R::RESOURCE, id).await {
        Ok(()) => {
            info!(resource = %R::RESOURCE, id, "Deleted record");
            Ok(Redirect::to(route))
        }
        Err(e) => Ok(redirect_with_error(route, &e.to_string())),
    }
}

fn redirect_with_error(route: &str, message: &str) -> Redirect {
    match serde_urlencoded::to_string([("error", message)]) {
        Ok(query) => Redirect::to(&format!("{}?{}", route, query)),
        Err(_) => Redirect::to(route),
    }
}
