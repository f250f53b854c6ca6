//! Dashboard page and its live update stream

use super::Layout;
use crate::{AppState, auth::RequireSession, error::Result, poller};
use askama::Template;
use axum::{
    extract::State,
    response::{
        Html,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::{Stream, StreamExt};
use sensorboard_core::time::format_timestamp;
use sensorboard_egress::RemoteClient;
use serde::Serialize;
use std::{convert::Infallible, sync::Arc, time::Duration};
use tracing::{debug, warn};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    layout: Layout,
    refresh_interval: u64,
}

pub async fn dashboard(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let template = DashboardTemplate {
        layout: Layout::new(&session, "/"),
        refresh_interval: state.config.refresh_interval,
    };
    Ok(Html(template.render()?))
}

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub value: f64,
    pub time: String,
}

/// Everything the dashboard shows, fetched in one refresh
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub temperature: Vec<ChartPoint>,
    pub humidity: Vec<ChartPoint>,
    pub latest_temperature: Option<f64>,
    pub latest_humidity: Option<f64>,
}

/// Fetch both statistic series
pub async fn fetch_snapshot(client: &RemoteClient) -> std::result::Result<DashboardSnapshot, String> {
    let (temperature, humidity) =
        tokio::try_join!(client.temperature_statistic(), client.humidity_statistic())
            .map_err(|e| e.to_string())?;

    let temperature: Vec<_> = temperature
        .into_iter()
        .map(|sample| ChartPoint {
            value: sample.dht_sensor_temperature,
            time: format_timestamp(&sample.created_at),
        })
        .collect();
    let humidity: Vec<_> = humidity
        .into_iter()
        .map(|sample| ChartPoint {
            value: sample.dht_sensor_humidity,
            time: format_timestamp(&sample.created_at),
        })
        .collect();

    Ok(DashboardSnapshot {
        latest_temperature: temperature.last().map(|p| p.value),
        latest_humidity: humidity.last().map(|p| p.value),
        temperature,
        humidity,
    })
}

/// Server-sent events carrying a fresh snapshot every refresh interval
///
/// Each connection owns one poller; closing the page drops the stream and
/// with it the poller.
pub async fn dashboard_stream(
    RequireSession(session): RequireSession,
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    debug!(admin = %session.admin_name, "Dashboard stream opened");

    let period = Duration::from_secs(state.config.refresh_interval.max(1));
    let client = state.client.clone();
    let handle = poller::spawn(period, move || {
        let client = Arc::clone(&client);
        async move { fetch_snapshot(&client).await }
    });

    let events = handle.into_stream().map(|snapshot| Ok(snapshot_event(snapshot)));
    Sse::new(events).keep_alive(KeepAlive::default())
}

fn snapshot_event(snapshot: std::result::Result<DashboardSnapshot, String>) -> Event {
    let event = snapshot.and_then(|snapshot| {
        Event::default()
            .event("snapshot")
            .json_data(&snapshot)
            .map_err(|e| e.to_string())
    });

    event.unwrap_or_else(|message| {
        warn!(%message, "Dashboard refresh failed");
        Event::default().event("error").data(message)
    })
}
