//! Sensorboard Web UI
//!
//! Admin dashboard for the sensor and finance API: paginated tables with
//! filters, spreadsheet export, income/expense forms and a live sensor view.
//! All HTML templates and custom JS/CSS are compiled into the binary.
//! Third-party libraries (Chart.js) are loaded from CDN.

pub mod auth;
pub mod error;
pub mod export;
pub mod handlers;
pub mod poller;
pub mod resources;
pub mod server;
pub mod table;

pub use error::UiError;
pub use server::{UiConfig, UiServer};

use auth::SessionStore;
use sensorboard_egress::RemoteClient;
use std::sync::Arc;

/// Shared application state for the UI server
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<RemoteClient>,
    pub sessions: Arc<SessionStore>,
    pub config: UiConfig,
}
