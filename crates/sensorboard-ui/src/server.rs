//! Web UI server implementation

use crate::{
    AppState,
    auth::SessionStore,
    handlers::{dashboard, forms, login, static_files, tables},
};
use axum::{
    Router,
    routing::{get, post},
};
use sensorboard_core::models::{Expense, Income, Report, SensorReading};
use sensorboard_egress::RemoteClient;
use serde::{Deserialize, Serialize};
use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;
use tracing::info;

/// UI server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Host to bind to (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (default: 8082)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Live dashboard refresh interval in seconds (default: 5)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Enable spreadsheet export (default: true)
    #[serde(default = "default_export_enabled")]
    pub export_enabled: bool,

    /// Lifetime of a login session in seconds (default: 24 hours)
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8082
}
fn default_refresh_interval() -> u64 {
    5
}
fn default_export_enabled() -> bool {
    true
}
fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}
fn default_cookie_name() -> String {
    "session".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            refresh_interval: default_refresh_interval(),
            export_enabled: default_export_enabled(),
            session_ttl_secs: default_session_ttl_secs(),
            cookie_name: default_cookie_name(),
        }
    }
}

/// UI Server
pub struct UiServer {
    config: UiConfig,
    client: Arc<RemoteClient>,
    sessions: Arc<SessionStore>,
}

impl UiServer {
    /// Create a new UI server
    pub fn new(config: UiConfig, client: RemoteClient) -> Self {
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.session_ttl_secs,
        )));
        Self {
            config,
            client: Arc::new(client),
            sessions,
        }
    }

    /// Session store backing the login cookie
    pub fn sessions(&self) -> Arc<SessionStore> {
        self.sessions.clone()
    }

    /// Build the Axum router with all routes
    pub fn router(&self) -> Router {
        let state = AppState {
            client: self.client.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
        };

        Router::new()
            // Login boundary
            .route("/login", get(login::login_page).post(login::login_submit))
            .route("/logout", get(login::logout))

            // Live dashboard
            .route("/", get(dashboard::dashboard))
            .route("/dashboard/stream", get(dashboard::dashboard_stream))

            // Sensor readings
            .route("/data-sensors", get(tables::list_page::<SensorReading>))
            .route("/data-sensors/export", get(tables::export::<SensorReading>))
            .route("/data-sensors/delete", post(tables::delete::<SensorReading>))

            // Income
            .route("/income", get(tables::list_page::<Income>))
            .route("/income/export", get(tables::export::<Income>))
            .route("/income/delete", post(tables::delete::<Income>))
            .route(
                "/income/create",
                get(forms::create_form::<Income>).post(forms::create_submit::<Income>),
            )
            .route(
                "/income/edit/{id}",
                get(forms::edit_form::<Income>).post(forms::edit_submit::<Income>),
            )

            // Expenses
            .route("/expenses", get(tables::list_page::<Expense>))
            .route("/expenses/export", get(tables::export::<Expense>))
            .route("/expenses/delete", post(tables::delete::<Expense>))
            .route(
                "/expenses/create",
                get(forms::create_form::<Expense>).post(forms::create_submit::<Expense>),
            )
            .route(
                "/expenses/edit/{id}",
                get(forms::edit_form::<Expense>).post(forms::edit_submit::<Expense>),
            )

            // Reports
            .route("/reports", get(tables::list_page::<Report>))
            .route("/reports/export", get(tables::export::<Report>))

            // Static assets (embedded in binary)
            .route("/static/css/style.css", get(static_files::serve_css))
            .route("/static/js/app.js", get(static_files::serve_app_js))
            .route("/static/js/dashboard.js", get(static_files::serve_dashboard_js))

            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the UI server and run until `shutdown` resolves
    pub async fn serve(self, shutdown: impl Future<Output = ()> + Send + 'static) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

        let router = self.router();

        info!("📊 Sensorboard UI starting on http://{}", addr);
        info!("   Dashboard:    http://{}/", addr);
        info!("   Data sensor:  http://{}/data-sensors", addr);
        info!("   Income:       http://{}/income", addr);
        info!("   Expenses:     http://{}/expenses", addr);
        info!("   Reports:      http://{}/reports", addr);
        info!("   Remote API:   {}", self.client.config().base_url);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
