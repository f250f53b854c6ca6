use sensorboard_egress::RemoteConfig;
use sensorboard_ui::UiConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Backend API the dashboard reads from and writes to
    #[serde(default)]
    pub remote: RemoteConfig,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    #[serde(default = "default_true")]
    pub export_enabled: bool,

    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            remote: RemoteConfig::default(),
            ui: UiSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
            export_enabled: true,
            session_ttl_secs: default_session_ttl_secs(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml::from_str(&contents)?
        } else {
            // Default to YAML
            serde_yaml::from_str(&contents)?
        };

        Ok(config)
    }

    /// Merge environment variables into config (env vars take precedence)
    pub fn merge_env(&mut self) {
        // Remote API
        if let Ok(val) = std::env::var("SENSORBOARD_API_URL") {
            self.remote.base_url = val;
        }

        if let Ok(val) = std::env::var("SENSORBOARD_API_USERNAME") {
            self.remote.username = val;
        }

        if let Ok(val) = std::env::var("SENSORBOARD_API_PASSWORD") {
            self.remote.password = val;
        }

        // Dashboard settings
        if let Ok(val) = std::env::var("SENSORBOARD_REFRESH_INTERVAL") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => self.ui.refresh_interval = secs,
                _ => eprintln!(
                    "Warning: Invalid SENSORBOARD_REFRESH_INTERVAL '{}', using {}",
                    val, self.ui.refresh_interval
                ),
            }
        }

        // Logging settings
        if let Ok(val) = std::env::var("SENSORBOARD_LOG_LEVEL") {
            self.logging.level = val;
        }

        // Server settings
        if let Ok(val) = std::env::var("SENSORBOARD_PORT") {
            if let Ok(port) = val.parse::<u16>() {
                self.port = port;
            }
        }

        if let Ok(val) = std::env::var("SENSORBOARD_HOST") {
            self.host = val;
        }
    }

    /// Settings for the dashboard server
    pub fn ui_config(&self) -> UiConfig {
        UiConfig {
            host: self.host.clone(),
            port: self.port,
            refresh_interval: self.ui.refresh_interval,
            export_enabled: self.ui.export_enabled,
            session_ttl_secs: self.ui.session_ttl_secs,
            cookie_name: self.ui.cookie_name.clone(),
        }
    }
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

fn default_session_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
