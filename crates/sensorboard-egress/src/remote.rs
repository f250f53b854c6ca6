//! Remote data source connector

use crate::{
    EgressError, Result,
    client::{HttpClientConfig, create_client},
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use sensorboard_core::{
    PageEnvelope, PageRequest, Resource, Session,
    models::{EntryPayload, HumiditySample, Record, TemperatureSample},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the backend API (no trailing slash needed)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP Basic username
    #[serde(default)]
    pub username: String,

    /// HTTP Basic password
    #[serde(default)]
    pub password: String,

    /// HTTP client configuration
    #[serde(flatten)]
    pub client: HttpClientConfig,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            password: String::new(),
            client: HttpClientConfig::default(),
        }
    }
}

impl RemoteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

/// `{ "data": ... }` wrapper used by every API response
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Error body sent by the API on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload<'a> {
    admin_name: &'a str,
    admin_password: &'a str,
}

/// Client for the backend API
#[derive(Debug, Clone)]
pub struct RemoteClient {
    config: RemoteConfig,
    client: Client,
}

impl RemoteClient {
    /// Create a new client
    pub fn new(config: RemoteConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| EgressError::Config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;
        let client = create_client(&config.client)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Fetch one page of a resource's list
    #[instrument(skip(self, request), fields(resource = %T::RESOURCE))]
    pub async fn list<T>(&self, request: &PageRequest) -> Result<PageEnvelope<T>>
    where
        T: Record + DeserializeOwned,
    {
        let url = self.url(&format!("{}/list", T::RESOURCE.path()), &request.remote_params())?;
        let envelope: PageEnvelope<T> = self.fetch(self.request(Method::GET, url)).await?;
        debug!(
            items = envelope.items.len(),
            total = envelope.total_items,
            "Fetched list page"
        );
        Ok(envelope)
    }

    /// Fetch the whole unpaginated list, as used by spreadsheet export
    #[instrument(skip(self), fields(resource = %T::RESOURCE))]
    pub async fn list_all<T>(&self) -> Result<Vec<T>>
    where
        T: Record + DeserializeOwned,
    {
        let url = self.url(&format!("{}/list", T::RESOURCE.path()), &[])?;
        let envelope: PageEnvelope<T> = self.fetch(self.request(Method::GET, url)).await?;
        Ok(envelope.items)
    }

    /// Fetch a single record
    #[instrument(skip(self), fields(resource = %T::RESOURCE))]
    pub async fn detail<T>(&self, id: &str) -> Result<T>
    where
        T: Record + DeserializeOwned,
    {
        let mut url = self.url(&format!("{}/detail", T::RESOURCE.path()), &[])?;
        push_segment(&mut url, id)?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Create an entry, or update it when the payload carries an identifier
    #[instrument(skip(self, resource, payload), fields(resource = %resource))]
    pub async fn save(&self, resource: Resource, payload: &EntryPayload) -> Result<()> {
        let url = self.url(resource.path(), &[])?;
        let response = self
            .request(Method::POST, url)
            .json(&payload.to_json(resource))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Delete a record by identifier
    #[instrument(skip(self, resource), fields(resource = %resource))]
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<()> {
        let url = self.url(resource.path(), &[(resource.id_field(), id.to_string())])?;
        let response = self.request(Method::DELETE, url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Latest temperature samples for the dashboard chart
    #[instrument(skip(self))]
    pub async fn temperature_statistic(&self) -> Result<Vec<TemperatureSample>> {
        let url = self.url("dht-sensors/statistic/temperature", &[])?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Latest humidity samples for the dashboard chart
    #[instrument(skip(self))]
    pub async fn humidity_statistic(&self) -> Result<Vec<HumiditySample>> {
        let url = self.url("dht-sensors/statistic/humidity", &[])?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Verify admin credentials and return the admin's session data
    #[instrument(skip(self, password))]
    pub async fn login(&self, admin_name: &str, password: &str) -> Result<Session> {
        let url = self.url("admins/login", &[])?;
        let request = self.request(Method::POST, url).json(&LoginPayload {
            admin_name,
            admin_password: password,
        });
        self.fetch(request).await
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.config.base_url.trim_end_matches('/'), path);
        let mut url =
            Url::parse(&raw).map_err(|e| EgressError::Config(format!("Invalid URL '{}': {}", raw, e)))?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.config.username, Some(&self.config.password))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = Self::check(request.send().await?).await?;
        let envelope = response
            .json::<DataEnvelope<T>>()
            .await
            .map_err(|e| EgressError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Turn non-success responses into errors
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("Remote API rejected credentials");
            return Err(EgressError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body
                }
            });

        warn!(status = status.as_u16(), %message, "Remote API call failed");
        Err(EgressError::Remote {
            status_code: status.as_u16(),
            message,
        })
    }
}

/// Append a record identifier as one escaped path segment
///
/// `/`, `?` and `#` inside the id are percent-encoded. Dot segments and empty
/// ids are rejected since they would address the parent path instead.
fn push_segment(url: &mut Url, id: &str) -> Result<()> {
    if matches!(id, "" | "." | "..") {
        return Err(EgressError::InvalidId(id.to_string()));
    }
    let url_str = url.to_string();
    url.path_segments_mut()
        .map_err(|_| EgressError::Config(format!("URL '{}' cannot be a base", url_str)))?
        .push(id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = RemoteClient::new(RemoteConfig::new("not a url"));
        assert!(matches!(result, Err(EgressError::Config(_))));
    }

    #[test]
    fn test_url_joins_paths_and_params() {
        let client = RemoteClient::new(RemoteConfig::new("http://api.local/v1/")).unwrap();
        let url = client
            .url("dht-sensors/list", &[("search", "a b".to_string()), ("page", "0".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://api.local/v1/dht-sensors/list?search=a+b&page=0");
    }

    #[test]
    fn test_id_is_a_single_escaped_segment() {
        let client = RemoteClient::new(RemoteConfig::new("http://api.local")).unwrap();
        let mut url = client.url("income/detail", &[]).unwrap();
        push_segment(&mut url, "../../admins/secret?x=1#top").unwrap();
        assert_eq!(
            url.as_str(),
            "http://api.local/income/detail/..%2F..%2Fadmins%2Fsecret%3Fx=1%23top"
        );
    }

    #[test]
    fn test_dot_ids_are_rejected() {
        let client = RemoteClient::new(RemoteConfig::new("http://api.local")).unwrap();
        for id in ["", ".", ".."] {
            let mut url = client.url("income/detail", &[]).unwrap();
            assert!(matches!(push_segment(&mut url, id), Err(EgressError::InvalidId(_))));
        }
    }

    #[test]
    fn test_url_without_params_has_no_query() {
        let client = RemoteClient::new(RemoteConfig::new("http://api.local")).unwrap();
        let url = client.url("reports/list", &[]).unwrap();
        assert_eq!(url.as_str(), "http://api.local/reports/list");
    }

    #[test]
    fn test_config_from_yaml_like_json() {
        let config: RemoteConfig = serde_json::from_str(
            r#"{"base_url":"http://x","username":"u","password":"p","timeout_secs":3}"#,
        )
        .unwrap();
        assert_eq!(config.username, "u");
        assert_eq!(config.client.timeout_secs, 3);
        assert_eq!(config.client.connect_timeout_secs, 10);
    }
}
