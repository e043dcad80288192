//! Upstream client for the Permit.io REST API

use crate::config::PermitConfig;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::trace;

/// Page requested on list calls
const PAGE: &str = "1";
/// Page size requested on list calls
const PER_PAGE: &str = "100";

/// Read-only operations the gateway relays to Permit.io
///
/// Payloads are returned as raw JSON so they can be relayed without
/// reshaping.
#[async_trait]
pub trait PermitApi: Send + Sync {
    /// List all projects visible to the API key
    async fn list_projects(&self) -> Result<Value>;

    /// List the environments of a project
    async fn list_environments(&self, project_key: &str) -> Result<Value>;

    /// List the resources of the configured environment
    async fn list_resources(&self) -> Result<Value>;
}

/// reqwest-backed [`PermitApi`] implementation
#[derive(Debug, Clone)]
pub struct PermitClient {
    config: PermitConfig,
    http: reqwest::Client,
}

impl PermitClient {
    /// Create a client with a default HTTP client
    pub fn new(config: PermitConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("permit-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Create a client with a custom HTTP client
    pub fn with_http_client(config: PermitConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &PermitConfig {
        &self.config
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url)
            .map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", self.config.api_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(self.config.api_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get_json(&self, url: Url, query: &[(&str, &str)]) -> Result<Value> {
        let credentials = self.config.require()?;

        trace!(url = %url, "Calling Permit.io");

        let response = self
            .http
            .get(url)
            .bearer_auth(credentials.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PermitApi for PermitClient {
    async fn list_projects(&self) -> Result<Value> {
        let url = self.endpoint(&["v2", "projects"])?;
        self.get_json(url, &[("page", PAGE), ("per_page", PER_PAGE)])
            .await
    }

    async fn list_environments(&self, project_key: &str) -> Result<Value> {
        let url = self.endpoint(&["v2", "projects", project_key, "envs"])?;
        self.get_json(url, &[("page", PAGE), ("per_page", PER_PAGE)])
            .await
    }

    async fn list_resources(&self) -> Result<Value> {
        let credentials = self.config.require()?;
        let url = self.endpoint(&[
            "v2",
            "schema",
            credentials.project_id,
            credentials.environment_id,
            "resources",
        ])?;
        self.get_json(
            url,
            &[
                ("page", PAGE),
                ("per_page", PER_PAGE),
                ("include_built_in", "false"),
            ],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> PermitClient {
        let config = PermitConfig::new("permit_key_test", "dev", "default").with_api_url(server.uri());
        PermitClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_list_projects_relays_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/projects"))
            .and(header("authorization", "Bearer permit_key_test"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "100"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": "p1", "name": "demo"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let projects = client_for(&server).list_projects().await.unwrap();
        assert_eq!(projects, json!([{"id": "p1", "name": "demo"}]));
    }

    #[tokio::test]
    async fn test_list_environments_uses_project_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/projects/default/envs"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"key": "dev"}, {"key": "prod"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let envs = client_for(&server)
            .list_environments("default")
            .await
            .unwrap();
        assert_eq!(envs.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_list_resources_scoped_to_environment() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/schema/default/dev/resources"))
            .and(query_param("include_built_in", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"key": "document"}])))
            .expect(1)
            .mount(&server)
            .await;

        let resources = client_for(&server).list_resources().await.unwrap();
        assert_eq!(resources, json!([{"key": "document"}]));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/projects"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_projects().await.unwrap_err();
        match err {
            GatewayError::UpstreamStatus { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v2/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_projects().await.unwrap_err();
        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn test_incomplete_config_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let config = PermitConfig::from_lookup(|_| None).with_api_url(server.uri());
        let client = PermitClient::new(config).unwrap();

        assert!(matches!(
            client.list_resources().await,
            Err(GatewayError::IncompleteConfig { .. })
        ));
        assert!(matches!(
            client.list_projects().await,
            Err(GatewayError::IncompleteConfig { .. })
        ));
    }

    #[tokio::test]
    async fn test_connection_failure_is_http_error() {
        // Port 9 (discard) is not expected to accept HTTP connections
        let config = PermitConfig::new("k", "dev", "default").with_api_url("http://127.0.0.1:9");
        let client = PermitClient::new(config).unwrap();

        let err = client.list_projects().await.unwrap_err();
        assert!(matches!(err, GatewayError::Http(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = PermitConfig::new("k", "dev", "default").with_api_url("not a url");
        let client = PermitClient::new(config).unwrap();

        assert!(matches!(
            client.endpoint(&["v2", "projects"]),
            Err(GatewayError::InvalidUrl(_))
        ));
    }
}
