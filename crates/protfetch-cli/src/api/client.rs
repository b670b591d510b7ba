//! HTTP client shared by every upstream call
//!
//! Wraps one `reqwest::Client` carrying the contact user agent, the request
//! timeout and an `Accept: application/json` header.

use crate::config::{Config, ServiceUrls};
use crate::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Key/value pairs sent as a query string or a form body
pub type Params<'a> = [(&'a str, String)];

/// API client for the upstream services
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    urls: ServiceUrls,
    user_agent: String,
}

impl ApiClient {
    /// Create a client from the run configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = config.user_agent();
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            urls: config.urls.clone(),
            user_agent,
        })
    }

    pub fn urls(&self) -> &ServiceUrls {
        &self.urls
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// GET `url` with query parameters and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &Params<'_>) -> Result<T> {
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// POST `form` as `application/x-www-form-urlencoded` and decode the JSON body
    pub async fn post_form<T: DeserializeOwned>(&self, url: &str, form: &Params<'_>) -> Result<T> {
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let mut config = Config::default();
        config.contact_email = "lab@example.org".to_string();

        let client = ApiClient::new(&config).unwrap();
        assert!(client.user_agent().contains("mailto:lab@example.org"));
        assert_eq!(client.urls(), &config.urls);
    }

    #[test]
    fn test_api_client_rejects_invalid_config() {
        let mut config = Config::default();
        config.contact_email = String::new();
        assert!(ApiClient::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_get_json_unreachable_is_error() {
        let mut config = Config::default();
        config.timeout_secs = 2;
        let client = ApiClient::new(&config).unwrap();

        let result: Result<serde_json::Value> =
            client.get_json("http://127.0.0.1:9/unreachable", &[]).await;
        assert!(result.is_err());
    }
}
