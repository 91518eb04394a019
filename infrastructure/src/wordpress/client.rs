//! Thin JSON client for the `wp/v2` REST namespace

use reqwest::Method;
use serde_json::Value;
use wpmcp_domain::Site;

use super::error::{WpApiError, WpErrorBody};
use crate::config::FileHttpConfig;

/// Shared REST client.
///
/// Holds one connection pool for every site; the site (base URL and
/// credentials) is passed per request. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct WpRestClient {
    http: reqwest::Client,
}

impl WpRestClient {
    pub fn new(config: &FileHttpConfig) -> Result<Self, WpApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(WpApiError::Client)?;
        Ok(Self { http })
    }

    /// `{apiUrl}/wp/v2/{path}`
    pub fn endpoint(site: &Site, path: &str) -> String {
        format!(
            "{}/wp/v2/{}",
            site.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get(&self, site: &Site, path: &str, action: &str) -> Result<Value, WpApiError> {
        self.send(site, Method::GET, path, &[], None, action).await
    }

    pub async fn get_with_query(
        &self,
        site: &Site,
        path: &str,
        query: &[(&str, String)],
        action: &str,
    ) -> Result<Value, WpApiError> {
        self.send(site, Method::GET, path, query, None, action).await
    }

    pub async fn post(
        &self,
        site: &Site,
        path: &str,
        body: &Value,
        action: &str,
    ) -> Result<Value, WpApiError> {
        self.send(site, Method::POST, path, &[], Some(body), action)
            .await
    }

    pub async fn put(
        &self,
        site: &Site,
        path: &str,
        body: &Value,
        action: &str,
    ) -> Result<Value, WpApiError> {
        self.send(site, Method::PUT, path, &[], Some(body), action)
            .await
    }

    pub async fn delete(
        &self,
        site: &Site,
        path: &str,
        query: &[(&str, String)],
        action: &str,
    ) -> Result<Value, WpApiError> {
        self.send(site, Method::DELETE, path, query, None, action)
            .await
    }

    async fn send(
        &self,
        site: &Site,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        action: &str,
    ) -> Result<Value, WpApiError> {
        let mut builder = self.http.request(method.clone(), Self::endpoint(site, path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(credentials) = &site.api_credentials {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let request = builder.build().map_err(|source| WpApiError::InvalidRequest {
            action: action.to_string(),
            source,
        })?;
        let url = request.url().to_string();
        tracing::debug!(%method, %url, "WordPress REST request");

        let transport = |source| WpApiError::Transport {
            action: action.to_string(),
            url: url.clone(),
            source,
        };
        let response = self.http.execute(request).await.map_err(transport)?;
        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let body: WpErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
            tracing::debug!(status = status.as_u16(), %url, "WordPress REST error: {}", message);
            return Err(WpApiError::Status {
                action: action.to_string(),
                status: status.as_u16(),
                code: body.code,
                message,
                url,
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| WpApiError::Decode {
            action: action.to_string(),
            url,
            source,
        })
    }
}
