// src/fetch/mod.rs

use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::error::{CensusError, Result};

pub mod groups;
pub mod places;

pub use places::parse_table;

/// Client for the census data API. Holds the access key and the dataset coordinates.
#[derive(Debug, Clone)]
pub struct CensusClient {
    http: Client,
    key: Option<String>,
    config: ApiConfig,
}

impl CensusClient {
    /// Build a client; the configured timeout bounds every request.
    pub fn new(key: impl Into<String>, config: ApiConfig) -> Result<Self> {
        Self::build(Some(key.into()), config)
    }

    /// A client without a key. Only keyless endpoints such as `groups.json` work.
    pub fn anonymous(config: ApiConfig) -> Result<Self> {
        Self::build(None, config)
    }

    fn build(key: Option<String>, config: ApiConfig) -> Result<Self> {
        // fail on a bad host now rather than at the first query
        config.dataset_url()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(reqwest::Error::without_url)?;
        Ok(Self { http, key, config })
    }

    fn key(&self) -> Result<&str> {
        self.key
            .as_deref()
            .ok_or_else(|| CensusError::Config("this request needs an API key".to_string()))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET `url` and return the body, failing with `Api` on anything but 200.
    /// Transport errors drop their URL, which may carry the key.
    async fn get_text(&self, url: Url) -> Result<String> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = resp.status();
        let body = resp.text().await.map_err(reqwest::Error::without_url)?;
        debug!(%status, bytes = body.len(), "response");
        if status != StatusCode::OK {
            return Err(CensusError::Api { status, body });
        }
        Ok(body)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use axum::Router;
    use tokio::net::TcpListener;

    use crate::config::ApiConfig;

    /// Serve `app` on an ephemeral port; returns an ApiConfig pointing at it.
    pub(crate) async fn serve(app: Router) -> ApiConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiConfig {
            host: format!("http://{}", addr),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }

    /// An address nothing listens on.
    pub(crate) async fn closed_port() -> ApiConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        ApiConfig {
            host: format!("http://{}", addr),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }
}
