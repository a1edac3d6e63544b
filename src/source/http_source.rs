use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use super::traits::JsonSource;
use crate::config::PanelConfig;
use crate::error::FetchError;

pub struct HttpSource {
    client: Client,
    headers: HashMap<String, String>,
}

impl HttpSource {
    pub fn new(client: Client, headers: HashMap<String, String>) -> Self {
        Self { client, headers }
    }

    /// Build a client from the panel config: user agent plus optional timeout.
    pub fn from_config(config: &PanelConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let mut headers = HashMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        Ok(Self::new(builder.build()?, headers))
    }

    fn build_request(&self, url: &str) -> RequestBuilder {
        let mut req = self.client.get(url);
        for (k, v) in &self.headers {
            req = req.header(k.as_str(), v.as_str());
        }
        req
    }
}

#[async_trait]
impl JsonSource for HttpSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let resp = self.build_request(url).send().await.map_err(|e| {
            warn!("http get transport error url={} err={}", url, e);
            FetchError::from(e)
        })?;

        let status = resp.status();
        debug!("http get status={} url={}", status.as_u16(), url);
        if !status.is_success() {
            warn!("http get failed status={} url={}", status.as_u16(), url);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let value = serde_json::from_slice(&body).map_err(|e| {
            warn!("http get returned invalid json url={} err={}", url, e);
            FetchError::Decode(e)
        })?;
        Ok(value)
    }
}
