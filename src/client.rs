use crate::args::Username;
use crate::error::ExportError;
use crate::request::{BASE_URL, DateRange, RequestSpec};
use chrono::NaiveDate;
use log::{debug, info};
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
    base_url: String,
}

impl Client {
    /// Create a new client with the default base URL and timeout.
    pub fn new() -> Result<Self, ExportError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ExportError> {
        let http = HttpClient::builder().timeout(timeout).build()?;

        info!("Initialized Basis API client with timeout {:?}", timeout);
        Ok(Self {
            http,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for tests or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        info!("Updated Basis API base URL to {}", self.base_url);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Assemble the chart request for `username` on `date` (yesterday if `None`).
    pub fn request_for(
        &self,
        username: &Username,
        date: Option<NaiveDate>,
    ) -> Result<RequestSpec, ExportError> {
        let range = DateRange::for_date(date)?;
        Ok(RequestSpec::build(&self.base_url, username, range))
    }

    /// Fetch one day of chart data for `username`.
    pub async fn export(
        &self,
        username: &Username,
        date: Option<NaiveDate>,
    ) -> Result<Value, ExportError> {
        let spec = self.request_for(username, date)?;
        self.send(&spec).await
    }

    /// Perform the GET described by `spec` and parse the JSON body.
    pub async fn send(&self, spec: &RequestSpec) -> Result<Value, ExportError> {
        let url = spec.url()?;
        debug!("GET request to {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        debug!("Received status {}", status);
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(ExportError::Status { status, body });
        }
        serde_json::from_str(&body).map_err(ExportError::from)
    }
}
