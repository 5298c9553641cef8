//! Blocking HTTP client for the loopback uploader
//!
//! A thin wrapper over reqwest's blocking client with fixed connect and
//! read timeouts. Success is strictly HTTP 200; any other status, any
//! connection error, and any timeout surface as an [`ApiError`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::api::traits::TreatmentSource;
use crate::config::ApiConfig;
use crate::domain::WINDOW_CAP;
use crate::error::ApiError;

/// HTTP implementation of [`TreatmentSource`]
#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    treatments_url: String,
    iob_url: String,
}

impl HttpSource {
    /// Build a client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .build()?;

        let base = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            treatments_url: format!("{}/treatments.json?count={}", base, WINDOW_CAP),
            iob_url: format!("{}/pebble", base),
        })
    }

    /// The treatments endpoint URL this client targets
    pub fn treatments_url(&self) -> &str {
        &self.treatments_url
    }

    /// The IOB endpoint URL this client targets
    pub fn iob_url(&self) -> &str {
        &self.iob_url
    }

    fn fetch(&self, url: &str) -> Result<String, ApiError> {
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| ApiError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|source| ApiError::Body {
            url: url.to_string(),
            source,
        })
    }
}

impl TreatmentSource for HttpSource {
    fn fetch_treatments(&self) -> Result<String, ApiError> {
        self.fetch(&self.treatments_url)
    }

    fn fetch_iob(&self) -> Result<String, ApiError> {
        self.fetch(&self.iob_url)
    }
}
