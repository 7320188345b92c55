//! Thin asynchronous client for the flights search API.
//!
//! One request per completed search, no retries. Every failure mode collapses
//! into [`FlightsApiError`]; callers only show a generic message.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;

use crate::domain::offer::FlightOffer;
use crate::domain::search::SearchParams;
use crate::domain::types::TypeConstraintError;
use crate::models::config::ServerConfig;
use crate::models::offer::{FlightSearchRequest, FlightSearchResponse};

const USER_AGENT: &str = concat!("flight-booking/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FlightsApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    #[error("malformed offer: {0}")]
    Decode(#[from] TypeConstraintError),
}

#[derive(Clone)]
pub struct FlightsApiClient {
    http: Client,
    endpoint: Url,
}

impl FlightsApiClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, FlightsApiError> {
        let endpoint = Url::parse(endpoint)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, FlightsApiError> {
        Self::new(
            &config.flights_api_url,
            Duration::from_secs(config.flights_api_timeout_secs),
        )
    }

    /// Fetches the offers matching `params`.
    pub async fn search_offers(
        &self,
        params: &SearchParams,
    ) -> Result<Vec<FlightOffer>, FlightsApiError> {
        let body = FlightSearchRequest::from(params);
        log::debug!("Searching flights: {body:?}");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlightsApiError::Status(status));
        }

        let payload = response.json::<FlightSearchResponse>().await?;
        Ok(payload.into_offers()?)
    }
}
