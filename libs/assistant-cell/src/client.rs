use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use appointment_cell::models::BookingRequest;
use doctor_cell::models::AvailabilityResponse;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: StatusCode, body: String },
}

/// The clinic backend as seen by the assistant.
#[async_trait]
pub trait ClinicApi: Send + Sync {
    async fn knowledge(&self) -> Result<Map<String, Value>, ClientError>;

    async fn available_slots(&self, day: &str) -> Result<AvailabilityResponse, ClientError>;

    /// `Ok(false)` when the backend answered but did not record the booking.
    async fn book(&self, booking: &BookingRequest) -> Result<bool, ClientError>;
}

pub struct HttpClinicClient {
    client: Client,
    base_url: String,
}

impl HttpClinicClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await?;
        error!("API error ({}): {}", status, body);
        Err(ClientError::Status { status, body })
    }
}

#[async_trait]
impl ClinicApi for HttpClinicClient {
    async fn knowledge(&self) -> Result<Map<String, Value>, ClientError> {
        let url = format!("{}/knowledge", self.base_url);
        debug!("Making request to {}", url);

        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        match response.json::<Value>().await? {
            Value::Object(knowledge) => Ok(knowledge),
            _ => {
                debug!("Knowledge document is not an object, no entries to answer from");
                Ok(Map::new())
            }
        }
    }

    async fn available_slots(&self, day: &str) -> Result<AvailabilityResponse, ClientError> {
        let url = format!("{}/get_slots", self.base_url);
        debug!("Making request to {} for {}", url, day);

        let response = self.client.get(&url).query(&[("day", day)]).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn book(&self, booking: &BookingRequest) -> Result<bool, ClientError> {
        let url = format!("{}/log_booking", self.base_url);
        debug!("Making request to {}", url);

        let response = self.client.post(&url).json(booking).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Booking rejected ({}): {}", status, body);
        }

        Ok(status.is_success())
    }
}
