use async_trait::async_trait;
use invite::{
    GuestRecord, GuestRequest, GuestUpdate,
    records::{RawGuest, validate_rows},
};
use reqwest::{Client, Response};
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:1111";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// The invitation backend, as the RSVP pages use it.
#[async_trait]
pub trait GuestApi: Send + Sync {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, ApiError>;
    async fn submit_rsvp(&self, update: &GuestUpdate) -> Result<(), ApiError>;
    async fn request_invite(&self, request: &GuestRequest) -> Result<(), ApiError>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    Err(ApiError::Status {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

#[async_trait]
impl GuestApi for HttpApi {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, ApiError> {
        let response = check(self.client.get(self.url("/api/guests")).send().await?).await?;
        let rows: Vec<RawGuest> = response.json().await?;

        Ok(validate_rows(rows))
    }

    async fn submit_rsvp(&self, update: &GuestUpdate) -> Result<(), ApiError> {
        let request = self.client.put(self.url("/api/guests")).json(update);
        check(request.send().await?).await?;

        Ok(())
    }

    async fn request_invite(&self, request: &GuestRequest) -> Result<(), ApiError> {
        let request = self.client.post(self.url("/api/guest-requests")).json(request);
        check(request.send().await?).await?;

        Ok(())
    }
}
