use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    guestbook::{FormFields, GuestbookError, GuestbookPost, SheetDump, parse_guestbook},
    records::{
        EntourageMember, GuestRecord, GuestRequest, GuestUpdate, GuestbookMessage,
        PrincipalSponsorPair, RawEntourageMember, RawGuest, RawSponsorPair, validate_rows,
    },
};

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheet rejected request with status {status}")]
    Rejected { status: u16 },

    #[error(transparent)]
    Guestbook(#[from] GuestbookError),
}

/// Where each sheet lives. None of these are implemented here, they are
/// spreadsheet-backed scripts and forms owned by the organizers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub guests: String,
    pub guest_requests: String,
    pub entourage: String,
    pub principal_sponsors: String,
    pub guestbook_read: String,
    pub guestbook_form: String,
    pub guestbook_fields: FormFields,
}

pub struct SheetClient {
    http: Client,
    endpoints: Endpoints,
    token: Option<String>,
}

impl SheetClient {
    pub fn new(endpoints: Endpoints, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            endpoints,
            token,
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.http.request(method, url);

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, RemoteError> {
        let response = builder.send().await?;
        let status = response.status();

        debug!("Sheet responded {status} for {}", response.url());

        if !status.is_success() {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        let response = self.send(self.request(Method::GET, url)).await?;

        Ok(response.json().await?)
    }

    async fn send_json<T: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &T,
    ) -> Result<(), RemoteError> {
        self.send(self.request(method, url).json(body)).await?;

        Ok(())
    }

    pub async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, RemoteError> {
        let rows: Vec<RawGuest> = self.get_json(&self.endpoints.guests).await?;

        Ok(validate_rows(rows))
    }

    pub async fn update_guest(&self, update: &GuestUpdate) -> Result<(), RemoteError> {
        self.send_json(Method::PUT, &self.endpoints.guests, update)
            .await
    }

    pub async fn append_guest_request(&self, request: &GuestRequest) -> Result<(), RemoteError> {
        self.send_json(Method::POST, &self.endpoints.guest_requests, request)
            .await
    }

    pub async fn fetch_entourage(&self) -> Result<Vec<EntourageMember>, RemoteError> {
        let rows: Vec<RawEntourageMember> = self.get_json(&self.endpoints.entourage).await?;

        Ok(validate_rows(rows))
    }

    pub async fn fetch_principal_sponsors(
        &self,
    ) -> Result<Vec<PrincipalSponsorPair>, RemoteError> {
        let rows: Vec<RawSponsorPair> = self.get_json(&self.endpoints.principal_sponsors).await?;

        Ok(validate_rows(rows))
    }

    pub async fn fetch_guestbook(&self) -> Result<Vec<GuestbookMessage>, RemoteError> {
        let dump: SheetDump = self.get_json(&self.endpoints.guestbook_read).await?;

        Ok(parse_guestbook(dump)?)
    }

    /// Form posts are unauthenticated, the form itself is public.
    pub async fn post_guestbook(&self, post: &GuestbookPost) -> Result<(), RemoteError> {
        let body = post.form_body(&self.endpoints.guestbook_fields);
        self.send(self.http.post(&self.endpoints.guestbook_form).form(&body))
            .await?;

        Ok(())
    }
}
