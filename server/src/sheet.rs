//! # Sheet Backend
//!
//! The external spreadsheet store as seen by the server. It is the source of
//! truth for every record; this service only caches and validates.
use async_trait::async_trait;
use invite::{
    EntourageMember, GuestRecord, GuestRequest, GuestUpdate, GuestbookMessage,
    PrincipalSponsorPair,
    guestbook::GuestbookPost,
    remote::{RemoteError, SheetClient},
};

#[async_trait]
pub trait SheetBackend: Send + Sync + 'static {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, RemoteError>;
    async fn update_guest(&self, update: &GuestUpdate) -> Result<(), RemoteError>;
    async fn append_guest_request(&self, request: &GuestRequest) -> Result<(), RemoteError>;
    async fn fetch_entourage(&self) -> Result<Vec<EntourageMember>, RemoteError>;
    async fn fetch_principal_sponsors(&self) -> Result<Vec<PrincipalSponsorPair>, RemoteError>;
    async fn fetch_guestbook(&self) -> Result<Vec<GuestbookMessage>, RemoteError>;
    async fn post_guestbook(&self, post: &GuestbookPost) -> Result<(), RemoteError>;
}

#[async_trait]
impl SheetBackend for SheetClient {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, RemoteError> {
        SheetClient::fetch_guests(self).await
    }

    async fn update_guest(&self, update: &GuestUpdate) -> Result<(), RemoteError> {
        SheetClient::update_guest(self, update).await
    }

    async fn append_guest_request(&self, request: &GuestRequest) -> Result<(), RemoteError> {
        SheetClient::append_guest_request(self, request).await
    }

    async fn fetch_entourage(&self) -> Result<Vec<EntourageMember>, RemoteError> {
        SheetClient::fetch_entourage(self).await
    }

    async fn fetch_principal_sponsors(&self) -> Result<Vec<PrincipalSponsorPair>, RemoteError> {
        SheetClient::fetch_principal_sponsors(self).await
    }

    async fn fetch_guestbook(&self) -> Result<Vec<GuestbookMessage>, RemoteError> {
        SheetClient::fetch_guestbook(self).await
    }

    async fn post_guestbook(&self, post: &GuestbookPost) -> Result<(), RemoteError> {
        SheetClient::post_guestbook(self, post).await
    }
}
