use std::{
    sync::{
        Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use invite::{
    EntourageMember, GuestRecord, GuestRequest, GuestUpdate, GuestbookMessage,
    PrincipalSponsorPair, Rsvp,
    attendance::coerce_headcount,
    countdown::WEDDING_START,
    guestbook::{FormFields, GuestbookPost},
    records::Email,
    remote::{Endpoints, RemoteError},
    site::SiteContent,
};

use crate::{config::Config, sheet::SheetBackend};

/// Reloads are pushed far out so they never race a test's assertions.
pub fn test_config() -> Config {
    let url = |path: &str| format!("http://sheet.test/{path}");

    Config {
        port: 0,
        endpoints: Endpoints {
            guests: url("guests"),
            guest_requests: url("requests"),
            entourage: url("entourage"),
            principal_sponsors: url("sponsors"),
            guestbook_read: url("guestbook"),
            guestbook_form: url("form"),
            guestbook_fields: FormFields::default(),
        },
        sheet_token: None,
        photo_upload_url: url("photos"),
        wedding_start: WEDDING_START.parse().unwrap(),
        rsvp_deadline: "2026-01-08".parse().unwrap(),
        refresh_delay: Duration::from_secs(3600),
        enable_decor: true,
        site: SiteContent::default(),
    }
}

pub fn guest(name: &str, rsvp: Rsvp, headcount: &str) -> GuestRecord {
    GuestRecord {
        name: name.to_string(),
        email: Email::Pending,
        rsvp,
        headcount: coerce_headcount(headcount),
        message: String::new(),
    }
}

/// In-memory sheet. Writes are recorded, not applied, so tests can tell the
/// write-through cache apart from a reload.
#[derive(Default)]
pub struct FakeSheet {
    pub guests: Mutex<Vec<GuestRecord>>,
    pub entourage: Mutex<Vec<EntourageMember>>,
    pub sponsors: Mutex<Vec<PrincipalSponsorPair>>,
    pub guestbook: Mutex<Vec<GuestbookMessage>>,
    pub updates: Mutex<Vec<GuestUpdate>>,
    pub requests: Mutex<Vec<GuestRequest>>,
    pub posts: Mutex<Vec<GuestbookPost>>,
    guest_fetches: AtomicU64,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeSheet {
    pub fn with_guests(guests: Vec<GuestRecord>) -> Self {
        Self {
            guests: Mutex::new(guests),
            ..Default::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::Relaxed);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    pub fn guest_fetches(&self) -> u64 {
        self.guest_fetches.load(Ordering::Relaxed)
    }

    fn read<T: Clone>(&self, rows: &Mutex<Vec<T>>) -> Result<Vec<T>, RemoteError> {
        if self.fail_reads.load(Ordering::Relaxed) {
            return Err(RemoteError::Rejected { status: 503 });
        }

        Ok(rows.lock().unwrap().clone())
    }

    fn write<T: Clone>(&self, log: &Mutex<Vec<T>>, item: &T) -> Result<(), RemoteError> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(RemoteError::Rejected { status: 500 });
        }

        log.lock().unwrap().push(item.clone());
        Ok(())
    }
}

#[async_trait]
impl SheetBackend for FakeSheet {
    async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, RemoteError> {
        self.guest_fetches.fetch_add(1, Ordering::Relaxed);
        self.read(&self.guests)
    }

    async fn update_guest(&self, update: &GuestUpdate) -> Result<(), RemoteError> {
        self.write(&self.updates, update)
    }

    async fn append_guest_request(&self, request: &GuestRequest) -> Result<(), RemoteError> {
        self.write(&self.requests, request)
    }

    async fn fetch_entourage(&self) -> Result<Vec<EntourageMember>, RemoteError> {
        self.read(&self.entourage)
    }

    async fn fetch_principal_sponsors(&self) -> Result<Vec<PrincipalSponsorPair>, RemoteError> {
        self.read(&self.sponsors)
    }

    async fn fetch_guestbook(&self) -> Result<Vec<GuestbookMessage>, RemoteError> {
        self.read(&self.guestbook)
    }

    async fn post_guestbook(&self, post: &GuestbookPost) -> Result<(), RemoteError> {
        self.write(&self.posts, post)
    }
}
