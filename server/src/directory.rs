//! # Directory Cache
//!
//! In-memory copy of the guest list, the entourage and the guestbook.
//!
//! ## Invalidation
//! - Loaded once at startup.
//! - `POST /api/refresh` reloads the guest list on demand.
//! - A [`DirectoryEvent`] schedules a reload after a fixed delay, giving the
//!   sheet time to apply the write. 2 seconds after an RSVP or a guestbook
//!   post, 1 second after an entourage change.
//!
//! ## Consistency
//! The sheet is eventually consistent with no stated latency, so the delayed
//! reload alone cannot promise that a reader sees a write. An accepted RSVP is
//! therefore also applied to the cache right away, giving read-your-writes
//! within this process. The delayed reload then replaces the cache with
//! whatever the sheet holds. If the sheet is slower than the delay the reload
//! can briefly bring back the old row, the next reload fixes it.
use std::{sync::Arc, time::Duration};

use invite::{EntourageMember, GuestRecord, GuestUpdate, GuestbookMessage, remote::RemoteError};
use tokio::{
    sync::{
        RwLock,
        broadcast::{Receiver, error::RecvError},
    },
    task::JoinHandle,
    time::sleep,
};
use tracing::{error, info, warn};

use crate::sheet::SheetBackend;

pub const ENTOURAGE_REFRESH_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryEvent {
    RsvpUpdated,
    EntourageUpdated,
    GuestbookUpdated,
}

#[derive(Default)]
pub struct Directory {
    guests: RwLock<Arc<Vec<GuestRecord>>>,
    entourage: RwLock<Arc<Vec<EntourageMember>>>,
    guestbook: RwLock<Arc<Vec<GuestbookMessage>>>,
}

impl Directory {
    pub async fn guests(&self) -> Arc<Vec<GuestRecord>> {
        self.guests.read().await.clone()
    }

    pub async fn entourage(&self) -> Arc<Vec<EntourageMember>> {
        self.entourage.read().await.clone()
    }

    pub async fn guestbook(&self) -> Arc<Vec<GuestbookMessage>> {
        self.guestbook.read().await.clone()
    }

    /// Replaces the guest list. On failure the stale list is kept.
    pub async fn refresh_guests(&self, sheet: &dyn SheetBackend) -> Result<usize, RemoteError> {
        let fresh = sheet.fetch_guests().await?;
        let count = fresh.len();

        *self.guests.write().await = Arc::new(fresh);
        info!("Guest directory refreshed: {count} guests");

        Ok(count)
    }

    pub async fn refresh_entourage(&self, sheet: &dyn SheetBackend) -> Result<usize, RemoteError> {
        let fresh = sheet.fetch_entourage().await?;
        let count = fresh.len();

        *self.entourage.write().await = Arc::new(fresh);
        info!("Entourage refreshed: {count} members");

        Ok(count)
    }

    pub async fn refresh_guestbook(&self, sheet: &dyn SheetBackend) -> Result<usize, RemoteError> {
        let fresh = sheet.fetch_guestbook().await?;
        let count = fresh.len();

        *self.guestbook.write().await = Arc::new(fresh);
        info!("Guestbook refreshed: {count} messages");

        Ok(count)
    }

    /// Every guest listed under `name`. Names are not unique.
    pub async fn find(&self, name: &str) -> Vec<GuestRecord> {
        self.guests
            .read()
            .await
            .iter()
            .filter(|guest| guest.name == name)
            .cloned()
            .collect()
    }

    /// Write-through of an update the sheet accepted. Targets the first
    /// unanswered guest listed under the original name.
    pub async fn apply(&self, update: &GuestUpdate) -> bool {
        let mut cached = self.guests.write().await;
        let guests = Arc::make_mut(&mut *cached);

        match guests
            .iter_mut()
            .find(|guest| guest.name == update.original_name && !guest.has_responded())
        {
            Some(guest) => {
                guest.apply(update);
                true
            }
            None => false,
        }
    }

    async fn reload(&self, sheet: &dyn SheetBackend, event: DirectoryEvent) {
        let result = match event {
            DirectoryEvent::RsvpUpdated => self.refresh_guests(sheet).await,
            DirectoryEvent::EntourageUpdated => self.refresh_entourage(sheet).await,
            DirectoryEvent::GuestbookUpdated => self.refresh_guestbook(sheet).await,
        };

        if let Err(e) = result {
            error!("Reload after {event:?} failed: {e}");
        }
    }
}

/// Listens for directory events until every sender is dropped.
pub fn spawn_refresher(
    directory: Arc<Directory>,
    sheet: Arc<dyn SheetBackend>,
    mut events: Receiver<DirectoryEvent>,
    write_delay: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Refresher lagged behind {skipped} events, reloading guests");
                    DirectoryEvent::RsvpUpdated
                }
                Err(RecvError::Closed) => break,
            };

            let delay = match event {
                DirectoryEvent::EntourageUpdated => ENTOURAGE_REFRESH_DELAY,
                DirectoryEvent::RsvpUpdated | DirectoryEvent::GuestbookUpdated => write_delay,
            };

            let directory = directory.clone();
            let sheet = sheet.clone();

            tokio::spawn(async move {
                sleep(delay).await;
                directory.reload(sheet.as_ref(), event).await;
            });
        }

        info!("Directory refresher stopped");
    })
}
