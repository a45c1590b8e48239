use std::sync::Arc;

use invite::{countdown::Countdown, remote::SheetClient};
use tokio::sync::broadcast::{self, Sender};
use tracing::warn;

use super::{
    config::Config,
    directory::{Directory, DirectoryEvent, spawn_refresher},
    sheet::SheetBackend,
};

const EVENT_CAPACITY: usize = 64;

pub struct State {
    pub config: Config,
    pub sheet: Arc<dyn SheetBackend>,
    pub directory: Arc<Directory>,
    pub events: Sender<DirectoryEvent>,
    pub countdown: Countdown,
}

impl State {
    pub async fn new(config: Config) -> Arc<Self> {
        let sheet = SheetClient::new(config.endpoints.clone(), config.sheet_token.clone());

        Self::with_backend(config, Arc::new(sheet)).await
    }

    /// Builds the state around any backend and does the startup load. A
    /// failed load leaves the cache empty until the next refresh.
    pub async fn with_backend(config: Config, sheet: Arc<dyn SheetBackend>) -> Arc<Self> {
        let directory = Arc::new(Directory::default());

        if let Err(e) = directory.refresh_guests(sheet.as_ref()).await {
            warn!("Initial guest load failed: {e}");
        }
        if let Err(e) = directory.refresh_entourage(sheet.as_ref()).await {
            warn!("Initial entourage load failed: {e}");
        }
        if let Err(e) = directory.refresh_guestbook(sheet.as_ref()).await {
            warn!("Initial guestbook load failed: {e}");
        }

        let (events, receiver) = broadcast::channel(EVENT_CAPACITY);
        spawn_refresher(
            directory.clone(),
            sheet.clone(),
            receiver,
            config.refresh_delay,
        );

        Arc::new(Self {
            countdown: Countdown::new(config.wedding_start),
            config,
            sheet,
            directory,
            events,
        })
    }

    pub fn notify(&self, event: DirectoryEvent) {
        if self.events.send(event).is_err() {
            warn!("No refresher listening for {event:?}");
        }
    }
}
