//! Backend for a wedding invitation site.
//!
//! Sits between the invitation pages and the spreadsheets the couple keeps
//! their guest list, wedding party and guestbook in.
//!
//!
//!
//! # General Infrastructure
//! - Pages talk only to this service, never to the sheets directly
//! - Guest list, entourage and guestbook are cached in memory, sponsors are read through
//! - The sheets stay the source of truth, every write goes to them first
//! - Sheets are eventually consistent, reads are reconciled by a delayed reload
//!
//!
//!
//! # Endpoints
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/guests` | Cached guest list |
//! | PUT | `/api/guests` | RSVP update, `action = "update"` |
//! | GET | `/api/guests/search?q=` | Substring search |
//! | GET | `/api/guests/attending` | Book of Guests and total |
//! | POST | `/api/guest-requests` | Ask to be invited |
//! | GET | `/api/entourage` | Wedding party rows |
//! | GET | `/api/entourage/sections` | Wedding party laid out by role |
//! | POST | `/api/entourage/updated` | Entourage sheet changed, reload shortly |
//! | GET | `/api/principal-sponsor` | Principal sponsor pairs |
//! | GET | `/api/principal-sponsor/rows` | Sponsor pairs as aligned rows |
//! | GET/POST | `/api/messages` | Guestbook |
//! | GET | `/api/countdown` | Time left until the ceremony |
//! | GET | `/api/site` | Public site settings |
//! | GET | `/api/details` | Couple, venues, dress code, gift note, FAQ |
//! | GET | `/api/faq` | FAQ entries |
//! | POST | `/api/refresh` | Reload the guest list now |
//!
//!
//!
//! # Notes
//!
//! ## One Seat Per Name
//! Every invitee is one seat. A Yes is always recorded as `Guest = "1"` and a
//! No as `"0"`, whatever the sheet held. Guests who already answered cannot
//! change their answer here, they contact the organizers.
//!
//! ## Errors
//! Callers only learn that a load or a submit failed. Upstream details go to
//! the log, nothing is retried.
//!
//!
//!
//! # Setup
//!
//! Run with the sheet endpoints set.
//! ```sh
//! SHEET_GUESTS_URL=... SHEET_REQUESTS_URL=... SHEET_ENTOURAGE_URL=... \
//! SHEET_SPONSORS_URL=... GUESTBOOK_READ_URL=... GUESTBOOK_FORM_URL=... \
//! RUST_LOG=info cargo run
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod directory;
pub mod error;
pub mod routes;
pub mod sheet;
pub mod state;
pub mod utils;

#[cfg(test)]
mod fake;

use config::Config;
use routes::{
    attending_handler, countdown_handler, details_handler, entourage_handler,
    entourage_sections_handler, entourage_updated_handler, faq_handler, guest_request_handler,
    guests_handler, messages_handler, post_message_handler, principal_sponsor_handler,
    principal_sponsor_rows_handler, refresh_handler, search_handler, site_handler,
    update_guest_handler,
};
use state::State;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config).await;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let app = app(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutting down...");
    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/guests", get(guests_handler).put(update_guest_handler))
        .route("/api/guests/search", get(search_handler))
        .route("/api/guests/attending", get(attending_handler))
        .route("/api/guest-requests", post(guest_request_handler))
        .route("/api/entourage", get(entourage_handler))
        .route("/api/entourage/sections", get(entourage_sections_handler))
        .route("/api/entourage/updated", post(entourage_updated_handler))
        .route("/api/principal-sponsor", get(principal_sponsor_handler))
        .route("/api/principal-sponsor/rows", get(principal_sponsor_rows_handler))
        .route("/api/messages", get(messages_handler).post(post_message_handler))
        .route("/api/countdown", get(countdown_handler))
        .route("/api/site", get(site_handler))
        .route("/api/details", get(details_handler))
        .route("/api/faq", get(faq_handler))
        .route("/api/refresh", post(refresh_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
