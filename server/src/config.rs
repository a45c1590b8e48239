use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use invite::{
    countdown::WEDDING_START,
    guestbook::{FormFields, MESSAGE_ENTRY, NAME_ENTRY},
    remote::Endpoints,
    site::SiteContent,
};
use tracing::{info, warn};

const PHOTO_UPLOAD_URL: &str =
    "https://drive.google.com/drive/folders/18KE9csAk4bKDT1up17KWcB8exLOey3Mb?usp=drive_link";

pub struct Config {
    pub port: u16,
    pub endpoints: Endpoints,
    pub sheet_token: Option<String>,
    pub photo_upload_url: String,
    pub wedding_start: DateTime<Utc>,
    pub rsvp_deadline: NaiveDate,
    pub refresh_delay: Duration,
    pub enable_decor: bool,
    pub site: SiteContent,
}

impl Config {
    pub fn load() -> Result<Self> {
        let endpoints = Endpoints {
            guests: require("SHEET_GUESTS_URL")?,
            guest_requests: require("SHEET_REQUESTS_URL")?,
            entourage: require("SHEET_ENTOURAGE_URL")?,
            principal_sponsors: require("SHEET_SPONSORS_URL")?,
            guestbook_read: require("GUESTBOOK_READ_URL")?,
            guestbook_form: require("GUESTBOOK_FORM_URL")?,
            guestbook_fields: FormFields {
                name: try_load("GUESTBOOK_NAME_ENTRY", NAME_ENTRY)?,
                message: try_load("GUESTBOOK_MESSAGE_ENTRY", MESSAGE_ENTRY)?,
            },
        };

        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            endpoints,
            sheet_token: read_secret("SHEET_TOKEN"),
            photo_upload_url: try_load("PHOTO_UPLOAD_URL", PHOTO_UPLOAD_URL)?,
            wedding_start: try_load("WEDDING_START", WEDDING_START)?,
            rsvp_deadline: try_load("RSVP_DEADLINE", "2026-01-08")?,
            refresh_delay: Duration::from_millis(try_load("REFRESH_DELAY_MS", "2000")?),
            enable_decor: decor_enabled(var("NEXT_PUBLIC_ENABLE_DECOR").ok().as_deref()),
            site: load_site(var("SITE_CONTENT_PATH").ok().as_deref())?,
        })
    }
}

/// Decor is on unless explicitly turned off.
pub fn decor_enabled(raw: Option<&str>) -> bool {
    raw.is_none_or(|value| value.trim() != "false")
}

/// Event details from a JSON file, or the built-in ones when no file is set.
pub fn load_site(path: Option<&str>) -> Result<SiteContent> {
    let Some(path) = path else {
        return Ok(SiteContent::default());
    };

    let raw = read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let site: SiteContent =
        serde_json::from_str(&raw).with_context(|| format!("Invalid site content in {path}"))?;
    info!("Site content loaded from {path}");

    Ok(site)
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn require(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Environment variable {key} is required"))
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}

fn read_secret(secret_name: &str) -> Option<String> {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            info!("No {secret_name} secret at {path}: {e}");
        })
        .ok()
        .filter(|secret| !secret.is_empty())
}
