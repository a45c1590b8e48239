use axum::body::Bytes;
use invite::{FormError, GuestRecord, GuestUpdate, Rsvp};
use serde::de::DeserializeOwned;

use crate::error::AppError::{self, MalformedPayload};

pub fn parse_payload<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|_| MalformedPayload)
}

/// Checks an update against the guests listed under its original name.
pub fn check_update(update: &GuestUpdate, listed: &[GuestRecord]) -> Result<(), AppError> {
    match update.rsvp {
        Rsvp::Unanswered => return Err(FormError::MissingAttendance.into()),
        Rsvp::Yes if update.guest != "1" => return Err(MalformedPayload),
        Rsvp::No if update.guest != "0" => return Err(MalformedPayload),
        _ => {}
    }

    if update.name.trim().is_empty() {
        return Err(FormError::MissingName.into());
    }

    if listed.is_empty() {
        return Err(AppError::UnknownGuest(update.original_name.clone()));
    }

    if listed.iter().all(GuestRecord::has_responded) {
        return Err(FormError::AlreadyResponded.into());
    }

    Ok(())
}
