//! # Attendance
//!
//! Headcount coercion and the "Book of Guests" roll of confirmed guests.
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::records::{GuestRecord, Rsvp};

static LEADING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+?(\d+)").expect("valid headcount pattern"));

/// Positive headcount from a sheet cell. Empty, non-numeric and zero become 1.
pub fn coerce_headcount(raw: &str) -> u32 {
    LEADING_DIGITS
        .captures(raw)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|count| *count > 0)
        .unwrap_or(1)
}

pub fn total_attending<'a>(guests: impl IntoIterator<Item = &'a GuestRecord>) -> u32 {
    guests
        .into_iter()
        .filter(|guest| guest.rsvp == Rsvp::Yes)
        .map(|guest| guest.headcount)
        .sum()
}

/// Up to two upper-cased initials, `"?"` for an empty name.
pub fn initials(name: &str) -> String {
    let letters: String = name
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .collect();

    if letters.is_empty() {
        "?".to_string()
    } else {
        letters
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendingGuest {
    pub name: String,
    pub initials: String,
    pub headcount: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookOfGuests {
    pub guests: Vec<AttendingGuest>,
    pub total: u32,
}

impl BookOfGuests {
    pub fn from_directory(directory: &[GuestRecord]) -> Self {
        let guests = directory
            .iter()
            .filter(|guest| guest.rsvp == Rsvp::Yes)
            .map(|guest| AttendingGuest {
                name: guest.name.clone(),
                initials: initials(&guest.name),
                headcount: guest.headcount,
                message: guest.message.clone(),
            })
            .collect();

        Self {
            guests,
            total: total_attending(directory),
        }
    }
}
