//! # Guest Search
//!
//! Linear, case-insensitive substring match over the cached directory.
//! Guest lists are tens to low hundreds of names so there is no index.
use serde::Serialize;

use crate::records::GuestRecord;

/// Surrounding spaces only decide blankness, they still take part in the match.
pub fn filter_guests<'a>(guests: &'a [GuestRecord], query: &str) -> Vec<&'a GuestRecord> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let query = query.to_lowercase();

    guests
        .iter()
        .filter(|guest| guest.name.to_lowercase().contains(&query))
        .collect()
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct SearchOutcome<'a> {
    pub query: String,
    pub matches: Vec<&'a GuestRecord>,

    /// Non-blank query with no hit, the caller should offer a guest request.
    pub offer_request: bool,
}

pub fn search<'a>(guests: &'a [GuestRecord], query: &str) -> SearchOutcome<'a> {
    let matches = filter_guests(guests, query);

    SearchOutcome {
        query: query.to_string(),
        offer_request: matches.is_empty() && !query.trim().is_empty(),
        matches,
    }
}

/// Exact (case-insensitive) name wins, otherwise the single substring match.
/// Among guests sharing the exact name the first one still to answer is
/// picked, the same guest an update for that name lands on.
pub fn select_guest<'a>(guests: &'a [GuestRecord], query: &str) -> Selection<'a> {
    let wanted = query.trim().to_lowercase();
    let exact: Vec<&GuestRecord> = guests
        .iter()
        .filter(|guest| !wanted.is_empty() && guest.name.trim().to_lowercase() == wanted)
        .collect();

    if let Some(first) = exact.first() {
        let open = exact.iter().find(|guest| !guest.has_responded());
        return Selection::Found(*open.unwrap_or(first));
    }

    let matches = filter_guests(guests, query);
    match matches.as_slice() {
        [] => Selection::NoMatch,
        [only] => Selection::Found(*only),
        _ => Selection::Ambiguous(matches),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Selection<'a> {
    Found(&'a GuestRecord),
    Ambiguous(Vec<&'a GuestRecord>),
    NoMatch,
}
