//! # Invite
//!
//! Guest directory, RSVP and wedding-party roster for an invitation site.
//!
//! Everything here is plain data and pure logic shared by the server and the
//! command-line client, plus the client for the spreadsheet-backed store
//! that owns the data.
//!
//! ## Data Flow
//! - The guest list is pre-seeded in a sheet. It is fetched whole, there is no
//!   pagination or incremental sync. Lists are tens to low hundreds of rows.
//! - Search is a linear substring match over the fetched list.
//! - An RSVP is a partial update keyed on the name the guest was found under.
//!   The sheet is the source of truth and is eventually consistent.
//! - People not on the list file a guest request instead, a separate sheet.
pub mod attendance;
pub mod countdown;
pub mod entourage;
pub mod guestbook;
pub mod records;
pub mod remote;
pub mod rsvp;
pub mod search;
pub mod site;

pub use records::{
    Email, EntourageMember, GuestRecord, GuestRequest, GuestUpdate, GuestbookMessage,
    PrincipalSponsorPair, RowError, Rsvp,
};
pub use rsvp::FormError;
