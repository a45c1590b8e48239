//! # RSVP Form
//!
//! Selecting a guest opens a session pre-filled from their record.
//!
//! - Already answered: read-only summary, there is no path to change the
//!   answer. Guests who need to change it contact the organizers.
//! - Not answered: the form needs a Yes/No choice before anything is sent.
//!   Every invitee is one seat, so the update carries `Guest = "1"` for Yes
//!   and `"0"` for No whatever the sheet held before.
//!
//! Failures are shown as a [`Banner`] that goes away on its own. Nothing is
//! changed locally before the backend accepts the write, so nothing rolls back.
use std::{
    fmt,
    str::FromStr,
    sync::LazyLock,
    time::{Duration, Instant},
};

use regex::Regex;
use thiserror::Error;

use crate::records::{
    Email, GuestRecord, GuestRequest, GuestUpdate, Rsvp, UpdateAction, one_seat,
};

pub const BANNER_TTL: Duration = Duration::from_secs(5);

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Please select if you can attend")]
    MissingAttendance,

    #[error("You have already responded")]
    AlreadyResponded,

    #[error("Name is required")]
    MissingName,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attendance {
    Yes,
    No,
}

impl From<Attendance> for Rsvp {
    fn from(attendance: Attendance) -> Self {
        match attendance {
            Attendance::Yes => Rsvp::Yes,
            Attendance::No => Rsvp::No,
        }
    }
}

impl FromStr for Attendance {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Attendance::Yes),
            "no" | "n" => Ok(Attendance::No),
            other => Err(format!("expected yes or no, got {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    pub name: String,
    pub email: String,
    pub attendance: Option<Attendance>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RsvpSession {
    original: GuestRecord,
    form: RsvpForm,
    has_responded: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RsvpView<'a> {
    Summary(&'a GuestRecord),
    Form(&'a RsvpForm),
}

impl RsvpSession {
    pub fn select(record: &GuestRecord) -> Self {
        let attendance = match record.rsvp {
            Rsvp::Yes => Some(Attendance::Yes),
            Rsvp::No => Some(Attendance::No),
            Rsvp::Unanswered => None,
        };

        Self {
            form: RsvpForm {
                name: record.name.trim().to_string(),
                email: record.email.address().unwrap_or_default().to_string(),
                attendance,
                message: record.message.clone(),
            },
            has_responded: record.has_responded(),
            original: record.clone(),
        }
    }

    pub fn has_responded(&self) -> bool {
        self.has_responded
    }

    pub fn view(&self) -> RsvpView<'_> {
        if self.has_responded {
            RsvpView::Summary(&self.original)
        } else {
            RsvpView::Form(&self.form)
        }
    }

    pub fn form_mut(&mut self) -> Result<&mut RsvpForm, FormError> {
        if self.has_responded {
            return Err(FormError::AlreadyResponded);
        }

        Ok(&mut self.form)
    }

    /// Update payload for the current form, validated before any network call.
    pub fn submission(&self) -> Result<GuestUpdate, FormError> {
        if self.has_responded {
            return Err(FormError::AlreadyResponded);
        }

        let attendance = self.form.attendance.ok_or(FormError::MissingAttendance)?;

        let name = self.form.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let email = validate_email(&self.form.email)?.map_or(Email::Pending, Email::Address);

        Ok(GuestUpdate {
            action: UpdateAction::Update,
            original_name: self.original.name.clone(),
            name: name.to_string(),
            email,
            rsvp: attendance.into(),
            guest: match attendance {
                Attendance::Yes => "1",
                Attendance::No => "0",
            }
            .to_string(),
            message: self.form.message.trim().to_string(),
        })
    }

    /// Locks the session into the summary view once the backend accepted `update`.
    pub fn accepted(&mut self, update: &GuestUpdate) {
        self.original.apply(update);
        self.has_responded = true;
    }
}

fn validate_email(raw: &str) -> Result<Option<String>, FormError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        Ok(None)
    } else if EMAIL.is_match(trimmed) {
        Ok(Some(trimmed.to_string()))
    } else {
        Err(FormError::InvalidEmail)
    }
}

/// Request to be added, for people not on the seeded list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestRequestForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl GuestRequestForm {
    pub fn submission(&self) -> Result<GuestRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        Ok(GuestRequest {
            name: name.to_string(),
            email: validate_email(&self.email)?,
            phone: non_blank(&self.phone),
            guest: one_seat(),
            message: non_blank(&self.message),
        })
    }
}

impl From<GuestRequest> for GuestRequestForm {
    fn from(request: GuestRequest) -> Self {
        Self {
            name: request.name,
            email: request.email.unwrap_or_default(),
            phone: request.phone.unwrap_or_default(),
            message: request.message.unwrap_or_default(),
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
    shown_at: Instant,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(BannerKind::Success, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(BannerKind::Error, text)
    }

    pub fn fetch_failed() -> Self {
        Self::error("Failed to load guest list")
    }

    pub fn rsvp_failed() -> Self {
        Self::error("Failed to submit RSVP. Please try again.")
    }

    pub fn request_failed() -> Self {
        Self::error("Failed to submit request. Please try again.")
    }

    fn new(kind: BannerKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < BANNER_TTL
    }
}

impl From<FormError> for Banner {
    fn from(error: FormError) -> Self {
        Banner::error(error.to_string())
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::error::Error for Banner {}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rsvp: Rsvp, headcount: u32) -> GuestRecord {
        GuestRecord {
            name: "Carmen Pascual".to_string(),
            email: Email::Pending,
            rsvp,
            headcount,
            message: String::new(),
        }
    }

    #[test]
    fn test_unset_attendance_rejected() {
        let session = RsvpSession::select(&record(Rsvp::Unanswered, 1));

        assert!(!session.has_responded());
        assert_eq!(session.submission(), Err(FormError::MissingAttendance));
    }

    #[test]
    fn test_yes_forces_one_seat() {
        let mut session = RsvpSession::select(&record(Rsvp::Unanswered, 6));
        let form = session.form_mut().unwrap();
        form.attendance = Some(Attendance::Yes);
        form.message = "  Can't wait  ".to_string();

        let update = session.submission().unwrap();

        assert_eq!(update.guest, "1");
        assert_eq!(update.rsvp, Rsvp::Yes);
        assert_eq!(update.email, Email::Pending);
        assert_eq!(update.original_name, "Carmen Pascual");
        assert_eq!(update.message, "Can't wait");

        session.accepted(&update);
        let answered = GuestRecord {
            rsvp: Rsvp::Yes,
            headcount: 1,
            message: "Can't wait".to_string(),
            ..record(Rsvp::Yes, 1)
        };
        assert_eq!(session.view(), RsvpView::Summary(&answered));
    }

    #[test]
    fn test_update_keyed_on_sheet_name() {
        let listed = GuestRecord {
            name: "Ann Lim ".to_string(),
            ..record(Rsvp::Unanswered, 1)
        };
        let mut session = RsvpSession::select(&listed);
        session.form_mut().unwrap().attendance = Some(Attendance::No);

        let update = session.submission().unwrap();

        assert_eq!(update.original_name, "Ann Lim ");
        assert_eq!(update.name, "Ann Lim");
    }

    #[test]
    fn test_no_sends_zero_seats() {
        let mut session = RsvpSession::select(&record(Rsvp::Unanswered, 1));
        session.form_mut().unwrap().attendance = Some(Attendance::No);

        assert_eq!(session.submission().unwrap().guest, "0");
    }

    #[test]
    fn test_answered_guest_sees_summary_only() {
        let answered = record(Rsvp::No, 1);
        let mut session = RsvpSession::select(&answered);

        assert!(session.has_responded());
        assert_eq!(session.view(), RsvpView::Summary(&answered));
        assert_eq!(session.form_mut().err(), Some(FormError::AlreadyResponded));
        assert_eq!(session.submission(), Err(FormError::AlreadyResponded));
    }

    #[test]
    fn test_email_validation() {
        let mut session = RsvpSession::select(&record(Rsvp::Unanswered, 1));
        let form = session.form_mut().unwrap();
        form.attendance = Some(Attendance::Yes);
        form.email = "not-an-email".to_string();
        assert_eq!(session.submission(), Err(FormError::InvalidEmail));

        session.form_mut().unwrap().email = " carmen@example.com ".to_string();
        assert_eq!(
            session.submission().unwrap().email,
            Email::Address("carmen@example.com".to_string())
        );
    }

    #[test]
    fn test_guest_request() {
        assert_eq!(
            GuestRequestForm::default().submission(),
            Err(FormError::MissingName)
        );

        let request = GuestRequestForm {
            name: " Jayson Torquiano ".to_string(),
            phone: "0917 000 0000".to_string(),
            ..Default::default()
        }
        .submission()
        .unwrap();

        assert_eq!(request.name, "Jayson Torquiano");
        assert_eq!(request.guest, "1");
        assert_eq!(request.email, None);
        assert_eq!(request.phone.as_deref(), Some("0917 000 0000"));
    }

    #[test]
    fn test_attendance_parse() {
        assert_eq!("YES".parse(), Ok(Attendance::Yes));
        assert_eq!(" n ".parse(), Ok(Attendance::No));
        assert!("maybe".parse::<Attendance>().is_err());
    }

    #[test]
    fn test_banner_dismisses() {
        let banner = Banner::rsvp_failed();
        let shown = Instant::now();

        assert_eq!(banner.kind, BannerKind::Error);
        assert!(banner.is_visible_at(shown));
        assert!(!banner.is_visible_at(shown + BANNER_TTL + Duration::from_millis(1)));
    }
}
