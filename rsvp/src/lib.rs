//! # RSVP Client
//!
//! The invitation's RSVP flow from a terminal.
//!
//! 1. Fetch the whole guest list once.
//! 2. Match the typed name against it, case-insensitive substring.
//! 3. A guest who already answered gets a read-only summary.
//! 4. Otherwise the answer is validated locally, then sent as one update.
//! 5. Names not on the list can file a guest request instead.
//!
//! Failures surface as the same short banners the pages show. Details go to
//! the log (`RUST_LOG=debug`).
use anyhow::{Result, bail};
use invite::{
    GuestRecord, GuestUpdate,
    attendance::BookOfGuests,
    rsvp::{Attendance, Banner, GuestRequestForm, RsvpSession},
    search::{SearchOutcome, Selection, search, select_guest},
};
use tracing::error;

pub mod api;
pub mod utils;

use api::GuestApi;
use utils::spinner;

#[derive(Debug, Default, Clone)]
pub struct RespondArgs {
    pub name: String,
    pub attend: Option<Attendance>,
    pub email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum RespondOutcome {
    AlreadyResponded(GuestRecord),
    Submitted(GuestUpdate),
}

pub async fn load_guests(api: &impl GuestApi) -> Result<Vec<GuestRecord>> {
    let pb = spinner("Loading guest list");
    let result = api.fetch_guests().await;
    pb.finish_and_clear();

    result.map_err(|e| {
        error!("Fetching guests failed: {e}");
        Banner::fetch_failed().into()
    })
}

pub async fn find(api: &impl GuestApi, query: &str) -> Result<(Vec<GuestRecord>, bool)> {
    let guests = load_guests(api).await?;
    let SearchOutcome {
        matches,
        offer_request,
        ..
    } = search(&guests, query);

    Ok((matches.into_iter().cloned().collect(), offer_request))
}

pub async fn respond(api: &impl GuestApi, args: RespondArgs) -> Result<RespondOutcome> {
    let guests = load_guests(api).await?;

    let record = match select_guest(&guests, &args.name) {
        Selection::Found(record) => record,
        Selection::NoMatch => bail!(
            "No guest named {:?}. Use `rsvp request` to ask for an invitation.",
            args.name
        ),
        Selection::Ambiguous(found) => {
            let names: Vec<&str> = found.iter().map(|guest| guest.name.as_str()).collect();
            bail!("{:?} matches {}, be more specific", args.name, names.join(", "))
        }
    };

    let mut session = RsvpSession::select(record);
    if session.has_responded() {
        return Ok(RespondOutcome::AlreadyResponded(record.clone()));
    }

    let form = session.form_mut()?;
    form.attendance = args.attend;
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(message) = args.message {
        form.message = message;
    }

    let update = session.submission()?;

    let pb = spinner("Sending RSVP");
    let sent = api.submit_rsvp(&update).await;
    pb.finish_and_clear();

    if let Err(e) = sent {
        error!("Submitting RSVP for {} failed: {e}", update.original_name);
        return Err(Banner::rsvp_failed().into());
    }

    session.accepted(&update);
    Ok(RespondOutcome::Submitted(update))
}

pub async fn request(api: &impl GuestApi, form: GuestRequestForm) -> Result<()> {
    let request = form.submission()?;

    let pb = spinner("Sending request");
    let sent = api.request_invite(&request).await;
    pb.finish_and_clear();

    sent.map_err(|e| {
        error!("Guest request for {} failed: {e}", request.name);
        Banner::request_failed().into()
    })
}

pub async fn attending(api: &impl GuestApi) -> Result<BookOfGuests> {
    let guests = load_guests(api).await?;

    Ok(BookOfGuests::from_directory(&guests))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use invite::{Email, FormError, GuestRequest, Rsvp, attendance::coerce_headcount};

    use super::*;
    use crate::api::ApiError;

    #[derive(Default)]
    struct FakeApi {
        guests: Vec<GuestRecord>,
        sent: Mutex<Vec<GuestUpdate>>,
        requests: Mutex<Vec<GuestRequest>>,
        reject: bool,
    }

    #[async_trait]
    impl GuestApi for FakeApi {
        async fn fetch_guests(&self) -> Result<Vec<GuestRecord>, ApiError> {
            Ok(self.guests.clone())
        }

        async fn submit_rsvp(&self, update: &GuestUpdate) -> Result<(), ApiError> {
            if self.reject {
                return Err(ApiError::Status {
                    status: 502,
                    body: "sheet down".to_string(),
                });
            }

            self.sent.lock().unwrap().push(update.clone());
            Ok(())
        }

        async fn request_invite(&self, request: &GuestRequest) -> Result<(), ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn guest(name: &str, rsvp: Rsvp, headcount: &str) -> GuestRecord {
        GuestRecord {
            name: name.to_string(),
            email: Email::Pending,
            rsvp,
            headcount: coerce_headcount(headcount),
            message: String::new(),
        }
    }

    fn api() -> FakeApi {
        FakeApi {
            guests: vec![
                guest("Anna Cruz", Rsvp::Unanswered, "4"),
                guest("Juan Reyes", Rsvp::No, "0"),
                guest("Ann Lim", Rsvp::Yes, "1"),
            ],
            ..Default::default()
        }
    }

    fn args(name: &str, attend: Option<Attendance>) -> RespondArgs {
        RespondArgs {
            name: name.to_string(),
            attend,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_attendance_sends_nothing() {
        let api = api();

        let error = respond(&api, args("anna", None)).await.unwrap_err();

        assert_eq!(
            error.downcast_ref::<FormError>(),
            Some(&FormError::MissingAttendance)
        );
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_yes_is_one_seat() {
        let api = api();

        let outcome = respond(&api, args("anna cruz", Some(Attendance::Yes)))
            .await
            .unwrap();

        let RespondOutcome::Submitted(update) = outcome else {
            panic!("expected a submission");
        };
        assert_eq!(update.guest, "1");
        assert_eq!(update.original_name, "Anna Cruz");
        assert_eq!(api.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_answered_guest_gets_summary() {
        let api = api();

        let outcome = respond(&api, args("Juan", Some(Attendance::Yes)))
            .await
            .unwrap();

        assert!(matches!(outcome, RespondOutcome::AlreadyResponded(g) if g.rsvp == Rsvp::No));
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_namesake_still_to_answer_can_respond() {
        let api = FakeApi {
            guests: vec![
                guest("Ann Lim", Rsvp::No, "1"),
                guest("Ann Lim", Rsvp::Unanswered, "1"),
            ],
            ..Default::default()
        };

        let outcome = respond(&api, args("Ann Lim", Some(Attendance::Yes)))
            .await
            .unwrap();

        assert!(matches!(outcome, RespondOutcome::Submitted(_)));
        assert_eq!(api.sent.lock().unwrap()[0].original_name, "Ann Lim");
    }

    #[tokio::test]
    async fn test_selection_errors() {
        let api = api();

        assert!(respond(&api, args("zed", Some(Attendance::No))).await.is_err());
        assert!(respond(&api, args("an", Some(Attendance::No))).await.is_err());
        assert!(api.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submit_is_generic_banner() {
        let api = FakeApi {
            reject: true,
            ..api()
        };

        let error = respond(&api, args("Anna Cruz", Some(Attendance::No)))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), Banner::rsvp_failed().text);
    }

    #[tokio::test]
    async fn test_find_and_request() {
        let api = api();

        let (matches, offer) = find(&api, "AN").await.unwrap();
        assert_eq!(matches.len(), 3);
        assert!(!offer);

        let (matches, offer) = find(&api, "Myric").await.unwrap();
        assert!(matches.is_empty());
        assert!(offer);

        request(
            &api,
            GuestRequestForm {
                name: "Myric Mateo".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(api.requests.lock().unwrap()[0].guest, "1");

        assert!(request(&api, GuestRequestForm::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_attending_total() {
        let book = attending(&api()).await.unwrap();

        assert_eq!(book.total, 1);
        assert_eq!(book.guests[0].name, "Ann Lim");
    }
}
