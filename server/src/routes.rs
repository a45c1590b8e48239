use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{self, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, NaiveDate, Utc};
use invite::{
    GuestRequest, GuestUpdate,
    attendance::BookOfGuests,
    countdown::TimeLeft,
    entourage::{layout_sections, sponsor_rows},
    guestbook::GuestbookPost,
    rsvp::GuestRequestForm,
    search::search,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    directory::DirectoryEvent,
    error::AppError,
    state::State,
    utils::{check_update, parse_payload},
};

type Shared = extract::State<Arc<State>>;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct CountdownResponse {
    target: DateTime<Utc>,

    #[serde(flatten)]
    left: TimeLeft,
}

#[derive(Serialize)]
struct SiteInfo<'a> {
    enable_decor: bool,
    photo_upload_url: &'a str,
    wedding_start: DateTime<Utc>,
    rsvp_deadline: NaiveDate,
}

pub async fn guests_handler(extract::State(state): Shared) -> Response {
    let guests = state.directory.guests().await;

    Json(guests.as_slice()).into_response()
}

pub async fn update_guest_handler(
    extract::State(state): Shared,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let update: GuestUpdate = parse_payload(&body)?;

    let listed = state.directory.find(&update.original_name).await;
    check_update(&update, &listed)?;

    state.sheet.update_guest(&update).await?;
    info!("RSVP {} recorded for {}", update.rsvp, update.original_name);

    state.directory.apply(&update).await;
    state.notify(DirectoryEvent::RsvpUpdated);

    Ok(Json(json!({ "success": true, "message": "Thank you for your response!" })))
}

pub async fn search_handler(
    extract::State(state): Shared,
    Query(params): Query<SearchParams>,
) -> Response {
    let guests = state.directory.guests().await;

    Json(search(&guests, &params.q)).into_response()
}

pub async fn attending_handler(extract::State(state): Shared) -> impl IntoResponse {
    let guests = state.directory.guests().await;

    Json(BookOfGuests::from_directory(&guests))
}

pub async fn guest_request_handler(
    extract::State(state): Shared,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request: GuestRequest = parse_payload(&body)?;
    let request = GuestRequestForm::from(request).submission()?;

    state.sheet.append_guest_request(&request).await?;
    info!("Guest request filed for {}", request.name);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Request submitted! We'll review and get back to you."
        })),
    ))
}

pub async fn entourage_handler(extract::State(state): Shared) -> Response {
    let entourage = state.directory.entourage().await;

    Json(entourage.as_slice()).into_response()
}

pub async fn entourage_sections_handler(extract::State(state): Shared) -> impl IntoResponse {
    let entourage = state.directory.entourage().await;

    Json(layout_sections(&entourage))
}

pub async fn entourage_updated_handler(extract::State(state): Shared) -> StatusCode {
    state.notify(DirectoryEvent::EntourageUpdated);

    StatusCode::ACCEPTED
}

pub async fn principal_sponsor_handler(
    extract::State(state): Shared,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.sheet.fetch_principal_sponsors().await?))
}

pub async fn principal_sponsor_rows_handler(
    extract::State(state): Shared,
) -> Result<impl IntoResponse, AppError> {
    let pairs = state.sheet.fetch_principal_sponsors().await?;

    Ok(Json(sponsor_rows(&pairs)))
}

pub async fn messages_handler(extract::State(state): Shared) -> Response {
    let messages = state.directory.guestbook().await;

    Json(messages.as_slice()).into_response()
}

pub async fn post_message_handler(
    extract::State(state): Shared,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let post = parse_payload::<GuestbookPost>(&body)?.validated()?;

    state.sheet.post_guestbook(&post).await?;
    info!("Guestbook message from {}", post.name);
    state.notify(DirectoryEvent::GuestbookUpdated);

    Ok(StatusCode::CREATED)
}

pub async fn countdown_handler(extract::State(state): Shared) -> impl IntoResponse {
    Json(CountdownResponse {
        target: state.countdown.target,
        left: state.countdown.remaining(),
    })
}

pub async fn site_handler(extract::State(state): Shared) -> Response {
    Json(SiteInfo {
        enable_decor: state.config.enable_decor,
        photo_upload_url: &state.config.photo_upload_url,
        wedding_start: state.config.wedding_start,
        rsvp_deadline: state.config.rsvp_deadline,
    })
    .into_response()
}

pub async fn details_handler(extract::State(state): Shared) -> Response {
    Json(&state.config.site).into_response()
}

pub async fn faq_handler(extract::State(state): Shared) -> Response {
    Json(state.config.site.faq.as_slice()).into_response()
}

pub async fn refresh_handler(extract::State(state): Shared) -> Result<impl IntoResponse, AppError> {
    let guests = state.directory.refresh_guests(state.sheet.as_ref()).await?;

    Ok(Json(json!({ "guests": guests })))
}
