use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use invite::{GuestRecord, Rsvp, attendance::BookOfGuests, countdown::TimeLeft};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();

    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

pub fn rsvp_label(rsvp: Rsvp) -> &'static str {
    match rsvp {
        Rsvp::Yes => "attending",
        Rsvp::No => "not attending",
        Rsvp::Unanswered => "no response yet",
    }
}

pub fn guest_line(guest: &GuestRecord) -> String {
    format!("{:<32} {}", guest.name, rsvp_label(guest.rsvp))
}

pub fn summary(guest: &GuestRecord) -> String {
    let mut lines = vec![
        format!("{} has already responded.", guest.name),
        format!("RSVP: {}", rsvp_label(guest.rsvp)),
    ];

    if let Some(address) = guest.email.address() {
        lines.push(format!("Email: {address}"));
    }
    if !guest.message.is_empty() {
        lines.push(format!("Message: {}", guest.message));
    }
    lines.push("To change your answer, contact the couple.".to_string());

    lines.join("\n")
}

pub fn book_lines(book: &BookOfGuests) -> Vec<String> {
    let mut lines: Vec<String> = book
        .guests
        .iter()
        .map(|guest| {
            if guest.message.is_empty() {
                format!("[{}] {}", guest.initials, guest.name)
            } else {
                format!("[{}] {}: \"{}\"", guest.initials, guest.name, guest.message)
            }
        })
        .collect();

    lines.push(format!("Total attending: {}", book.total));
    lines
}

pub fn countdown_line(left: TimeLeft) -> String {
    if left.is_zero() {
        "The celebration has begun!".to_string()
    } else {
        left.to_string()
    }
}
