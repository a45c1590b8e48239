use std::io::stderr;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use invite::{
    countdown::{Countdown, WEDDING_START},
    rsvp::{Attendance, GuestRequestForm},
};
use rsvp::{
    RespondArgs, RespondOutcome,
    api::{DEFAULT_BASE_URL, HttpApi},
    utils::{book_lines, countdown_line, guest_line, summary},
};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Invitation backend to talk to
    #[arg(long, global = true, env = "RSVP_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up invited guests by name
    Search { query: String },

    /// Answer the invitation
    Respond {
        name: String,

        #[arg(long)]
        attend: Option<Attendance>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        message: Option<String>,
    },

    /// Ask to be added to the guest list
    Request {
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        message: String,
    },

    /// Book of Guests
    Attending,

    /// Time left until the ceremony
    Countdown {
        #[arg(long, default_value = WEDDING_START)]
        target: DateTime<Utc>,

        /// Keep printing every second until it starts
        #[arg(long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(stderr)
        .init();

    let args = Args::parse();
    let api = HttpApi::new(&args.base_url);

    match args.command {
        Command::Search { query } => {
            let (matches, offer_request) = rsvp::find(&api, &query).await?;

            for guest in &matches {
                println!("{}", guest_line(guest));
            }
            if offer_request {
                println!("No guest found. Use `rsvp request {query:?}` to ask for an invitation.");
            }
        }
        Command::Respond {
            name,
            attend,
            email,
            message,
        } => {
            let args = RespondArgs {
                name,
                attend,
                email,
                message,
            };

            match rsvp::respond(&api, args).await? {
                RespondOutcome::AlreadyResponded(guest) => println!("{}", summary(&guest)),
                RespondOutcome::Submitted(_) => println!("Thank you for your response!"),
            }
        }
        Command::Request {
            name,
            email,
            phone,
            message,
        } => {
            let form = GuestRequestForm {
                name,
                email,
                phone,
                message,
            };

            rsvp::request(&api, form).await?;
            println!("Request submitted! We'll review and get back to you.");
        }
        Command::Attending => {
            let book = rsvp::attending(&api).await?;

            for line in book_lines(&book) {
                println!("{line}");
            }
        }
        Command::Countdown { target, watch } => {
            let countdown = Countdown::new(target);

            if !watch {
                println!("{}", countdown_line(countdown.remaining()));
                return Ok(());
            }

            let mut ticker = countdown.ticker();
            loop {
                let left = ticker.tick().await;
                println!("{}", countdown_line(left));

                if left.is_zero() {
                    break;
                }
            }
        }
    }

    Ok(())
}
