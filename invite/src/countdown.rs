//! # Countdown
//!
//! Time left until the ceremony, re-derived from the wall clock on every tick
//! so it never drifts.
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::{Interval, MissedTickBehavior, interval};

pub const WEDDING_START: &str = "2026-01-22T06:30:00Z";
pub const TICK: Duration = Duration::from_millis(1000);

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeLeft {
    /// Zero once `now` reaches `target`, never negative.
    pub fn between(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let delta = (target - now).num_milliseconds();

        if delta <= 0 {
            return Self::default();
        }

        Self {
            days: (delta / DAY_MS) as u32,
            hours: ((delta / HOUR_MS) % 24) as u32,
            minutes: ((delta / MINUTE_MS) % 60) as u32,
            seconds: ((delta / SECOND_MS) % 60) as u32,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub target: DateTime<Utc>,
}

impl Countdown {
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    pub fn remaining(&self) -> TimeLeft {
        TimeLeft::between(self.target, Utc::now())
    }

    pub fn ticker(&self) -> Ticker {
        let mut interval = interval(TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ticker {
            countdown: *self,
            interval,
        }
    }
}

pub struct Ticker {
    countdown: Countdown,
    interval: Interval,
}

impl Ticker {
    /// Waits for the next second, the first tick completes immediately.
    pub async fn tick(&mut self) -> TimeLeft {
        self.interval.tick().await;
        self.countdown.remaining()
    }
}
