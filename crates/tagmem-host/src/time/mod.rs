// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Unix timestamps and a monotonic stop watch.
//!
//! Timestamps count from 1970-01-01 00:00:00 UTC. Conversions into
//! [`SystemTime`] return `None` when the platform cannot represent the
//! result; conversions out of it clamp times before the epoch to zero.


use core::time::Duration;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// =============================================================================
// Unix time
// =============================================================================

/// The instant `seconds` after the Unix epoch.
#[must_use]
pub fn from_unix_seconds(seconds: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(Duration::from_secs(seconds))
}

/// The instant `millis` milliseconds after the Unix epoch.
#[must_use]
pub fn from_unix_millis(millis: u64) -> Option<SystemTime> {
    UNIX_EPOCH.checked_add(Duration::from_millis(millis))
}

fn since_epoch(time: SystemTime) -> Duration {
    time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO)
}

/// Whole seconds between the Unix epoch and `time`.
#[must_use]
pub fn to_unix_seconds(time: SystemTime) -> u64 {
    since_epoch(time).as_secs()
}

/// Whole milliseconds between the Unix epoch and `time`, saturating at
/// `u64::MAX`.
#[must_use]
pub fn to_unix_millis(time: SystemTime) -> u64 {
    u64::try_from(since_epoch(time).as_millis()).unwrap_or(u64::MAX)
}

/// Current wall-clock time in Unix seconds.
#[must_use]
pub fn unix_seconds_now() -> u64 {
    to_unix_seconds(SystemTime::now())
}

/// Current wall-clock time in Unix milliseconds.
#[must_use]
pub fn unix_millis_now() -> u64 {
    to_unix_millis(SystemTime::now())
}

// =============================================================================
// StopWatch
// =============================================================================

/// Measures elapsed time on the monotonic clock.
#[derive(Debug, Clone, Copy)]
pub struct StopWatch {
    started: Instant,
}

impl StopWatch {
    /// A stop watch running from now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since the last start or reset.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whole milliseconds since the last start or reset.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Restart the measurement from now.
    pub fn reset(&mut self) {
        self.started = Instant::now();
    }
}

impl Default for StopWatch {
    fn default() -> Self {
        Self::start()
    }
}
