//! Track duration normalization.
//!
//! A `TrackDuration` wraps a validated, non-negative millisecond count and
//! derives the display representations used by the table columns and chart
//! axes.

use std::time::Duration;

use thiserror::Error;

/// Errors produced when constructing a [`TrackDuration`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DurationError {
    /// The raw value was not a usable millisecond count.
    #[error("invalid track duration: {0} ms")]
    InvalidInput(i64),
}

/// A per-track duration in milliseconds, validated on construction.
///
/// All representations are pure functions of the stored count and agree with
/// each other up to truncation of sub-second (or sub-minute) remainders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrackDuration {
    ms: u64,
}

impl TrackDuration {
    /// Validate a raw millisecond count. Negative input is rejected.
    pub fn from_ms(ms: i64) -> Result<Self, DurationError> {
        if ms < 0 {
            return Err(DurationError::InvalidInput(ms));
        }
        Ok(Self { ms: ms as u64 })
    }

    /// The underlying millisecond count.
    pub fn ms(&self) -> u64 {
        self.ms
    }

    /// Whole seconds, truncated.
    pub fn total_seconds(&self) -> u64 {
        self.ms / 1_000
    }

    /// Format as `"{minutes}m {seconds}s"`.
    ///
    /// `minutes = ms / 60000`, `seconds = (ms % 60000) / 1000`, both
    /// truncated; sub-second remainders are dropped.
    pub fn minutes_seconds(&self) -> String {
        let minutes = self.ms / 60_000;
        let seconds = (self.ms % 60_000) / 1_000;
        format!("{}m {}s", minutes, seconds)
    }

    /// Duration in fractional minutes, unrounded.
    pub fn fractional_minutes(&self) -> f64 {
        self.ms as f64 / 60_000.0
    }

    /// Colon-delimited form truncated to whole seconds: `"3:45"`, with an
    /// hour field only once it is non-zero: `"1:02:05"`.
    pub fn clock(&self) -> String {
        let total = self.total_seconds();
        let hours = total / 3_600;
        let minutes = (total % 3_600) / 60;
        let seconds = total % 60;
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }

    /// The plain duration value.
    pub fn as_std(&self) -> Duration {
        Duration::from_millis(self.ms)
    }
}
