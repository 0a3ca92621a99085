use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Pause between two full replays of the action log, in whole seconds.
///
/// Always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct CycleDelay(u8);

impl CycleDelay {
    /// Shortest allowed pause.
    pub const MIN: u8 = 1;
    /// Longest allowed pause.
    pub const MAX: u8 = 60;
    /// Pause used when the input is missing or not a number.
    pub const DEFAULT: u8 = 5;

    /// Clamp a whole number of seconds into range.
    pub fn from_secs(secs: i64) -> Self {
        let clamped = secs.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(clamped as u8)
    }

    /// Interpret a number of seconds, rounding to the nearest whole second.
    ///
    /// Non-finite values fall back to the default.
    pub fn from_f64(secs: f64) -> Self {
        if !secs.is_finite() {
            warn!(secs, "Cycle delay is not a number, using default");
            return Self::default();
        }
        Self::from_secs(secs.round().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
    }

    /// Interpret free-form user input.
    ///
    /// Empty or non-numeric input falls back to the default; numbers are
    /// rounded and clamped into range.
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(secs) => Self::from_f64(secs),
            Err(_) => {
                if !input.trim().is_empty() {
                    warn!(input, "Cycle delay is not a number, using default");
                }
                Self::default()
            }
        }
    }

    /// Seconds.
    pub fn secs(self) -> u8 {
        self.0
    }

    /// The pause as a duration.
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }
}

impl Default for CycleDelay {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<u8> for CycleDelay {
    fn from(secs: u8) -> Self {
        Self::from_secs(i64::from(secs))
    }
}

impl From<CycleDelay> for u8 {
    fn from(delay: CycleDelay) -> Self {
        delay.0
    }
}

impl fmt::Display for CycleDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
