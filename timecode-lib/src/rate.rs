//! Frame rates and the integer time base derived from them.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Slowest rate accepted. Keeps every divisor in the frame math non-zero.
const MIN_RATE: f64 = 1.0;
/// Fastest rate accepted. Keeps a day of frame indexes and every field well inside their
/// integer types.
const MAX_RATE: f64 = 1000.0;
/// How far a rate may be from 29.97 or 59.94 and still count as drop-frame capable.
const DROP_FRAME_TOLERANCE: f64 = 0.01;
const DROP_FRAME_RATES: [f64; 2] = [29.97, 59.94];

/// Nominal frames per second, possibly fractional, e.g., 23.976 or 29.97.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct FrameRate(f64);

impl FrameRate {
    /// # Errors
    /// [Error::InvalidFrameRate] if `fps` is not finite, is less than 1 or is more than
    /// 1000.
    pub fn new(fps: f64) -> Result<Self> {
        if !fps.is_finite() || !(MIN_RATE..=MAX_RATE).contains(&fps) {
            return Err(Error::InvalidFrameRate(fps.to_string()));
        }
        Ok(Self(fps))
    }

    pub fn get(&self) -> f64 {
        self.0
    }

    /// Integer number of frame slots per second, i.e., `ceil(rate)`.
    ///
    /// This is the base used for all field arithmetic, so 23.976 counts frames 0 to 23
    /// and 29.97 counts frames 0 to 29.
    pub fn time_base(&self) -> i64 {
        self.0.ceil() as i64
    }

    /// The rate rounded to the nearest integer.
    pub fn nominal(&self) -> i64 {
        self.0.round() as i64
    }

    /// Number of frame numbers skipped at the start of each drop-frame minute.
    ///
    /// Rounded rather than truncated: 2 at 29.97 and 4 at 59.94.
    pub fn drop_frames_per_minute(&self) -> i64 {
        (self.0 * 0.066666).round() as i64
    }

    /// True if drop-frame timecode is defined for this rate (29.97 or 59.94).
    pub fn supports_drop_frame(&self) -> bool {
        DROP_FRAME_RATES
            .iter()
            .any(|r| (self.0 - r).abs() < DROP_FRAME_TOLERANCE)
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FrameRate> for f64 {
    fn from(value: FrameRate) -> Self {
        value.0
    }
}

impl FromStr for FrameRate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let fps = s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidFrameRate(s.to_string()))?;
        Self::new(fps)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
