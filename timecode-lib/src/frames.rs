//! Conversions between timecode fields and absolute frame indexes.
//!
//! A frame index is the 0-based number of frames since `00:00:00:00` of the current day.
//! Non-drop-frame timecode counts every frame slot of [FrameRate::time_base]. Drop-frame
//! timecode skips the first [FrameRate::drop_frames_per_minute] frame numbers of every minute
//! that is not a multiple of ten so the displayed time tracks wall-clock time.
//!
//! Drop-frame conversions adapted from David Heidelberger's write-up of Andrew Duncan's
//! algorithm: <https://www.davidheidelberger.com/2010/06/10/drop-frame-timecode/>
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FrameRate;

const SECS_PER_MIN: i64 = 60;
const MINS_PER_HOUR: i64 = 60;
const HOURS_PER_DAY: i64 = 24;
const SECS_PER_DAY: i64 = SECS_PER_MIN * MINS_PER_HOUR * HOURS_PER_DAY;

/// The four fields of a timecode.
///
/// Values are not guaranteed to be in range; parsed text such as `00:00:10:99` is kept as
/// is until it is normalized through a frame index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Components {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub frames: u32,
}

impl Components {
    pub fn new(hours: u32, minutes: u32, seconds: u32, frames: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            frames,
        }
    }
}

/// Floor division and floor modulo for a positive `denominator`.
///
/// The remainder always has the sign of the denominator, so negative numerators wrap
/// backwards, e.g., `divmod(-1, 24) == (-1, 23)`.
pub(crate) fn divmod(numerator: i64, denominator: i64) -> (i64, i64) {
    (
        numerator.div_euclid(denominator),
        numerator.rem_euclid(denominator),
    )
}

/// Number of frame indexes in one day before the index wraps to `00:00:00:00`.
pub fn frames_per_day(rate: FrameRate, drop_frame: bool) -> i64 {
    if drop_frame {
        (rate.get() * 3600.0).round() as i64 * HOURS_PER_DAY
    } else {
        SECS_PER_DAY * rate.time_base()
    }
}

/// Convert timecode fields to a frame index.
///
/// `tc` may contain raw, out of range fields, in which case the result may be past the end
/// of the day. Callers normalize with [from_frame_index].
pub fn to_frame_index(tc: &Components, rate: FrameRate, drop_frame: bool) -> i64 {
    let time_base = rate.time_base();
    let hours = i64::from(tc.hours);
    let minutes = i64::from(tc.minutes);
    let seconds = i64::from(tc.seconds);
    let frames = i64::from(tc.frames);

    if !drop_frame {
        let total_seconds = hours * 3600 + minutes * 60 + seconds;
        return total_seconds * time_base + frames;
    }

    let drop = rate.drop_frames_per_minute();
    let hour_frames = time_base * 3600;
    let minute_frames = time_base * 60;
    let total_minutes = hours * 60 + minutes;
    hour_frames * hours + minute_frames * minutes + time_base * seconds + frames
        - drop * (total_minutes - total_minutes / 10)
}

/// Convert a frame index to normalized timecode fields.
///
/// Indexes outside of a single day, including negative ones, wrap around the 24 hour clock.
pub fn from_frame_index(index: i64, rate: FrameRate, drop_frame: bool) -> Components {
    if drop_frame {
        from_drop_frame_index(index, rate)
    } else {
        from_non_drop_frame_index(index, rate)
    }
}

fn from_non_drop_frame_index(index: i64, rate: FrameRate) -> Components {
    let (secs, frames) = divmod(index, rate.time_base());
    let (mins, seconds) = divmod(secs, SECS_PER_MIN);
    let (hours, minutes) = divmod(mins, MINS_PER_HOUR);
    let (_, hours) = divmod(hours, HOURS_PER_DAY);
    to_components(hours, minutes, seconds, frames)
}

fn from_drop_frame_index(index: i64, rate: FrameRate) -> Components {
    let drop = rate.drop_frames_per_minute();
    let nominal = rate.nominal();
    let frames_per_10_minutes = (rate.get() * 600.0).round() as i64;
    let frames_per_minute = nominal * 60 - drop;

    let (_, mut number) = divmod(index, frames_per_day(rate, true));

    // Put the skipped frame numbers back so plain division yields the displayed fields.
    let (tens, rem) = divmod(number, frames_per_10_minutes);
    number += drop * 9 * tens;
    if rem > drop {
        number += drop * ((rem - drop) / frames_per_minute);
    }

    let (secs, frames) = divmod(number, nominal);
    let (mins, seconds) = divmod(secs, SECS_PER_MIN);
    let (hours, minutes) = divmod(mins, MINS_PER_HOUR);
    let (_, hours) = divmod(hours, HOURS_PER_DAY);
    to_components(hours, minutes, seconds, frames)
}

// All inputs are already reduced into their field ranges.
fn to_components(hours: i64, minutes: i64, seconds: i64, frames: i64) -> Components {
    Components::new(hours as u32, minutes as u32, seconds as u32, frames as u32)
}
