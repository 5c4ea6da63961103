//! The [Timecode] entity.
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frames::{self, Components};
use crate::{codec, Error, FrameRate, Result};

const MAX_HOURS: u32 = 23;
const MAX_MINUTES: u32 = 59;
const MAX_SECONDS: u32 = 59;

/// One instant on a 24 hour, frame quantized timeline.
///
/// The fields are stored as given and may be out of range, e.g., parsing `00:00:10:99`
/// keeps 99 frames. The frame index computed from the fields is the identity of a timecode;
/// [Timecode::canonical] and the [fmt::Display] impl present the normalized form.
///
/// # Example
/// ```
/// use timecodetool::{FrameRate, Timecode};
///
/// let rate = FrameRate::new(29.97).unwrap();
/// let mut tc = Timecode::parse("00:00:59;29", rate).unwrap();
/// assert!(tc.is_drop_frame());
///
/// tc.add_frames(1);
/// assert_eq!(tc.to_string(), "00:01:00;02");
/// assert_eq!(tc.frame_index(), 1800);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Timecode {
    fields: Components,
    rate: FrameRate,
    drop_frame: bool,
}

impl Timecode {
    pub fn new(fields: Components, rate: FrameRate, drop_frame: bool) -> Self {
        Self {
            fields,
            rate,
            drop_frame,
        }
    }

    /// Parse `text` at `rate`. The drop-frame flag comes from the frames delimiter.
    ///
    /// Parsing only checks the shape of the text. Use [Timecode::validate] to check field
    /// ranges and drop-frame legality.
    ///
    /// # Errors
    /// [Error::MalformedTimecode] if `text` is not `hh:mm:ss:ff` or `hh:mm:ss;ff`.
    pub fn parse(text: &str, rate: FrameRate) -> Result<Self> {
        let (fields, drop_frame) = codec::parse(text)?;
        Ok(Self::new(fields, rate, drop_frame))
    }

    /// Create a normalized timecode for `index`, wrapping around the 24 hour clock.
    pub fn from_frame_index(index: i64, rate: FrameRate, drop_frame: bool) -> Self {
        Self::new(
            frames::from_frame_index(index, rate, drop_frame),
            rate,
            drop_frame,
        )
    }

    /// The fields as stored, possibly out of range.
    pub fn components(&self) -> Components {
        self.fields
    }

    pub fn rate(&self) -> FrameRate {
        self.rate
    }

    pub fn is_drop_frame(&self) -> bool {
        self.drop_frame
    }

    /// 0-based frame index since `00:00:00:00`, computed from the stored fields.
    pub fn frame_index(&self) -> i64 {
        frames::to_frame_index(&self.fields, self.rate, self.drop_frame)
    }

    /// Number of frames from `00:00:00:00` through this timecode, inclusive.
    pub fn frame_count(&self) -> i64 {
        self.frame_index() + 1
    }

    /// Normalized fields, each within its legal range.
    pub fn canonical(&self) -> Components {
        frames::from_frame_index(self.frame_index(), self.rate, self.drop_frame)
    }

    /// Text of the stored fields without normalization.
    pub fn raw_text(&self) -> String {
        codec::format(&self.fields, self.drop_frame)
    }

    /// Move this timecode by `delta` frames, rolling over midnight in either direction.
    ///
    /// Both the current index and `delta` are reduced to a single day first, so any `delta`
    /// is accepted.
    pub fn add_frames(&mut self, delta: i64) {
        let day = frames::frames_per_day(self.rate, self.drop_frame);
        let (_, current) = frames::divmod(self.frame_index(), day);
        let (_, delta) = frames::divmod(delta, day);
        let (_, index) = frames::divmod(current + delta, day);
        self.fields = frames::from_frame_index(index, self.rate, self.drop_frame);
    }

    /// Copy of this timecode advanced by a single frame.
    #[must_use]
    pub fn next(&self) -> Self {
        let mut next = self.clone();
        next.add_frames(1);
        next
    }

    /// Check that the stored fields name a real timecode at this rate.
    ///
    /// # Errors
    /// The first failing check, in order: [Error::HoursOutOfRange],
    /// [Error::FieldOutOfRange], [Error::FramesOutOfRange], [Error::InvalidDropFrameRate],
    /// [Error::UnreachableDropFrameTimecode].
    pub fn validate(&self) -> Result<()> {
        let Components {
            hours,
            minutes,
            seconds,
            frames,
        } = self.fields;

        if hours > MAX_HOURS {
            return Err(Error::HoursOutOfRange(hours));
        }
        if minutes > MAX_MINUTES {
            return Err(Error::FieldOutOfRange {
                field: "Minutes",
                value: minutes,
            });
        }
        if seconds > MAX_SECONDS {
            return Err(Error::FieldOutOfRange {
                field: "Seconds",
                value: seconds,
            });
        }
        // time_base is at least 1
        let max = (self.rate.time_base() - 1) as u32;
        if frames > max {
            return Err(Error::FramesOutOfRange { value: frames, max });
        }

        if self.drop_frame {
            if !self.rate.supports_drop_frame() {
                return Err(Error::InvalidDropFrameRate(self.rate.get()));
            }
            if self.canonical() != self.fields {
                return Err(Error::UnreachableDropFrameTimecode(self.raw_text()));
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl fmt::Display for Timecode {
    /// Canonical, normalized text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::format(&self.canonical(), self.drop_frame))
    }
}
