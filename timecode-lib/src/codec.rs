//! Timecode text parsing and formatting.
use std::sync::OnceLock;

use regex::Regex;

use crate::frames::Components;
use crate::{Error, Result};

/// Format description reported for malformed timecode text.
pub const EXPECTED_FORMAT: &str = "hh:mm:ss:ff or hh:mm:ss;ff";

const DROP_FRAME_DELIM: &str = ";";

fn timecode_regex() -> &'static Regex {
    static RX: OnceLock<Regex> = OnceLock::new();
    RX.get_or_init(|| {
        Regex::new(r"^([0-9]{2}):([0-5][0-9]):([0-5][0-9])([;:])([0-9]{2})$")
            .expect("regex to compile")
    })
}

/// Parse timecode text into its raw fields and drop-frame flag.
///
/// Minutes and seconds must be `00` to `59`; hours and frames may be any two digits and are
/// range checked later by validation. A `;` before the frames field marks drop-frame.
///
/// # Errors
/// [Error::MalformedTimecode] if `text` does not match the expected format.
pub fn parse(text: &str) -> Result<(Components, bool)> {
    let malformed = || Error::MalformedTimecode {
        input: text.to_string(),
        expected: EXPECTED_FORMAT,
    };
    let cap = timecode_regex().captures(text).ok_or_else(malformed)?;
    let field = |idx: usize| cap[idx].parse::<u32>().map_err(|_| malformed());

    let tc = Components::new(field(1)?, field(2)?, field(3)?, field(5)?);
    Ok((tc, &cap[4] == DROP_FRAME_DELIM))
}

/// Format fields as `hh:mm:ss:ff`, or `hh:mm:ss;ff` for drop-frame.
pub fn format(tc: &Components, drop_frame: bool) -> String {
    let delim = if drop_frame { DROP_FRAME_DELIM } else { ":" };
    format!(
        "{:02}:{:02}:{:02}{delim}{:02}",
        tc.hours, tc.minutes, tc.seconds, tc.frames
    )
}
