//! Durations between two timecodes.
use crate::frames::divmod;
use crate::{FrameRate, Timecode};

/// Inclusive interval between two timecodes sharing a frame rate and drop-frame flag.
///
/// Endpoints are not re-validated; callers validate them before building a span. A span
/// from a timecode to itself is one frame long.
///
/// # Example
/// ```
/// use timecodetool::{FrameRate, Timecode, TimecodeSpan};
///
/// let rate = FrameRate::new(24.0).unwrap();
/// let span = TimecodeSpan::new(
///     Timecode::parse("00:00:00:00", rate).unwrap(),
///     Timecode::parse("00:00:01:00", rate).unwrap(),
/// );
/// assert_eq!(span.total_frames(), 25);
/// assert_eq!(span.as_timecode().to_string(), "00:00:01:01");
/// assert_eq!(span.wall_clock(), "00:00:01.042");
/// ```
#[derive(Clone, Debug)]
pub struct TimecodeSpan {
    start: Timecode,
    last: Timecode,
}

impl TimecodeSpan {
    pub fn new(start: Timecode, last: Timecode) -> Self {
        Self { start, last }
    }

    pub fn start(&self) -> &Timecode {
        &self.start
    }

    pub fn last(&self) -> &Timecode {
        &self.last
    }

    /// Frame rate of the span, taken from the start timecode.
    pub fn rate(&self) -> FrameRate {
        self.start.rate()
    }

    pub fn is_drop_frame(&self) -> bool {
        self.start.is_drop_frame()
    }

    /// Number of frames covered, counting both endpoints.
    pub fn total_frames(&self) -> i64 {
        self.last.frame_index() - self.start.frame_index() + 1
    }

    /// Playback time of [Self::total_frames] at the actual, possibly fractional, rate.
    pub fn total_seconds(&self) -> f64 {
        self.total_frames() as f64 / self.rate().get()
    }

    /// The duration expressed as a timecode counted from `00:00:00:00`.
    pub fn as_timecode(&self) -> Timecode {
        Timecode::from_frame_index(self.total_frames(), self.rate(), self.is_drop_frame())
    }

    /// [Self::total_seconds] formatted as `hh:mm:ss.mmm`.
    ///
    /// Hours wrap at 24. A negative span, where the last timecode is before the start, is
    /// prefixed with `-`.
    pub fn wall_clock(&self) -> String {
        format_wall_clock(self.total_seconds())
    }
}

fn format_wall_clock(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let millis = (seconds.abs() * 1000.0).round() as i64;
    let (secs, millis) = divmod(millis, 1000);
    let (mins, secs) = divmod(secs, 60);
    let (hours, mins) = divmod(mins, 60);
    let (_, hours) = divmod(hours, 24);
    format!("{sign}{hours:02}:{mins:02}:{secs:02}.{millis:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn span(first: &str, last: &str, fps: f64) -> TimecodeSpan {
        let rate = FrameRate::new(fps).unwrap();
        TimecodeSpan::new(
            Timecode::parse(first, rate).unwrap(),
            Timecode::parse(last, rate).unwrap(),
        )
    }

    #[test]
    fn single_frame_span() {
        let s = span("01:00:00:00", "01:00:00:00", 25.0);
        assert_eq!(s.total_frames(), 1);
        assert_eq!(s.wall_clock(), "00:00:00.040");
    }

    #[test]
    fn ten_seconds_at_24() {
        let rate = FrameRate::new(24.0).unwrap();
        let s = TimecodeSpan::new(
            Timecode::from_frame_index(0, rate, false),
            Timecode::from_frame_index(240, rate, false),
        );
        assert_eq!(s.total_frames(), 241);
        assert!((s.total_seconds() - 10.041_666_666_666_666).abs() < 1e-12);
        assert_eq!(s.as_timecode().to_string(), "00:00:10:01");
        assert_eq!(s.wall_clock(), "00:00:10.042");
    }

    #[test]
    fn drop_frame_ten_minutes() {
        let s = span("00:00:00;00", "00:09:59;29", 29.97);
        assert_eq!(s.total_frames(), 17_982);
        assert_eq!(s.as_timecode().to_string(), "00:10:00;00");
        assert!((s.total_seconds() - 600.0).abs() < 0.001);
        assert_eq!(s.wall_clock(), "00:10:00.000");
    }

    #[test]
    fn non_drop_uses_actual_rate_for_seconds() {
        let s = span("00:00:00:00", "00:00:59:23", 23.976);
        assert_eq!(s.total_frames(), 1440);
        assert!((s.total_seconds() - 60.06).abs() < 0.001);
        assert_eq!(s.as_timecode().to_string(), "00:01:00:00");
    }

    #[test]
    fn negative_span() {
        let s = span("00:00:01:00", "00:00:00:00", 24.0);
        assert_eq!(s.total_frames(), -23);
        assert!(s.wall_clock().starts_with('-'));
    }

    #[test_case(0.0, "00:00:00.000"; "zero")]
    #[test_case(1.5, "00:00:01.500"; "fractional")]
    #[test_case(3661.25, "01:01:01.250"; "hours")]
    #[test_case(59.9996, "00:01:00.000"; "rounds into next second")]
    #[test_case(86_400.0, "00:00:00.000"; "wraps at a day")]
    fn wall_clock_format(seconds: f64, expected: &str) {
        assert_eq!(format_wall_clock(seconds), expected);
    }
}
