//! Validate, span and calculate operations producing response records.
//!
//! Handlers never fail. Problems with the inputs are reported in the response with
//! `valid == false` and a human readable `error_msg`, which is what command-line and other
//! front ends display or serialize.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::calc::{self, Step};
use crate::{Error, FrameRate, Result, Timecode, TimecodeSpan};

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ValidateResponse {
    pub input_timecode: String,
    pub input_fps: f64,
    pub valid: bool,
    pub error_msg: String,
    pub is_df: bool,
    pub frame_idx: i64,
    pub next_timecode: String,
}

#[derive(Clone, Debug, Default, PartialEq, TypedBuilder)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct SpanResponse {
    #[builder(setter(into))]
    pub input_first_timecode: String,
    #[builder(default, setter(into))]
    pub input_last_timecode: String,
    pub input_fps: f64,
    #[builder(default)]
    pub valid: bool,
    #[builder(default, setter(into))]
    pub error_msg: String,
    #[builder(default)]
    pub is_df: bool,
    #[builder(default)]
    pub exclude_last_timecode: bool,
    #[builder(default)]
    pub start_frame_idx: i64,
    #[builder(default)]
    pub last_frame_idx: i64,
    #[builder(default)]
    pub length_frames: i64,
    /// Wall-clock length, `hh:mm:ss.mmm`
    #[builder(default, setter(into))]
    pub length_time: String,
    /// Length expressed as a timecode from zero
    #[builder(default, setter(into))]
    pub length_timecode: String,
    #[builder(default)]
    pub length_seconds: f64,
    #[builder(default, setter(into))]
    pub next_timecode: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CalculateResponse {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub span: SpanResponse,
    /// Timecode after applying every step
    pub last_timecode: String,
    pub steps: Vec<Step>,
}

fn parse_valid(text: &str, rate: FrameRate) -> Result<Timecode> {
    let tc = Timecode::parse(text, rate)?;
    tc.validate()?;
    Ok(tc)
}

/// Check that `text` is a valid timecode at `rate`.
pub fn validate(text: &str, rate: FrameRate) -> ValidateResponse {
    debug!("validating {text} @ {rate}");
    let mut zult = ValidateResponse {
        input_timecode: text.to_string(),
        input_fps: rate.get(),
        ..Default::default()
    };

    let tc = match Timecode::parse(text, rate) {
        Ok(tc) => tc,
        Err(err) => {
            zult.error_msg = err.to_string();
            return zult;
        }
    };
    zult.is_df = tc.is_drop_frame();
    if let Err(err) = tc.validate() {
        debug!("{text} is not valid: {err}");
        zult.error_msg = err.to_string();
        return zult;
    }

    zult.valid = true;
    zult.frame_idx = tc.frame_index();
    zult.next_timecode = tc.next().to_string();
    zult
}

/// Measure the span between `first` and `last` inclusive.
///
/// With `exclude_last` the span stops one frame before `last`.
pub fn span(first: &str, last: &str, rate: FrameRate, exclude_last: bool) -> SpanResponse {
    debug!("span {first} -> {last} @ {rate} exclude_last={exclude_last}");
    match resolve_span(first, last, rate, exclude_last) {
        Ok((span, next)) => SpanResponse::builder()
            .input_first_timecode(first)
            .input_last_timecode(last)
            .input_fps(rate.get())
            .valid(true)
            .is_df(span.is_drop_frame())
            .exclude_last_timecode(exclude_last)
            .start_frame_idx(span.start().frame_index())
            .last_frame_idx(span.last().frame_index())
            .length_frames(span.total_frames())
            .length_time(span.wall_clock())
            .length_timecode(span.as_timecode().to_string())
            .length_seconds(span.total_seconds())
            .next_timecode(next.to_string())
            .build(),
        Err(errors) => {
            let msg = errors.join("\n");
            debug!("span failed: {msg}");
            SpanResponse::builder()
                .input_first_timecode(first)
                .input_last_timecode(last)
                .input_fps(rate.get())
                .exclude_last_timecode(exclude_last)
                .error_msg(msg)
                .build()
        }
    }
}

/// Returns the span and the timecode following `last`, or every error found.
fn resolve_span(
    first: &str,
    last: &str,
    rate: FrameRate,
    exclude_last: bool,
) -> std::result::Result<(TimecodeSpan, Timecode), Vec<String>> {
    let start = parse_valid(first, rate).map_err(|e| format!("First timecode error: {e}"));
    let end = parse_valid(last, rate).map_err(|e| format!("Last timecode error: {e}"));
    let (start, mut end) = match (start, end) {
        (Ok(start), Ok(end)) => (start, end),
        (start, end) => {
            return Err([start.err(), end.err()].into_iter().flatten().collect());
        }
    };

    if start.is_drop_frame() != end.is_drop_frame() {
        return Err(vec![Error::MixedDropFrame.to_string()]);
    }

    let next = end.next();
    if exclude_last {
        if start.frame_index() == end.frame_index() {
            return Err(vec![Error::EmptySpan.to_string()]);
        }
        end.add_frames(-1);
    }

    Ok((TimecodeSpan::new(start, end), next))
}

/// Apply `tokens`, alternating operators and operands, to the timecode `text`.
///
/// The span fields of the response describe the range from `text` to the resulting
/// timecode.
pub fn calculate<S: AsRef<str>>(
    text: &str,
    tokens: &[S],
    rate: FrameRate,
    exclude_last: bool,
) -> CalculateResponse {
    debug!(
        "calculate {text} with {} tokens @ {rate} exclude_last={exclude_last}",
        tokens.len()
    );
    let failed = |err: Error| {
        debug!("calculate failed: {err}");
        CalculateResponse {
            span: SpanResponse::builder()
                .input_first_timecode(text)
                .input_fps(rate.get())
                .exclude_last_timecode(exclude_last)
                .error_msg(err.to_string())
                .build(),
            ..Default::default()
        }
    };

    let base = match parse_valid(text, rate) {
        Ok(tc) => tc,
        Err(err) => return failed(err),
    };
    let calculation = match calc::pair_tokens(tokens)
        .and_then(|ops| calc::calculate(&base, &ops, exclude_last))
    {
        Ok(c) => c,
        Err(err) => return failed(err),
    };

    let last_timecode = calculation.result.to_string();
    CalculateResponse {
        span: span(text, &last_timecode, rate, exclude_last),
        last_timecode,
        steps: calculation.steps,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::Operator;

    fn rate(fps: f64) -> FrameRate {
        FrameRate::new(fps).unwrap()
    }

    #[test]
    fn validate_ok() {
        let zult = validate("00:00:59;29", rate(29.97));
        assert!(zult.valid, "{zult:?}");
        assert!(zult.is_df);
        assert_eq!(zult.frame_idx, 1799);
        assert_eq!(zult.next_timecode, "00:01:00;02");
        assert!(zult.error_msg.is_empty());
    }

    #[test]
    fn validate_unreachable() {
        let zult = validate("00:01:00;00", rate(29.97));
        assert!(!zult.valid);
        assert!(zult.is_df);
        assert_eq!(
            zult.error_msg,
            Error::UnreachableDropFrameTimecode("00:01:00;00".to_string()).to_string()
        );
        assert!(zult.next_timecode.is_empty());
    }

    #[test]
    fn validate_malformed() {
        let zult = validate("1:00:00:00", rate(24.0));
        assert!(!zult.valid);
        assert!(zult.error_msg.contains("malformed"), "{}", zult.error_msg);
    }

    #[test]
    fn span_ok() {
        let zult = span("00:00:00:00", "00:00:01:00", rate(24.0), false);
        assert!(zult.valid, "{zult:?}");
        assert_eq!(zult.start_frame_idx, 0);
        assert_eq!(zult.last_frame_idx, 24);
        assert_eq!(zult.length_frames, 25);
        assert_eq!(zult.length_timecode, "00:00:01:01");
        assert_eq!(zult.length_time, "00:00:01.042");
        assert_eq!(zult.next_timecode, "00:00:01:01");
    }

    #[test]
    fn span_exclude_last() {
        let zult = span("00:00:00:00", "00:00:01:00", rate(24.0), true);
        assert!(zult.valid, "{zult:?}");
        assert!(zult.exclude_last_timecode);
        assert_eq!(zult.last_frame_idx, 23);
        assert_eq!(zult.length_frames, 24);
        assert_eq!(zult.length_time, "00:00:01.000");
        // next is relative to the given last timecode, not the excluded one
        assert_eq!(zult.next_timecode, "00:00:01:01");
    }

    #[test]
    fn span_exclude_last_empty() {
        let zult = span("00:00:01:00", "00:00:01:00", rate(24.0), true);
        assert!(!zult.valid);
        assert_eq!(zult.error_msg, Error::EmptySpan.to_string());
    }

    #[test]
    fn span_collects_all_errors() {
        let zult = span("bad", "00:00:00:99", rate(24.0), false);
        assert!(!zult.valid);
        let lines: Vec<&str> = zult.error_msg.lines().collect();
        assert_eq!(lines.len(), 2, "{}", zult.error_msg);
        assert!(lines[0].starts_with("First timecode error:"));
        assert!(lines[1].starts_with("Last timecode error:"));
    }

    #[test]
    fn span_mixed_drop_frame() {
        let zult = span("00:00:00;00", "00:00:01:00", rate(29.97), false);
        assert!(!zult.valid);
        assert_eq!(zult.error_msg, Error::MixedDropFrame.to_string());
    }

    #[test]
    fn calculate_ok() {
        let zult = calculate("01:00:00:00", &["+", "48", "-", "24"], rate(24.0), false);
        assert!(zult.span.valid, "{zult:?}");
        assert_eq!(zult.last_timecode, "01:00:01:00");
        assert_eq!(zult.span.start_frame_idx, 86_400);
        assert_eq!(zult.span.last_frame_idx, 86_424);
        assert_eq!(zult.span.length_frames, 25);
        assert_eq!(zult.steps.len(), 2);
        assert_eq!(zult.steps[1].operation, Operator::Subtract);
    }

    #[test]
    fn calculate_bad_operand() {
        let zult = calculate("01:00:00:00", &["+", "nope"], rate(24.0), false);
        assert!(!zult.span.valid);
        assert!(zult.steps.is_empty());
        assert!(zult.last_timecode.is_empty());
        assert_eq!(
            zult.span.error_msg,
            Error::UnparseableOperand("nope".to_string()).to_string()
        );
    }

    #[test]
    fn calculate_invalid_base() {
        let zult = calculate("25:00:00:00", &["+", "1"], rate(24.0), false);
        assert!(!zult.span.valid);
        assert_eq!(zult.span.error_msg, Error::HoursOutOfRange(25).to_string());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn responses_use_camel_case() {
        let zult = calculate("00:00:00:00", &["+", "1"], rate(24.0), false);
        let json = serde_json::to_value(&zult).unwrap();
        assert_eq!(json["inputFirstTimecode"], "00:00:00:00");
        assert_eq!(json["lastTimecode"], "00:00:00:01");
        assert_eq!(json["lengthFrames"], 2);
        assert_eq!(json["steps"][0]["operation"], "+");
        assert_eq!(json["steps"][0]["frames"], 1);
    }
}
