//! Chained timecode arithmetic, e.g., `01:00:00:00 + 00:00:10:00 - 12`.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, FrameRate, Result, Timecode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operator {
    #[cfg_attr(feature = "serde", serde(rename = "+"))]
    Add,
    #[cfg_attr(feature = "serde", serde(rename = "-"))]
    Subtract,
}

impl Operator {
    fn apply(self, tc: &mut Timecode, frames: i64) {
        match self {
            Self::Add => tc.add_frames(frames),
            Self::Subtract => tc.add_frames(-frames),
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            _ => Err(Error::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "+",
            Self::Subtract => "-",
        })
    }
}

/// The right hand side of a calculation step.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A literal number of frames.
    Frames(i64),
    /// A timecode whose inclusive frame count is used.
    Timecode(Timecode),
}

impl Operand {
    /// Resolve `text` as either a frame count or a timecode at `rate`.
    ///
    /// With `exclude_last` a timecode operand is moved back one frame so it counts up to, but
    /// not including, itself.
    ///
    /// # Errors
    /// [Error::UnparseableOperand] if `text` is neither.
    pub fn parse(text: &str, rate: FrameRate, exclude_last: bool) -> Result<Self> {
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text
                .parse::<i64>()
                .map(Self::Frames)
                .map_err(|_| Error::UnparseableOperand(text.to_string()));
        }
        let mut tc =
            Timecode::parse(text, rate).map_err(|_| Error::UnparseableOperand(text.to_string()))?;
        if exclude_last {
            tc.add_frames(-1);
        }
        Ok(Self::Timecode(tc))
    }

    /// Number of frames this operand adds or subtracts.
    pub fn frames(&self) -> i64 {
        match self {
            Self::Frames(n) => *n,
            Self::Timecode(tc) => tc.frame_count(),
        }
    }
}

/// One applied step of a [Calculation].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    pub operation: Operator,
    /// Operand rendered as a timecode.
    pub timecode: String,
    /// Frames added or subtracted.
    pub frames: i64,
}

#[derive(Clone, Debug)]
pub struct Calculation {
    pub result: Timecode,
    pub steps: Vec<Step>,
}

/// Apply each `(operator, operand)` pair in order to a copy of `base`.
///
/// Operands are resolved with [Operand::parse] using the rate and drop-frame flag of
/// `base`. A frame count `N` is reported as the timecode whose inclusive frame count is `N`,
/// e.g., `25` at 24 fps is `00:00:01:00`, the same as a `00:00:01:00` operand.
///
/// # Errors
/// The error of the first operand that cannot be resolved. No partial result is returned.
pub fn calculate<S: AsRef<str>>(
    base: &Timecode,
    ops: &[(Operator, S)],
    exclude_last: bool,
) -> Result<Calculation> {
    let rate = base.rate();
    let drop_frame = base.is_drop_frame();
    let mut result = base.clone();
    let mut steps = Vec::with_capacity(ops.len());

    for (operator, text) in ops {
        let operand = Operand::parse(text.as_ref(), rate, exclude_last)?;
        let frames = operand.frames();
        let timecode = match operand {
            Operand::Frames(n) => {
                Timecode::from_frame_index(n - 1, rate, drop_frame).to_string()
            }
            Operand::Timecode(tc) => tc.to_string(),
        };
        operator.apply(&mut result, frames);
        steps.push(Step {
            operation: *operator,
            timecode,
            frames,
        });
    }

    Ok(Calculation {
        result,
        steps,
    })
}

/// Split a flat token list such as `["+", "00:00:01:00", "-", "12"]` into pairs.
///
/// # Errors
/// [Error::InvalidOperator] for a bad operator token, or [Error::UnparseableOperand] if the
/// last operator has no operand.
pub fn pair_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<(Operator, String)>> {
    tokens
        .chunks(2)
        .map(|pair| {
            let op: Operator = pair[0].as_ref().parse()?;
            let operand = pair
                .get(1)
                .ok_or_else(|| Error::UnparseableOperand(String::new()))?;
            Ok((op, operand.as_ref().to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(fps: f64) -> FrameRate {
        FrameRate::new(fps).unwrap()
    }

    #[test]
    fn add_and_subtract_frames() {
        let base = Timecode::parse("01:00:00:00", rate(24.0)).unwrap();
        let calc = calculate(
            &base,
            &[(Operator::Add, "48"), (Operator::Subtract, "24")],
            false,
        )
        .unwrap();
        assert_eq!(calc.result.to_string(), "01:00:01:00");
        assert_eq!(
            calc.steps,
            vec![
                Step {
                    operation: Operator::Add,
                    timecode: "00:00:01:23".to_string(),
                    frames: 48
                },
                Step {
                    operation: Operator::Subtract,
                    timecode: "00:00:00:23".to_string(),
                    frames: 24
                },
            ]
        );
    }

    #[test]
    fn timecode_operands_count_inclusively() {
        let base = Timecode::parse("00:00:00:00", rate(24.0)).unwrap();
        let calc = calculate(&base, &[(Operator::Add, "00:00:01:00")], false).unwrap();
        assert_eq!(calc.steps[0].frames, 25);
        assert_eq!(calc.result.to_string(), "00:00:01:01");
    }

    #[test]
    fn exclude_last_decrements_timecode_operands() {
        let base = Timecode::parse("00:00:00:00", rate(24.0)).unwrap();
        let calc = calculate(&base, &[(Operator::Add, "00:00:01:00")], true).unwrap();
        assert_eq!(calc.steps[0].timecode, "00:00:00:23");
        assert_eq!(calc.steps[0].frames, 24);
        assert_eq!(calc.result.to_string(), "00:00:01:00");
    }

    #[test]
    fn frame_counts_and_timecodes_report_alike() {
        let base = Timecode::parse("00:00:00:00", rate(24.0)).unwrap();
        let calc = calculate(
            &base,
            &[(Operator::Add, "25"), (Operator::Add, "00:00:01:00")],
            false,
        )
        .unwrap();
        assert_eq!(calc.steps[0], calc.steps[1]);
        assert_eq!(calc.steps[0].timecode, "00:00:01:00");
        assert_eq!(calc.steps[0].frames, 25);
        assert_eq!(calc.result.to_string(), "00:00:02:02");
    }

    #[test]
    fn huge_frame_count_wraps() {
        let base = Timecode::parse("01:00:00:00", rate(24.0)).unwrap();
        let max = i64::MAX.to_string();
        let calc = calculate(&base, &[(Operator::Add, max.as_str())], false).unwrap();
        assert_eq!(calc.steps[0].frames, i64::MAX);
        assert!(calc.result.is_valid(), "{}", calc.result);

        let calc = calculate(&base, &[(Operator::Subtract, max.as_str())], false).unwrap();
        assert!(calc.result.is_valid(), "{}", calc.result);
    }

    #[test]
    fn subtract_rolls_back_over_midnight() {
        let base = Timecode::parse("00:00:00;00", rate(29.97)).unwrap();
        let calc = calculate(&base, &[(Operator::Subtract, "1")], false).unwrap();
        assert_eq!(calc.result.to_string(), "23:59:59;29");
    }

    #[test]
    fn bad_operand_aborts_chain() {
        let base = Timecode::parse("00:00:00:00", rate(24.0)).unwrap();
        let err = calculate(
            &base,
            &[(Operator::Add, "10"), (Operator::Add, "ten")],
            false,
        )
        .unwrap_err();
        assert_eq!(err, Error::UnparseableOperand("ten".to_string()));
    }

    #[test]
    fn negative_literal_is_not_a_frame_count() {
        assert_eq!(
            Operand::parse("-5", rate(24.0), false),
            Err(Error::UnparseableOperand("-5".to_string()))
        );
    }

    #[test]
    fn pairs_tokens() {
        let pairs = pair_tokens(&["+", "00:00:01:00", "-", "12"]).unwrap();
        assert_eq!(
            pairs,
            vec![
                (Operator::Add, "00:00:01:00".to_string()),
                (Operator::Subtract, "12".to_string())
            ]
        );
        assert_eq!(
            pair_tokens(&["*", "12"]),
            Err(Error::InvalidOperator("*".to_string()))
        );
        assert_eq!(
            pair_tokens(&["+", "12", "-"]),
            Err(Error::UnparseableOperand(String::new()))
        );
    }
}
