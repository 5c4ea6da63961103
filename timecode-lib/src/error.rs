#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Text does not look like `hh:mm:ss:ff` or `hh:mm:ss;ff`.
    #[error("Timecode {input:?} is malformed. Please format as {expected}")]
    MalformedTimecode {
        input: String,
        /// Human readable description of the accepted format
        expected: &'static str,
    },

    #[error("Hours cannot be higher than 23; got {0}")]
    HoursOutOfRange(u32),
    /// Minutes or seconds above 59.
    #[error("{field} cannot be higher than 59; got {value}")]
    FieldOutOfRange { field: &'static str, value: u32 },
    #[error("Frames cannot be higher than {max}; got {value}")]
    FramesOutOfRange { value: u32, max: u32 },

    /// Drop-frame requested for a rate other than 29.97 or 59.94.
    #[error("Drop frame timecode requires 29.97 or 59.94 fps; got {0}")]
    InvalidDropFrameRate(f64),
    /// The timecode names a frame number skipped by the drop-frame scheme.
    #[error("{0} is not a valid drop frame timecode")]
    UnreachableDropFrameTimecode(String),

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(String),

    #[error("Operand {0:?} is neither a frame count nor a timecode")]
    UnparseableOperand(String),
    #[error("Invalid operator {0:?}; expected + or -")]
    InvalidOperator(String),

    #[error("Span mixes drop frame and non-drop frame timecodes")]
    MixedDropFrame,
    #[error("Span has no frames in it")]
    EmptySpan,
}

pub type Result<T> = std::result::Result<T, Error>;
