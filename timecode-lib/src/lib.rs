#![doc = include_str!("../README.md")]

mod error;

pub mod calc;
pub mod codec;
pub mod frames;
pub mod handlers;
mod rate;
pub mod span;
pub mod timecode;

pub use error::{Error, Result};
pub use frames::Components;
pub use rate::FrameRate;
pub use span::TimecodeSpan;
pub use timecode::Timecode;
