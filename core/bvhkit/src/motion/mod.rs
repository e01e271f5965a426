mod io;

use thiserror::Error as ThisError;
pub use io::*;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum MotionError {
    #[error("Expected MOTION, found {found}")]
    MissingMotion {
        found: String
    },
    #[error("Invalid frame count at line {line}")]
    InvalidFrameCount {
        line: usize
    },
    #[error("Invalid frame time at line {line}")]
    InvalidFrameTime {
        line: usize
    },
    #[error("Unexpected end of file, expected {expected}")]
    UnexpectedEof {
        expected: &'static str
    },
    #[error("Expected {expected} frames but data ended after {found}")]
    MissingFrames {
        expected: usize,
        found: usize,
    },
    #[error("Frame at line {line} has {found} values, expected {expected}")]
    ValueCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Frame at line {line} has non-numeric value \"{token}\"")]
    InvalidValue {
        line: usize,
        token: String,
    },
    #[error("Unexpected data after last frame at line {line}")]
    TrailingData {
        line: usize
    },
}

/// `Frames:` and `Frame Time:` values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionHeader {
    pub frame_count: usize,
    /// Seconds per frame
    pub frame_time: f32,
}
