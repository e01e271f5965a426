mod io;

use crate::joint::TreeError;
use thiserror::Error as ThisError;
pub use io::*;

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("HIERARCHY keyword not found")]
    MissingHierarchy,
    #[error("Expected \"ROOT Hips\" declaration at line {line}")]
    MissingRoot {
        line: usize
    },
    #[error("Expected {expected} at line {line}, found \"{found}\"")]
    Unexpected {
        line: usize,
        expected: &'static str,
        found: String,
    },
    #[error("Unexpected end of file, expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
    },
    #[error("Invalid OFFSET at line {line}")]
    InvalidOffset {
        line: usize
    },
    #[error("Invalid CHANNELS at line {line}: {reason}")]
    InvalidChannels {
        line: usize,
        reason: String,
    },
    #[error(transparent)]
    Tree(#[from] TreeError),
}
