//! Path builder errors.

use std::fmt;

use crate::operations::Operation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathBuilderError {
    /// `build` was called before `operation`
    MissingOperation,
    /// The operation's template needs a value that was not supplied
    MissingParameter {
        operation: Operation,
        parameter: &'static str,
    },
    /// A supplied value would change the path structure
    InvalidSegment {
        parameter: &'static str,
        value: String,
    },
}

impl fmt::Display for PathBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathBuilderError::MissingOperation => write!(f, "no operation was set"),
            PathBuilderError::MissingParameter {
                operation,
                parameter,
            } => write!(f, "operation {operation} requires parameter '{parameter}'"),
            PathBuilderError::InvalidSegment { parameter, value } => write!(
                f,
                "value '{value}' for parameter '{parameter}' is not a valid path segment"
            ),
        }
    }
}

impl std::error::Error for PathBuilderError {}
