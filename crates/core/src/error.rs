//! Error types for Cinq query pipelines.

use alloc::string::String;
use core::fmt;

/// Result type alias for Cinq operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by operators and terminal operations.
///
/// Failures inside caller-supplied callbacks are not represented here: they
/// unwind through the pull that invoked the callback untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was out of range or otherwise unusable.
    InvalidArgument {
        name: &'static str,
        message: String,
    },
    /// The operation needs at least one element and the sequence was empty.
    NoElements,
    /// The operation needs exactly one match and found several.
    MoreThanOneElement,
    /// A key appeared twice where keys must be unique.
    DuplicateKey {
        key: String,
    },
    /// A positional lookup ran past the end of the sequence.
    IndexOutOfRange {
        index: usize,
        len: Option<usize>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { name, message } => {
                write!(f, "Invalid argument {}: {}", name, message)
            }
            Error::NoElements => write!(f, "Sequence contains no elements"),
            Error::MoreThanOneElement => {
                write!(f, "Sequence contains more than one matching element")
            }
            Error::DuplicateKey { key } => {
                write!(f, "An element with the same key already exists: {}", key)
            }
            Error::IndexOutOfRange { index, len: Some(len) } => {
                write!(f, "Index {} out of range for sequence of length {}", index, len)
            }
            Error::IndexOutOfRange { index, len: None } => {
                write!(f, "Index {} out of range", index)
            }
        }
    }
}

impl Error {
    /// Creates an invalid argument error.
    pub fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    /// Creates a duplicate key error, rendering the key with `Debug`.
    pub fn duplicate_key(key: &impl fmt::Debug) -> Self {
        Error::DuplicateKey {
            key: alloc::format!("{:?}", key),
        }
    }

    /// Creates an index out of range error.
    pub fn index_out_of_range(index: usize, len: Option<usize>) -> Self {
        Error::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_argument("count", "must be positive");
        assert!(err.to_string().contains("count"));

        assert!(Error::NoElements.to_string().contains("no elements"));

        let err = Error::index_out_of_range(5, Some(3));
        assert!(err.to_string().contains("length 3"));
    }

    #[test]
    fn test_duplicate_key_renders_key() {
        let err = Error::duplicate_key(&"alice");
        match err {
            Error::DuplicateKey { ref key } => assert_eq!(key, "\"alice\""),
            _ => panic!("Wrong error type"),
        }
        assert!(err.to_string().contains("alice"));
    }
}
