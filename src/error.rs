//! Error types for the Quicksilver object model

use crate::runtime::Value;
use std::fmt;
use thiserror::Error;

/// Main error type for the object model
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Runtime error - TypeError, RangeError, etc.
    #[error("{kind}: {message}")]
    RuntimeError { kind: ErrorKind, message: String },

    /// A script value thrown by a getter, setter or native callable
    #[error("Uncaught {0}")]
    Thrown(Value),

    /// The execution throttle was cancelled explicitly
    #[error("CancellationError: {message}")]
    Cancelled { message: String },

    /// The execution throttle ran out of quota or time
    #[error("DeadlineError: {message}")]
    DeadlineExceeded { message: String },

    /// Invalid realm configuration
    #[error("ConfigError: {0}")]
    ConfigError(String),

    /// IO error
    #[error("IOError: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

/// JavaScript error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum ErrorKind {
    /// TypeError - wrong type for operation
    TypeError,
    /// ReferenceError - undefined variable
    ReferenceError,
    /// RangeError - value out of range
    RangeError,
    /// Generic Error - user-thrown Error objects
    GenericError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::TypeError => write!(f, "TypeError"),
            ErrorKind::ReferenceError => write!(f, "ReferenceError"),
            ErrorKind::RangeError => write!(f, "RangeError"),
            ErrorKind::GenericError => write!(f, "Error"),
        }
    }
}

impl Error {
    /// Create a TypeError
    pub fn type_error(message: impl Into<String>) -> Self {
        Error::RuntimeError {
            kind: ErrorKind::TypeError,
            message: message.into(),
        }
    }

    /// Create a RangeError
    pub fn range_error(message: impl Into<String>) -> Self {
        Error::RuntimeError {
            kind: ErrorKind::RangeError,
            message: message.into(),
        }
    }

    /// Create a ReferenceError
    pub fn reference_error(message: impl Into<String>) -> Self {
        Error::RuntimeError {
            kind: ErrorKind::ReferenceError,
            message: message.into(),
        }
    }

    /// Throw a script value from a native callable
    pub fn thrown(value: impl Into<Value>) -> Self {
        Error::Thrown(value.into())
    }

    /// The thrown script value, if any
    pub fn thrown_value(&self) -> Option<&Value> {
        match self {
            Error::Thrown(value) => Some(value),
            _ => None,
        }
    }

    /// Create a cancellation error
    pub fn cancelled(message: impl Into<String>) -> Self {
        Error::Cancelled {
            message: message.into(),
        }
    }

    /// Create a deadline exceeded error
    pub fn deadline_exceeded(message: impl Into<String>) -> Self {
        Error::DeadlineExceeded {
            message: message.into(),
        }
    }

    /// The JavaScript error kind, if this is a runtime error
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::RuntimeError { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Check whether this is a TypeError
    pub fn is_type_error(&self) -> bool {
        self.kind() == Some(ErrorKind::TypeError)
    }

    /// Check whether this is an explicit cancellation
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled { .. })
    }

    /// Check whether this is a deadline/quota abort
    pub fn is_deadline(&self) -> bool {
        matches!(self, Error::DeadlineExceeded { .. })
    }

    /// Check whether this error aborts the in-flight operation unconditionally
    /// (it must not be caught by a script-level catch boundary)
    pub fn is_abort(&self) -> bool {
        self.is_cancellation() || self.is_deadline()
    }
}

/// Result type alias for the object model
pub type Result<T> = std::result::Result<T, Error>;

/// Standardized error message templates
pub mod messages {
    pub const NOT_AN_OBJECT: &str = "is not an object";
    pub const NOT_A_FUNCTION: &str = "is not a function";
    pub const NOT_A_SYMBOL: &str = "is not a symbol";

    pub const CANNOT_REDEFINE: &str = "Cannot redefine property";
    pub const CANNOT_DEFINE: &str = "Cannot define property";
    pub const CANNOT_ASSIGN: &str = "Cannot assign to read only property";
    pub const CANNOT_DELETE: &str = "Cannot delete property";
    pub const CANNOT_CONVERT_PRIMITIVE: &str = "Cannot convert object to primitive value";
    pub const INVALID_PROTOTYPE: &str = "Object prototype may only be an Object or null";
    pub const CYCLIC_PROTOTYPE: &str = "Cyclic __proto__ value";
    pub const CIRCULAR_JSON: &str = "Converting circular structure to JSON";

    /// Format a "X is not an object" error message
    pub fn not_an_object(name: &str) -> String {
        format!("{} {}", name, NOT_AN_OBJECT)
    }

    /// Format a "X is not a function" error message
    pub fn not_a_function(name: &str) -> String {
        format!("{} {}", name, NOT_A_FUNCTION)
    }

    /// Format a "X is not a symbol" error message
    pub fn not_a_symbol(name: &str) -> String {
        format!("{} {}", name, NOT_A_SYMBOL)
    }

    /// Format a "Cannot redefine property: X" error message
    pub fn cannot_redefine(prop: &str) -> String {
        format!("{}: {}", CANNOT_REDEFINE, prop)
    }

    /// Format a "Cannot define property X, object is not extensible" error message
    pub fn not_extensible(prop: &str) -> String {
        format!("{} {}, object is not extensible", CANNOT_DEFINE, prop)
    }

    /// Format a "Cannot assign to read only property 'X'" error message
    pub fn read_only(prop: &str) -> String {
        format!("{} '{}'", CANNOT_ASSIGN, prop)
    }

    /// Format a "Cannot delete property 'X'" error message
    pub fn cannot_delete(prop: &str) -> String {
        format!("{} '{}'", CANNOT_DELETE, prop)
    }

    /// Format a "X called on non-object" error message
    pub fn called_on_non_object(what: &str) -> String {
        format!("{} called on non-object", what)
    }

    /// Format a "X requires Y" error message
    pub fn requires(what: &str, requirement: &str) -> String {
        format!("{} requires {}", what, requirement)
    }
}
