//! Error type for contract violations.
//!
//! Expected bad input data never surfaces as an error anywhere in this
//! crate; it collapses to "no value" at the parse boundary. `DateError`
//! exists for genuine misuse of the API, such as constructing a
//! [`DateRange`][crate::DateRange] with neither endpoint.

use std::borrow::Cow;
use std::fmt;

/// The error kind for a [`DateError`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A generic error.
    #[default]
    Generic,
    /// An invalid type was provided.
    Type,
    /// A value was outside its valid range.
    Range,
    /// An assertion failed internally.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// An error raised for contract violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DateError {
    /// Creates a new error with the provided kind.
    #[inline]
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Creates a generic error.
    #[inline]
    #[must_use]
    pub const fn general() -> Self {
        Self::new(ErrorKind::Generic)
    }

    /// Creates a type error.
    #[inline]
    #[must_use]
    pub const fn ty() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Creates a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Creates an assertion error for broken internal invariants.
    #[inline]
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Attaches a message to this error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<Cow<'static, str>>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns this error's message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.msg.is_empty() {
            write!(f, ": {}", self.msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for DateError {}
