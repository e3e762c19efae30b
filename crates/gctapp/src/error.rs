//! # Error Model
//!
//! Every failure that crosses a layer boundary is a [`GctError`]: a kind, a
//! human readable message and an optional wrapped cause.
//!
//! ```text
//! NotFound: todo not found
//! FileSystem: failed to read data file /tmp/x.json (caused by: Permission denied (os error 13))
//! ```
//!
//! Two errors compare equal when kind and message match; the cause is not part
//! of the identity. This is what makes the sentinel constants
//! ([`TODO_NOT_FOUND`], [`EMPTY_DESCRIPTION`], [`INVALID_ID`]) usable with `==`.
//!
//! The `is_*` predicates accept any error and walk its `source()` chain, so a
//! `GctError` wrapped inside some other error is still classified correctly.

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    FileSystem,
    Json,
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::FileSystem => "FileSystem",
            ErrorKind::Json => "JSON",
            ErrorKind::Configuration => "Configuration",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{kind}: {message}{}", caused_by(.cause))]
pub struct GctError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    cause: Option<BoxedCause>,
}

fn caused_by(cause: &Option<BoxedCause>) -> String {
    match cause {
        Some(cause) => format!(" (caused by: {})", cause),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, GctError>;

/// Returned when an operation references an ID that is not in the collection.
pub const TODO_NOT_FOUND: GctError = GctError::sentinel(ErrorKind::NotFound, "todo not found");

/// Returned when a description is empty after trimming.
pub const EMPTY_DESCRIPTION: GctError =
    GctError::sentinel(ErrorKind::InvalidInput, "description cannot be empty");

/// Returned when a todo ID is zero or negative.
pub const INVALID_ID: GctError = GctError::sentinel(ErrorKind::InvalidInput, "invalid todo ID");

impl GctError {
    const fn sentinel(kind: ErrorKind, message: &'static str) -> Self {
        Self {
            kind,
            message: Cow::Borrowed(message),
            cause: None,
        }
    }

    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn file_system(
        message: impl Into<Cow<'static, str>>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::new(ErrorKind::FileSystem, message).with_cause(cause)
    }

    pub fn json(
        message: impl Into<Cow<'static, str>>,
        cause: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::new(ErrorKind::Json, message).with_cause(cause)
    }

    pub fn configuration(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Attach the underlying error, replacing any previous cause.
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl PartialEq for GctError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message
    }
}

impl Eq for GctError {}

/// Kind of the first [`GctError`] found while walking `err` and its sources.
pub fn kind_of(err: &(dyn StdError + 'static)) -> Option<ErrorKind> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(gct) = e.downcast_ref::<GctError>() {
            return Some(gct.kind);
        }
        current = e.source();
    }
    None
}

pub fn is_not_found(err: &(dyn StdError + 'static)) -> bool {
    kind_of(err) == Some(ErrorKind::NotFound)
}

pub fn is_invalid_input(err: &(dyn StdError + 'static)) -> bool {
    kind_of(err) == Some(ErrorKind::InvalidInput)
}

pub fn is_file_system(err: &(dyn StdError + 'static)) -> bool {
    kind_of(err) == Some(ErrorKind::FileSystem)
}

pub fn is_json(err: &(dyn StdError + 'static)) -> bool {
    kind_of(err) == Some(ErrorKind::Json)
}

pub fn is_configuration(err: &(dyn StdError + 'static)) -> bool {
    kind_of(err) == Some(ErrorKind::Configuration)
}
