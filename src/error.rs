//! Error handling.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::{error, fmt, io};
use std::borrow::Cow;


//------------ ErrorKind -----------------------------------------------------

/// The kind of an error.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// The request itself was wrong.
    ///
    /// No certificate was given or file arguments conflict. Nothing has
    /// been written when this happens.
    Usage,

    /// A value is outside what can be encoded.
    ///
    /// This happens for tag numbers above 16383 and for lengths that need
    /// more than four octets.
    Range,

    /// Reading input or writing output failed.
    Io,

    /// Streamed content doesn’t match the length announced in its header.
    Consistency,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Usage => "usage error",
            ErrorKind::Range => "value out of range",
            ErrorKind::Io => "I/O error",
            ErrorKind::Consistency => "inconsistent content",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


//------------ Error ---------------------------------------------------------

/// An error that happened while encoding a certificate pair.
///
/// The error carries its [`ErrorKind`], a human readable message, and,
/// for I/O failures, the underlying error as its source.
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn error::Error + Send + Sync + 'static>>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Error { kind, message: message.into(), source: None }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    /// Creates a range error.
    pub fn range(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Range, message)
    }

    /// Creates a consistency error.
    pub fn consistency(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Consistency, message)
    }

    /// Creates an I/O error wrapping the error that caused it.
    pub fn io(
        message: impl Into<Cow<'static, str>>,
        source: impl Into<Box<dyn error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Error {
            kind: ErrorKind::Io,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the kind of the error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message of the error.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::io("I/O operation failed", err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(source) = self.source.as_ref() {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("source", &self.source)
            .finish()
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source.as_ref().map(|err| {
            err.as_ref() as &(dyn error::Error + 'static)
        })
    }
}


//============ Tests =========================================================
