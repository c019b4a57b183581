//! The sink all encoded octets go through.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use crate::error::Error;
use super::target::Target;


//------------ Sink ----------------------------------------------------------

/// The exclusive writer of an encoding run.
///
/// A sink wraps a [`Target`] and is the one place where a failing write
/// turns into an [`Error`]. A write either transfers all of its data or
/// the encoding is over: there is no retrying and no way to take back what
/// has already been written.
///
/// The sink counts every octet written, which allows encoders to check
/// that what they wrote matches what they announced in a length.
pub struct Sink<T> {
    target: T,
    written: u64,
}

impl<T: Target> Sink<T> {
    /// Creates a new sink writing to `target`.
    pub fn new(target: T) -> Self {
        Sink { target, written: 0 }
    }

    /// Writes all of `data` to the target.
    pub fn write_all(&mut self, data: &[u8]) -> Result<(), Error> {
        self.target.write_all(data).map_err(|err| {
            Error::io(
                format!("writing output failed after {} octets", self.written),
                err
            )
        })?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Returns the number of octets written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes the target and returns it.
    pub fn finish(mut self) -> Result<T, Error> {
        self.target.flush().map_err(|err| {
            Error::io("flushing output failed", err)
        })?;
        Ok(self.target)
    }

    /// Returns the target without flushing.
    pub fn into_target(self) -> T {
        self.target
    }
}


//============ Tests =========================================================
