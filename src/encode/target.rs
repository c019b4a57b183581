//! Targets for encoding.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::{error, io};
use std::convert::Infallible;
use bytes::BytesMut;


//------------ Target --------------------------------------------------------

/// A target for encoding.
///
/// This type provides a simplified version of `io::Write` that allows an
/// implementing type to define its own error type. The main purpose is to
/// be able to set the error to `Infallible` for in-memory targets.
pub trait Target {
    /// The error type of the target.
    type Error: error::Error + Send + Sync + 'static;

    /// Writes all of the data to the target.
    ///
    /// A target must either write all of `data` or fail.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flushes any buffered data to the underlying resource.
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Target for Vec<u8> {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}

impl Target for BytesMut {
    type Error = Infallible;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(data);
        Ok(())
    }
}


//------------ IoTarget ------------------------------------------------------

/// A wrapper around a `io::Write` type providing it as a target.
pub struct IoTarget<W>(W);

impl<W> IoTarget<W> {
    /// Creates a new target from an IO writer.
    pub fn new(writer: W) -> Self {
        Self(writer)
    }

    /// Converts the target back into its underlying writer.
    pub fn into_writer(self) -> W {
        self.0
    }
}

impl<W: io::Write> Target for IoTarget<W> {
    type Error = io::Error;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn in_memory_targets() {
        let mut vec = Vec::new();
        vec.write_all(b"\x30").unwrap();
        vec.write_all(b"\x00").unwrap();
        assert_eq!(vec, b"\x30\x00");

        let mut bytes = BytesMut::new();
        bytes.write_all(b"\xa0\x00").unwrap();
        assert_eq!(bytes.as_ref(), b"\xa0\x00");
    }

    #[test]
    fn io_target() {
        let mut target = IoTarget::new(io::Cursor::new(Vec::new()));
        target.write_all(b"\x81\x01\xff").unwrap();
        target.flush().unwrap();
        assert_eq!(target.into_writer().into_inner(), b"\x81\x01\xff");
    }
}
