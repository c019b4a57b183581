//! Streaming content octets.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::io;
use tracing::trace;
use crate::error::Error;
use crate::length::Length;
use super::sink::Sink;
use super::target::Target;


/// The size of the chunks content is copied in.
const CHUNK_SIZE: usize = 8 * 1024;

/// Copies exactly `len` octets of content from `source` to `sink`.
///
/// The content is never held in memory as a whole. The header written
/// before the content announced `len` octets, so a source that ends
/// early or that still has data left after `len` octets is a consistency
/// error.
pub fn stream_content<R: io::Read, T: Target>(
    source: &mut R, len: Length, sink: &mut Sink<T>
) -> Result<(), Error> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut remaining = len.to_u64();
    while remaining > 0 {
        let want = usize::try_from(remaining).map_or(
            CHUNK_SIZE, |remaining| remaining.min(CHUNK_SIZE)
        );
        #[allow(clippy::indexing_slicing)]
        let read = read_some(source, &mut buf[..want])?;
        if read == 0 {
            return Err(Error::consistency(format!(
                "content ended after {} of {} announced octets",
                len.to_u64() - remaining, len
            )))
        }
        #[allow(clippy::indexing_slicing)]
        sink.write_all(&buf[..read])?;
        remaining -= read as u64;
    }
    if read_some(source, &mut [0u8])? != 0 {
        return Err(Error::consistency(format!(
            "content is longer than the {} announced octets", len
        )))
    }
    trace!("streamed {} content octets", len);
    Ok(())
}

/// Reads into `buf`, retrying when interrupted.
fn read_some<R: io::Read>(
    source: &mut R, buf: &mut [u8]
) -> Result<usize, Error> {
    loop {
        match source.read(buf) {
            Ok(read) => return Ok(read),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => { }
            Err(err) => return Err(Error::io("reading content failed", err)),
        }
    }
}


//============ Tests =========================================================
