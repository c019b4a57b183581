//! Writing the header of a value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use smallvec::SmallVec;
use tracing::debug;
use crate::error::Error;
use crate::ident::{Form, Tag};
use crate::length::Length;
use super::sink::Sink;
use super::target::Target;


/// Returns the identifier and length octets of a value.
pub fn header_octets(
    tag: Tag, form: Form, len: Length
) -> SmallVec<[u8; 8]> {
    let mut res = SmallVec::new();
    res.extend_from_slice(&tag.to_octets(form));
    res.extend_from_slice(&len.to_octets());
    res
}

/// Returns the number of header octets of a value.
pub fn header_len(tag: Tag, len: Length) -> usize {
    tag.encoded_len() + len.encoded_len()
}

/// Writes the header of a value with content of `len` octets.
pub fn write_header<T: Target>(
    sink: &mut Sink<T>, tag: Tag, form: Form, len: Length
) -> Result<(), Error> {
    let octets = header_octets(tag, form, len);
    debug!(
        "header {} {:?} len {} at offset {}: {:02x?}",
        tag, form, len, sink.written(), octets.as_slice()
    );
    sink.write_all(&octets)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn headers() {
        let mut sink = Sink::new(Vec::new());
        write_header(
            &mut sink, Tag::SEQUENCE, Form::Constructed, Length::from(6u8)
        ).unwrap();
        write_header(
            &mut sink, Tag::CTX_0, Form::Primitive, Length::ZERO
        ).unwrap();
        write_header(
            &mut sink, Tag::CTX_1, Form::Constructed, Length::from(200u8)
        ).unwrap();
        assert_eq!(
            sink.into_target(),
            b"\x30\x06\x80\x00\xa1\x81\xc8"
        );
    }

    #[test]
    fn header_lengths() {
        let tag = Tag::ctx(16383).unwrap();
        let len = Length::MAX;
        assert_eq!(header_len(tag, len), 8);
        assert_eq!(header_octets(tag, Form::Primitive, len).len(), 8);
        assert!(!header_octets(tag, Form::Primitive, len).spilled());
    }
}
