//! Encoded sizes.
//!
//! DER puts the length of every value in front of its content. The
//! functions in this module calculate these sizes up front from nothing but
//! tag numbers and content lengths, so that headers can be written before
//! any of the content they describe has been seen.

use crate::error::Error;
use crate::ident::Tag;
use crate::length::Length;


/// Returns the number of identifier octets for a tag number.
///
/// This is 1 for numbers up to 30, 2 for numbers up to 127, and 3 for
/// numbers up to 16383. Larger numbers are a range error.
pub fn tag_len(number: u32) -> Result<usize, Error> {
    Ok(Tag::ctx(number)?.encoded_len())
}

/// Returns the number of length octets for content of `len` octets.
///
/// Lengths above `u32::MAX` are a range error.
pub fn length_len(len: u64) -> Result<usize, Error> {
    Ok(Length::new(len)?.encoded_len())
}

/// Returns the size of a complete context specific value.
///
/// This is the sum of identifier octets, length octets, and the content
/// octets of a value tagged `[number]` with `len` octets of content.
pub fn context_object_len(number: u32, len: u64) -> Result<u64, Error> {
    Ok(total_len(Tag::ctx(number)?, Length::new(len)?))
}

/// Returns the size of a value with the given tag and content length.
pub fn total_len(tag: Tag, len: Length) -> u64 {
    let header = tag.encoded_len() + len.encoded_len();
    header as u64 + len.to_u64()
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn length_sizes() {
        let lens = [
            0, 1, 127, 128, 255, 256, 65535, 65536, 16777215, 16777216
        ];
        let sizes = [1, 1, 1, 2, 2, 3, 3, 4, 4, 5];
        for (len, size) in lens.into_iter().zip(sizes) {
            assert_eq!(length_len(len).unwrap(), size, "length {len}");
        }
        assert_eq!(length_len(u64::from(u32::MAX)).unwrap(), 5);
        assert_eq!(
            length_len(u64::from(u32::MAX) + 1).unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn tag_sizes() {
        let numbers = [0, 30, 31, 127, 128, 16383];
        let sizes = [1, 1, 2, 2, 3, 3];
        for (number, size) in numbers.into_iter().zip(sizes) {
            assert_eq!(tag_len(number).unwrap(), size, "tag {number}");
        }
        assert_eq!(tag_len(16384).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn context_object_sizes() {
        assert_eq!(context_object_len(0, 0).unwrap(), 2);
        assert_eq!(context_object_len(0, 3).unwrap(), 5);
        assert_eq!(context_object_len(1, 200).unwrap(), 203);
        assert_eq!(context_object_len(31, 128).unwrap(), 132);
        assert_eq!(context_object_len(999, 70000).unwrap(), 70007);
        assert_eq!(
            context_object_len(16384, 0).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            context_object_len(0, 1 << 32).unwrap_err().kind(),
            ErrorKind::Range
        );
    }
}
