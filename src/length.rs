//! The length octets.
//!
//! This is a private module. Its public items are re-exported by the
//! parent.

use std::fmt;
use smallvec::SmallVec;
use crate::error::Error;


//------------ Length -------------------------------------------------------

/// The definite length of the content octets of an encoded value.
///
/// # DER Encoding
///
/// The length is encoded in one of two ways, determined by the most
/// significant bit of the first octet. If the length is less than 128,
/// that bit is clear and the octet is the length itself.
///
/// Otherwise, the bit is set and the remaining bits give the number of
/// octets that follow. These octets are the big-endian encoding of the
/// length. DER requires the minimal number of octets, so there are never
/// leading zero octets.
///
/// We support up to four following octets. Lengths are therefore limited
/// to `u32::MAX`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Length(u32);

impl Length {
    /// The length of empty content.
    pub const ZERO: Self = Length(0);

    /// The largest supported length.
    pub const MAX: Self = Length(u32::MAX);

    /// Creates a new length.
    ///
    /// Returns a range error if the length needs more than four octets.
    pub fn new(len: u64) -> Result<Self, Error> {
        u32::try_from(len).map(Length).map_err(|_| {
            Error::range(format!(
                "length {} needs more than four length octets", len
            ))
        })
    }

    /// Returns the length as a `u64`.
    pub fn to_u64(self) -> u64 {
        u64::from(self.0)
    }

    /// Adds two lengths, failing if the result doesn’t fit.
    pub fn checked_add(self, other: Length) -> Result<Self, Error> {
        Length::new(self.to_u64() + other.to_u64())
    }

    /// Returns the number of octets of the encoded length.
    pub fn encoded_len(self) -> usize {
        match self.0 {
            0..=0x7f => 1,
            0x80..=0xff => 2,
            0x100..=0xffff => 3,
            0x1_0000..=0xff_ffff => 4,
            _ => 5,
        }
    }

    /// Returns the encoded length octets.
    pub fn to_octets(self) -> SmallVec<[u8; 5]> {
        let mut res = SmallVec::new();
        if self.0 > 0x7f {
            // Panic: encoded_len is between 2 and 5 here, so the index is
            // within the four octets of the array.
            let idx = 5 - self.encoded_len();
            let octets = self.0.to_be_bytes();
            res.push((octets.len() - idx) as u8 | 0x80);
            #[allow(clippy::indexing_slicing)]
            res.extend_from_slice(&octets[idx..]);
        }
        else {
            res.push(self.0 as u8)
        }
        debug_assert_eq!(res.len(), self.encoded_len());
        res
    }
}


//--- From

impl From<u8> for Length {
    fn from(len: u8) -> Self {
        Length(len.into())
    }
}

impl From<u16> for Length {
    fn from(len: u16) -> Self {
        Length(len.into())
    }
}

impl From<u32> for Length {
    fn from(len: u32) -> Self {
        Length(len)
    }
}


//--- PartialEq

impl PartialEq<u64> for Length {
    fn eq(&self, other: &u64) -> bool {
        self.to_u64() == *other
    }
}


//--- Display

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn encode() {
        fn step<const N: usize>(l: u64, res: &[u8; N]) {
            let l = Length::new(l).unwrap();
            let octets = l.to_octets();
            assert_eq!(
                octets.as_slice(), res.as_ref(),
                "encoding failed for {l:?}: {octets:?}"
            );
            assert_eq!(l.encoded_len(), N);
        }

        step(0, b"\x00");
        step(0x12, b"\x12");
        step(0x7f, b"\x7f");
        step(0x80, b"\x81\x80");
        step(200, b"\x81\xc8");
        step(0xff, b"\x81\xff");
        step(0x100, b"\x82\x01\x00");
        step(0xdead, b"\x82\xde\xad");
        step(0x1_0000, b"\x83\x01\x00\x00");
        step(0xff_ffff, b"\x83\xff\xff\xff");
        step(0x100_0000, b"\x84\x01\x00\x00\x00");
        step(0xffff_ffff, b"\x84\xff\xff\xff\xff");
    }

    #[test]
    fn too_long() {
        assert_eq!(
            Length::new(0x1_0000_0000).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Length::MAX.checked_add(Length::from(1u8)).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            Length::from(3u8).checked_add(Length::from(4u8)).unwrap(),
            7u64
        );
    }
}
