//! The identifier octets of a DER encoded value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use smallvec::SmallVec;
use crate::encode::header_octets;
use crate::error::Error;
use crate::length::Length;


//------------ Class ---------------------------------------------------------

/// The class of a tag.
///
/// The class is kept in the two most significant bits of the first
/// identifier octet.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Class {
    /// The universal class, `0b00`.
    Universal,

    /// The application class, `0b01`.
    Application,

    /// The context specific class, `0b10`.
    ContextSpecific,

    /// The private class, `0b11`.
    Private,
}

impl Class {
    /// Returns the bits of the first identifier octet for this class.
    pub const fn mask(self) -> u8 {
        match self {
            Class::Universal => 0x00,
            Class::Application => 0x40,
            Class::ContextSpecific => 0x80,
            Class::Private => 0xc0,
        }
    }
}


//------------ Form ----------------------------------------------------------

/// The encoding form of a value.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Form {
    /// The content octets are the value itself.
    Primitive,

    /// The content octets are a sequence of encoded values.
    Constructed,
}

impl Form {
    /// Returns the bit of the first identifier octet for this form.
    pub const fn mask(self) -> u8 {
        match self {
            Form::Primitive => 0,
            Form::Constructed => Tag::CONSTRUCTED_MASK,
        }
    }
}


//------------ Tag -----------------------------------------------------------

/// The tag of a DER encoded value.
///
/// Each encoded value starts with one or more identifier octets. They
/// carry the class and number of the tag as well as whether the value is
/// primitive or constructed. The `Tag` type holds class and number only;
/// the form is provided when encoding.
///
/// There are two ways to encode the number:
///
/// * low tag number (for numbers between 0 and 30): one octet. Bits 8 and
///   7 give the class, bit 6 is set for constructed values, and bits 5 to
///   1 give the number.
/// * high tag number (for numbers 31 and greater): the first octet is as
///   above except that bits 5 to 1 are all set. The number follows base
///   128, most significant digit first, with bit 8 set in every octet but
///   the last.
///
/// # Limitations
///
/// We only ever produce up to two octets after the first one. That is,
/// tag numbers are limited to between 0 and 16383.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Tag {
    class: Class,
    number: u32,
}

/// # Constants for Used Tag Values
///
impl Tag {
    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Tag::new_unchecked(Class::Universal, 16);

    /// The context specific tag [0].
    pub const CTX_0: Self = Tag::new_unchecked(Class::ContextSpecific, 0);

    /// The context specific tag [1].
    pub const CTX_1: Self = Tag::new_unchecked(Class::ContextSpecific, 1);

    /// The largest supported tag number.
    pub const MAX_NUMBER: u32 = 0x3fff;

    /// The largest tag number that fits into the first octet.
    pub const MAX_LOW_NUMBER: u32 = 0x1e;

    /// The largest tag number that fits into a single following octet.
    const MAX_VAL_SPAN_1_OCTET: u32 = 0x7f;

    /// The mask for the constructed bit.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The value of bits 5 to 1 that signals that the number follows.
    const SINGLEBYTE_DATA_MASK: u8 = 0x1f;

    /// The mask for the data bits of following octets.
    const MULTIBYTE_DATA_MASK: u8 = 0x7f;

    /// The bit that is set in all following octets but the last.
    const LAST_OCTET_MASK: u8 = 0x80;
}

impl Tag {
    const fn new_unchecked(class: Class, number: u32) -> Self {
        Tag { class, number }
    }

    /// Creates a new tag of the given class and number.
    ///
    /// Returns a range error if the number is larger than
    /// [`Tag::MAX_NUMBER`].
    pub fn new(class: Class, number: u32) -> Result<Self, Error> {
        if number > Tag::MAX_NUMBER {
            return Err(Error::range(format!(
                "tag number {} exceeds the maximum of {}",
                number, Tag::MAX_NUMBER
            )))
        }
        Ok(Tag::new_unchecked(class, number))
    }

    /// Creates a new tag in the universal class.
    pub fn universal(number: u32) -> Result<Self, Error> {
        Tag::new(Class::Universal, number)
    }

    /// Creates a new tag in the application class.
    pub fn application(number: u32) -> Result<Self, Error> {
        Tag::new(Class::Application, number)
    }

    /// Creates a new tag in the context specific class.
    pub fn ctx(number: u32) -> Result<Self, Error> {
        Tag::new(Class::ContextSpecific, number)
    }

    /// Creates a new tag in the private class.
    pub fn private(number: u32) -> Result<Self, Error> {
        Tag::new(Class::Private, number)
    }

    /// Returns the class of the tag.
    pub fn class(self) -> Class {
        self.class
    }

    /// Returns the number of the tag.
    pub fn number(self) -> u32 {
        self.number
    }

    /// Returns the number of identifier octets for the tag.
    pub fn encoded_len(self) -> usize {
        if self.number <= Tag::MAX_LOW_NUMBER {
            1
        }
        else if self.number <= Tag::MAX_VAL_SPAN_1_OCTET {
            2
        }
        else {
            3
        }
    }

    /// Returns the identifier octets for the tag in the given form.
    pub fn to_octets(self, form: Form) -> SmallVec<[u8; 3]> {
        let first = self.class.mask() | form.mask();
        let mut res = SmallVec::new();
        if self.number <= Tag::MAX_LOW_NUMBER {
            res.push(first | self.number as u8);
        }
        else if self.number <= Tag::MAX_VAL_SPAN_1_OCTET {
            res.push(first | Tag::SINGLEBYTE_DATA_MASK);
            res.push(self.number as u8);
        }
        else {
            res.push(first | Tag::SINGLEBYTE_DATA_MASK);
            res.push(
                Tag::MULTIBYTE_DATA_MASK & ((self.number >> 7) as u8)
                | Tag::LAST_OCTET_MASK
            );
            res.push(Tag::MULTIBYTE_DATA_MASK & (self.number as u8));
        }
        debug_assert_eq!(res.len(), self.encoded_len());
        res
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.class {
            Class::Universal => write!(f, "[UNIVERSAL {}]", self.number),
            Class::Application => write!(f, "[APPLICATION {}]", self.number),
            Class::ContextSpecific => write!(f, "[{}]", self.number),
            Class::Private => write!(f, "[PRIVATE {}]", self.number),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}


//------------ encode_low_tag ------------------------------------------------

/// Returns the single identifier octet for a low tag number.
///
/// The number must be between 0 and 30. Number 31 would announce a high
/// tag number following in further octets and is refused along with all
/// larger numbers.
pub fn encode_low_tag(
    number: u32, class: Class, form: Form
) -> Result<u8, Error> {
    if number > Tag::MAX_LOW_NUMBER {
        return Err(Error::range(format!(
            "tag number {} needs more than one identifier octet", number
        )))
    }
    Ok(class.mask() | form.mask() | number as u8)
}


//------------ encode_context_tag --------------------------------------------

/// Returns the identifier and length octets of a context specific value.
///
/// This is the complete header of a value tagged `[number]` with content
/// of `value_len` octets. Fails with a range error if the tag number is
/// above 16383 or the length needs more than four octets.
pub fn encode_context_tag(
    number: u32, form: Form, value_len: u64
) -> Result<SmallVec<[u8; 8]>, Error> {
    Ok(header_octets(Tag::ctx(number)?, form, Length::new(value_len)?))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;

    const CLASSES: &[Class] = &[
        Class::Universal, Class::Application,
        Class::ContextSpecific, Class::Private
    ];

    #[test]
    fn low_tags() {
        assert_eq!(
            encode_low_tag(16, Class::Universal, Form::Constructed).unwrap(),
            0x30
        );
        assert_eq!(
            encode_low_tag(0, Class::ContextSpecific, Form::Constructed)
                .unwrap(),
            0xa0
        );
        assert_eq!(
            encode_low_tag(1, Class::ContextSpecific, Form::Primitive)
                .unwrap(),
            0x81
        );
        assert_eq!(
            encode_low_tag(3, Class::Application, Form::Primitive).unwrap(),
            0x43
        );
        assert_eq!(
            encode_low_tag(30, Class::Private, Form::Constructed).unwrap(),
            0xfe
        );
        for &class in CLASSES {
            for number in 0..=Tag::MAX_LOW_NUMBER {
                let octet = encode_low_tag(
                    number, class, Form::Primitive
                ).unwrap();
                assert_eq!(
                    Tag::new(class, number).unwrap()
                        .to_octets(Form::Primitive).as_slice(),
                    &[octet]
                );
            }
        }
    }

    #[test]
    fn low_tag_refuses_sentinel() {
        for number in [31, 32, 0x3fff, u32::MAX] {
            assert_eq!(
                encode_low_tag(
                    number, Class::ContextSpecific, Form::Primitive
                ).unwrap_err().kind(),
                ErrorKind::Range
            );
        }
    }

    #[test]
    fn two_octet_tags() {
        for &class in CLASSES {
            for number in 31..=0x7f {
                let tag = Tag::new(class, number).unwrap();
                assert_eq!(tag.encoded_len(), 2);
                assert_eq!(
                    tag.to_octets(Form::Primitive).as_slice(),
                    &[class.mask() | 0x1f, number as u8]
                );
            }
        }
    }

    #[test]
    fn three_octet_tags() {
        let range = (0x80..0x85).chain(0x3ffa..=0x3fff);
        for number in range {
            let tag = Tag::ctx(number).unwrap();
            assert_eq!(tag.encoded_len(), 3);
            assert_eq!(
                tag.to_octets(Form::Constructed).as_slice(),
                &[
                    0xbf,
                    (number >> 7) as u8 | 0x80,
                    number as u8 & 0x7f,
                ]
            );
        }
        assert_eq!(
            Tag::ctx(999).unwrap().to_octets(Form::Primitive).as_slice(),
            b"\x9f\x87\x67"
        );
    }

    #[test]
    fn too_large_tags() {
        assert_eq!(Tag::ctx(16384).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(
            Tag::universal(u32::MAX).unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            encode_context_tag(16384, Form::Primitive, 0)
                .unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn context_tags() {
        assert_eq!(
            encode_context_tag(0, Form::Constructed, 3).unwrap().as_slice(),
            b"\xa0\x03"
        );
        assert_eq!(
            encode_context_tag(1, Form::Primitive, 200).unwrap().as_slice(),
            b"\x81\x81\xc8"
        );
        assert_eq!(
            encode_context_tag(31, Form::Primitive, 0).unwrap().as_slice(),
            b"\x9f\x1f\x00"
        );
        assert_eq!(
            encode_context_tag(16383, Form::Constructed, 0x1_0000)
                .unwrap().as_slice(),
            b"\xbf\xff\x7f\x83\x01\x00\x00"
        );
        assert_eq!(
            encode_context_tag(0, Form::Primitive, 0x1_0000_0000)
                .unwrap_err().kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn context_tags_are_headers() {
        for (number, len) in [(0, 0), (1, 0x80), (30, 0xffff), (200, 70_000)] {
            for form in [Form::Primitive, Form::Constructed] {
                assert_eq!(
                    encode_context_tag(number, form, len).unwrap(),
                    header_octets(
                        Tag::ctx(number).unwrap(), form,
                        Length::new(len).unwrap()
                    )
                );
            }
        }
    }

    #[test]
    fn constants() {
        assert_eq!(Tag::SEQUENCE.to_octets(Form::Constructed).as_slice(), b"\x30");
        assert_eq!(Tag::CTX_0, Tag::ctx(0).unwrap());
        assert_eq!(Tag::CTX_1, Tag::ctx(1).unwrap());
        assert_eq!(format!("{:?}", Tag::CTX_1), "[1]");
        assert_eq!(format!("{}", Tag::SEQUENCE), "[UNIVERSAL 16]");
    }
}
