//! The X.509 certificate pair.
//!
//! ITU-T Rec. X.509 defines a certificate pair as:
//!
//! ```text
//! CertificatePair ::= SEQUENCE {
//!     forward  [0] Certificate OPTIONAL,
//!     reverse  [1] Certificate OPTIONAL
//!     -- at least one of the pair shall be present --
//! }
//! ```
//!
//! The certificates are taken as opaque, already encoded content that is
//! streamed from a reader. Encoding happens in two steps. First, a
//! [`PairLayout`] with all the lengths is calculated from the content
//! lengths alone. Then the values are written front to back, each header
//! right before its content.

use std::io;
use bytes::{Bytes, BytesMut};
use tracing::debug;
use crate::encode::{Sink, Target, header_len, stream_content, write_header};
use crate::error::Error;
use crate::ident::{Form, Tag};
use crate::length::Length;


//------------ Content -------------------------------------------------------

/// The content of one certificate of the pair.
///
/// This is a reader together with the number of octets it will provide.
/// The length has to be known before anything is written, but the octets
/// themselves are only read while encoding.
#[derive(Clone, Debug)]
pub struct Content<R> {
    len: Length,
    source: R,
}

impl<R> Content<R> {
    /// Creates new content of `len` octets to be read from `source`.
    pub fn new(len: u64, source: R) -> Result<Self, Error> {
        Ok(Content { len: Length::new(len)?, source })
    }

    /// Returns the number of content octets.
    pub fn len(&self) -> Length {
        self.len
    }

    /// Returns whether the content is empty.
    pub fn is_empty(&self) -> bool {
        self.len == Length::ZERO
    }
}

impl<'a> Content<&'a [u8]> {
    /// Creates content from a slice.
    pub fn from_slice(data: &'a [u8]) -> Result<Self, Error> {
        Content::new(data.len() as u64, data)
    }
}


//------------ CertificatePair -----------------------------------------------

/// A certificate pair ready to be encoded.
///
/// At least one of the two certificates is always present.
#[derive(Clone, Debug)]
pub struct CertificatePair<R> {
    forward: Option<Content<R>>,
    reverse: Option<Content<R>>,
    form: Form,
}

impl<R> CertificatePair<R> {
    /// The tag of the forward certificate.
    pub const FORWARD_TAG: Tag = Tag::CTX_0;

    /// The tag of the reverse certificate.
    pub const REVERSE_TAG: Tag = Tag::CTX_1;

    /// Creates a new pair.
    ///
    /// The certificates are tagged in constructed form, since their
    /// content is itself an encoded certificate. Returns a usage error if
    /// neither certificate is given.
    pub fn new(
        forward: Option<Content<R>>, reverse: Option<Content<R>>
    ) -> Result<Self, Error> {
        if forward.is_none() && reverse.is_none() {
            return Err(Error::usage(
                "at least one of forward and reverse certificate is required"
            ))
        }
        Ok(CertificatePair { forward, reverse, form: Form::Constructed })
    }

    /// Changes the form used for the certificate tags.
    pub fn with_form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }

    /// Returns the forward certificate, if present.
    pub fn forward(&self) -> Option<&Content<R>> {
        self.forward.as_ref()
    }

    /// Returns the reverse certificate, if present.
    pub fn reverse(&self) -> Option<&Content<R>> {
        self.reverse.as_ref()
    }

    /// Calculates the layout of the encoded pair.
    ///
    /// Fails with a range error if the content of the outer sequence
    /// would need more than four length octets.
    pub fn layout(&self) -> Result<PairLayout, Error> {
        let forward = self.forward.as_ref().map(|content| {
            ChildLayout::new(Self::FORWARD_TAG, self.form, content.len)
        });
        let reverse = self.reverse.as_ref().map(|content| {
            ChildLayout::new(Self::REVERSE_TAG, self.form, content.len)
        });
        let total = forward.iter().chain(reverse.iter()).fold(
            0, |total, child| total + child.encoded_len()
        );
        let layout = PairLayout {
            content_len: Length::new(total)?,
            forward, reverse
        };
        debug!(
            "layout: sequence content {} octets, forward {:?}, reverse {:?}",
            layout.content_len,
            layout.forward.map(|child| child.encoded_len()),
            layout.reverse.map(|child| child.encoded_len()),
        );
        Ok(layout)
    }
}

impl<R: io::Read> CertificatePair<R> {
    /// Encodes the pair into `sink`.
    ///
    /// Returns the layout that was written. If this fails, the sink
    /// contains an incomplete encoding that can’t be repaired.
    pub fn encode<T: Target>(
        self, sink: &mut Sink<T>
    ) -> Result<PairLayout, Error> {
        let layout = self.layout()?;
        write_header(
            sink, Tag::SEQUENCE, Form::Constructed, layout.content_len
        )?;
        let start = sink.written();
        for (child, content) in [
            (layout.forward, self.forward),
            (layout.reverse, self.reverse),
        ] {
            if let (Some(child), Some(mut content)) = (child, content) {
                write_header(sink, child.tag, child.form, child.content_len)?;
                stream_content(&mut content.source, content.len, sink)?;
            }
        }
        let written = sink.written() - start;
        if layout.content_len != written {
            return Err(Error::consistency(format!(
                "wrote {} octets of sequence content, announced {}",
                written, layout.content_len
            )))
        }
        debug!("encoded {} octets", layout.encoded_len());
        Ok(layout)
    }
}

impl<'a> CertificatePair<&'a [u8]> {
    /// Creates a pair from in-memory certificates.
    pub fn from_slices(
        forward: Option<&'a [u8]>, reverse: Option<&'a [u8]>
    ) -> Result<Self, Error> {
        Self::new(
            forward.map(Content::from_slice).transpose()?,
            reverse.map(Content::from_slice).transpose()?,
        )
    }

    /// Encodes the pair into a new bytes value.
    pub fn to_bytes(self) -> Result<Bytes, Error> {
        let capacity = usize::try_from(
            self.layout()?.encoded_len()
        ).unwrap_or(0);
        let mut sink = Sink::new(BytesMut::with_capacity(capacity));
        self.encode(&mut sink)?;
        Ok(sink.into_target().freeze())
    }
}


//------------ PairLayout ----------------------------------------------------

/// The lengths of an encoded certificate pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PairLayout {
    content_len: Length,
    forward: Option<ChildLayout>,
    reverse: Option<ChildLayout>,
}

impl PairLayout {
    /// Returns the length of the content of the outer sequence.
    pub fn content_len(&self) -> Length {
        self.content_len
    }

    /// Returns the length of the complete encoding.
    pub fn encoded_len(&self) -> u64 {
        header_len(Tag::SEQUENCE, self.content_len) as u64
            + self.content_len.to_u64()
    }

    /// Returns the layout of the forward certificate, if present.
    pub fn forward(&self) -> Option<ChildLayout> {
        self.forward
    }

    /// Returns the layout of the reverse certificate, if present.
    pub fn reverse(&self) -> Option<ChildLayout> {
        self.reverse
    }
}


//------------ ChildLayout ---------------------------------------------------

/// The layout of one tagged certificate inside the pair.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChildLayout {
    tag: Tag,
    form: Form,
    content_len: Length,
}

impl ChildLayout {
    fn new(tag: Tag, form: Form, content_len: Length) -> Self {
        ChildLayout { tag, form, content_len }
    }

    /// Returns the context specific tag of the certificate.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns the form the tag is encoded in.
    pub fn form(&self) -> Form {
        self.form
    }

    /// Returns the length of the certificate itself.
    pub fn content_len(&self) -> Length {
        self.content_len
    }

    /// Returns the length of the complete tagged value.
    pub fn encoded_len(&self) -> u64 {
        header_len(self.tag, self.content_len) as u64
            + self.content_len.to_u64()
    }
}


//============ Tests =========================================================
