//! Encoding X.509 certificate pairs in Distinguished Encoding Rules.
//!
//! The crate writes the `CertificatePair` structure of ITU-T Rec. X.509,
//! a SEQUENCE with two optional context tagged certificates, as DER. The
//! certificates themselves are streamed from readers, so neither has to be
//! held in memory.
//!
//! The building blocks are the usual parts of a DER encoder:
//! [`Tag`] for the identifier octets, [`Length`] for the length octets,
//! the [`size`] functions that calculate encoded sizes up front, and the
//! [`encode`] module with the [`Sink`][encode::Sink] everything is written
//! through. [`CertificatePair`] puts them together. The [`crosscert`]
//! module contains the file handling of the `crosscert` tool.

pub use self::error::{Error, ErrorKind};
pub use self::ident::{
    Class, Form, Tag, encode_context_tag, encode_low_tag
};
pub use self::length::Length;
pub use self::pair::{CertificatePair, ChildLayout, Content, PairLayout};

pub mod crosscert;
pub mod encode;
pub mod size;

mod error;
mod ident;
mod length;
mod pair;
