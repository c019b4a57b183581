//! Encoding data in DER.
//!
//! This module provides the means to write DER encoded values to a
//! [`Target`].
//!
//! All writing happens through a [`Sink`], which wraps the target, turns
//! failed writes into errors and counts the octets written. Headers are
//! written via [`write_header`] once the length of the content is known.
//! Content octets that are too large to be held in memory can be copied
//! straight from a reader with [`stream_content`].

pub use self::header::{header_len, header_octets, write_header};
pub use self::sink::Sink;
pub use self::stream::stream_content;
pub use self::target::{IoTarget, Target};

mod header;
mod sink;
mod stream;
mod target;
