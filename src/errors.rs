use std::io;
use std::time::Duration;
use strum_macros::Display;
use thiserror::Error;

/// The sections of a DNS message, in wire order.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Section {
    #[strum(serialize = "question")]
    Question,
    #[strum(serialize = "answer")]
    Answer,
    #[strum(serialize = "authority")]
    Authority,
    #[strum(serialize = "additional")]
    Additional,
}

/// Everything that can go wrong while encoding, decoding or exchanging a
/// DNS message.
///
/// Codec errors are never partial: once one is returned nothing of the
/// message being decoded is kept.
#[derive(Error, Debug)]
pub enum Error {
    /// Fewer than 12 bytes were available for the fixed header.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A label was too long, the name ran past the end of the buffer, or a
    /// compression pointer did not point strictly backwards.
    #[error("malformed name: {0}")]
    MalformedName(String),

    #[error("malformed question: {0}")]
    MalformedQuestion(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A section held fewer (or, when encoding, a different number of)
    /// entries than its header count declares.
    #[error("{section} section declares {expected} entries but {found} are present")]
    CountMismatch {
        section: Section,
        expected: u16,
        found: usize,
    },

    /// The reply parsed but does not answer the request.
    #[error("invalid reply: {0}")]
    Validation(#[from] ValidationError),

    /// Socket setup, send or receive failed.
    #[error("transport failure: {0}")]
    Transport(#[source] io::Error),

    /// No reply arrived before the read deadline.
    #[error("timed out after {0:?} waiting for a reply")]
    Timeout(Duration),
}

/// Reasons a well-formed reply is rejected for a given request.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("id mismatch: sent {request:#06x}, received {reply:#06x}")]
    IdMismatch { request: u16, reply: u16 },

    #[error("not a response")]
    NotResponse,

    #[error("response truncated")]
    Truncated,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns early with the named [`Error`] variant, formatting the message.
#[macro_export]
#[doc(hidden)]
macro_rules! bail {
    ($kind:ident, $($arg:tt)*) => {
        return Err($crate::Error::$kind(format!($($arg)*)))
    };
}
