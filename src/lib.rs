//! A small DNS client.
//!
//! The core is a codec for the [rfc1035] wire format: [`Header`], [`Name`]
//! (with label compression), [`Question`], [`Record`] and the [`Message`]
//! that ties them together. Replies are checked against their request with
//! [`Message::validate`], and render in `dig` style through `Display`.
//!
//! With the `clients` feature (on by default) the [`clients`] module adds a
//! blocking UDP transport and a [`clients::Resolver`] that drives one query
//! per hostname through it.
//!
//! [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
mod display;
mod errors;
mod header;
mod io;
mod message;
mod name;
mod question;
pub mod resource;
pub mod types;
mod validate;

#[cfg(feature = "clients")]
pub mod clients;

#[macro_use]
extern crate num_derive;

#[cfg(test)]
#[macro_use]
extern crate lazy_static;

pub use crate::errors::{Error, Result, Section, ValidationError};
pub use crate::header::Header;
pub use crate::message::Message;
pub use crate::name::Name;
pub use crate::question::Question;

// Pull up the various types that should be on the front page of the docs.
#[doc(inline)]
pub use crate::resource::{Record, Resource, MX, SOA, TXT};

#[doc(inline)]
pub use crate::types::{Class, Opcode, Rcode, Stats, Type};
