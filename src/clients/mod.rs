//! DNS clients: a UDP transport and a [`Resolver`] that drives one query
//! through it.
use crate::Message;

pub use self::resolver::Resolver;
pub use self::udp::Client as UdpClient;

mod resolver;
mod stats;
pub mod udp;

pub(crate) use self::stats::StatsBuilder;

/// Exchanger takes a query and returns a response.
///
/// The returned message is whatever the server sent back; checking that it
/// actually answers `query` is left to [`Message::validate`].
pub trait Exchanger {
    fn exchange(&self, query: &Message) -> crate::Result<Message>;
}
