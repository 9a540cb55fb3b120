use crate::clients::Exchanger;
use crate::clients::StatsBuilder;
use crate::{Error, Message, Result, Stats};
use log::debug;
use std::io;
use std::net::SocketAddr;
use std::net::ToSocketAddrs;
use std::net::UdpSocket;
use std::time::Duration;

/// Largest reply we are prepared to read. Anything longer is cut short by
/// the socket and will fail to parse.
const MAX_REPLY_SIZE: usize = 4096;

/// A UDP DNS Client.
///
/// Each exchange opens a fresh socket, sends the query as a single datagram
/// and blocks on one read bounded by the read timeout. There are no retries.
///
/// # Example
///
/// ```rust,no_run
/// use ddnsr::clients::Exchanger;
/// use ddnsr::clients::UdpClient;
/// use ddnsr::{Class, Message, Type};
///
/// fn main() -> Result<(), ddnsr::Error> {
///     let mut query = Message::query(0xFEFF, true);
///     query.add_question("bramp.net", Type::A.into(), Class::Internet.into())?;
///
///     let response = UdpClient::new("1.1.1.1:53")?.exchange(&query)?;
///     response.validate(&query)?;
///
///     println!("{}", response);
///     Ok(())
/// }
/// ```
///
/// See <https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1>
#[derive(Clone, Debug)]
pub struct Client {
    server: SocketAddr,

    read_timeout: Duration,
}

impl Client {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new Client for the given server. If `server` resolves to
    /// several addresses the first is used.
    pub fn new<A: ToSocketAddrs>(server: A) -> Result<Self> {
        let server = server
            .to_socket_addrs()
            .map_err(Error::Transport)?
            .next()
            .ok_or_else(|| {
                Error::Transport(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "server address resolved to nothing",
                ))
            })?;

        Ok(Self {
            server,
            read_timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Sets how long to wait for the reply.
    pub fn with_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub fn timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Sends `req` as one datagram and returns the raw reply, without
    /// parsing it.
    pub fn send_recv(&self, req: &[u8]) -> Result<(Vec<u8>, Stats)> {
        // The socket refuses a zero read timeout, and no reply can beat it.
        if self.read_timeout.is_zero() {
            return Err(Error::Timeout(self.read_timeout));
        }

        let bind = match self.server {
            SocketAddr::V4(_) => "0.0.0.0:0",
            SocketAddr::V6(_) => "[::]:0",
        };

        let socket = UdpSocket::bind(bind).map_err(Error::Transport)?;
        socket
            .set_read_timeout(Some(self.read_timeout))
            .map_err(Error::Transport)?;

        // Connect us to the server, meaning recv will only receive directly
        // from the server.
        socket.connect(self.server).map_err(Error::Transport)?;

        debug!("sending {} bytes to {}", req.len(), self.server);

        let stats = StatsBuilder::start(req.len());
        socket.send(req).map_err(Error::Transport)?;

        let mut buf = vec![0; MAX_REPLY_SIZE];
        let len = match socket.recv(&mut buf) {
            Ok(len) => len,
            Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
                return Err(Error::Timeout(self.read_timeout))
            }
            Err(e) => return Err(Error::Transport(e)),
        };
        buf.truncate(len);

        debug!("received {} bytes from {}", len, self.server);

        Ok((buf, stats.end(self.server, len)))
    }
}

impl Exchanger for Client {
    /// Sends the query [`Message`] to the `server` via UDP and returns the
    /// parsed reply.
    fn exchange(&self, query: &Message) -> Result<Message> {
        let req = query.to_vec()?;
        let (buf, stats) = self.send_recv(&req)?;

        let mut resp = Message::from_slice(&buf)?;
        resp.stats = Some(stats);

        Ok(resp)
    }
}
