use crate::clients::udp::Client as UdpClient;
use crate::clients::Exchanger;
use crate::{Class, Message, Result};
use log::{debug, trace};
use std::net::ToSocketAddrs;
use std::time::Duration;

/// Drives a single query for one hostname through an [`Exchanger`].
///
/// Each call to [`Resolver::query`] builds a request holding exactly one
/// question, sends it once, and validates the reply against it. Failures of
/// any kind end the exchange; nothing is retried.
///
/// # Example
///
/// ```rust,no_run
/// use ddnsr::clients::Resolver;
/// use ddnsr::Type;
/// use std::time::Duration;
///
/// let resolver = Resolver::new("1.1.1.1:53", Duration::from_secs(3)).unwrap();
/// let reply = resolver.query("bramp.net", Type::MX.into()).unwrap();
/// println!("{}", reply);
/// ```
pub struct Resolver<E = UdpClient> {
    client: E,

    recursion_desired: bool,

    /// Fixed transaction id. A fresh random one is used per query if unset.
    id: Option<u16>,
}

impl Resolver {
    /// Creates a new Resolver talking UDP to `server`.
    pub fn new<A: ToSocketAddrs>(server: A, timeout: Duration) -> Result<Resolver<UdpClient>> {
        let client = UdpClient::new(server)?.with_timeout(timeout);
        Ok(Resolver::new_with_client(client))
    }

    /// Like [`Resolver::query`], but also passes the request and reply
    /// datagrams to `dump`, labelled `"query"` and `"response"`, as they are
    /// sent and received.
    pub fn query_with_dump<F>(&self, host: &str, r#type: u16, mut dump: F) -> Result<Message>
    where
        F: FnMut(&str, &[u8]),
    {
        self.drive(host, r#type, |query| {
            let req = query.to_vec()?;
            dump("query", &req);

            let (buf, stats) = self.client.send_recv(&req)?;
            dump("response", &buf);

            let mut reply = Message::from_slice(&buf)?;
            reply.stats = Some(stats);
            Ok(reply)
        })
    }
}

impl<E> Resolver<E>
where
    E: Exchanger,
{
    pub fn new_with_client(client: E) -> Resolver<E> {
        Resolver {
            client,
            recursion_desired: true,
            id: None,
        }
    }

    /// Sets the RD flag on outgoing queries. Defaults to true.
    pub fn recursion_desired(mut self, rd: bool) -> Self {
        self.recursion_desired = rd;
        self
    }

    /// Uses `id` for every query instead of a random one.
    pub fn with_id(mut self, id: u16) -> Self {
        self.id = Some(id);
        self
    }

    pub fn client(&self) -> &E {
        &self.client
    }

    /// Builds the request for `host`: one question of type `r#type`, class IN.
    pub fn build_query(&self, host: &str, r#type: u16) -> Result<Message> {
        let id = self.id.unwrap_or_else(rand::random);

        let mut query = Message::query(id, self.recursion_desired);
        query.add_question(host, r#type, Class::Internet.into())?;

        // Label and name lengths are only checked on encode.
        query.to_vec()?;
        Ok(query)
    }

    /// Queries `host` for records of type `r#type` and returns the validated
    /// reply. A reply with an error rcode is still returned as `Ok`.
    pub fn query(&self, host: &str, r#type: u16) -> Result<Message> {
        self.drive(host, r#type, |query| self.client.exchange(query))
    }

    /// Runs one exchange: build, hand the query to `exchange`, validate.
    fn drive<F>(&self, host: &str, r#type: u16, exchange: F) -> Result<Message>
    where
        F: FnOnce(&Message) -> Result<Message>,
    {
        trace!("{}: building", host);
        let query = self.build_query(host, r#type)?;

        trace!("{}: awaiting reply to id {:#06x}", host, query.header.id);
        let result = exchange(&query).and_then(|reply| {
            reply.validate(&query)?;
            Ok(reply)
        });

        match &result {
            Ok(reply) => {
                debug!("{}: {}", host, reply.header);
                trace!("{}: done, {} answers", host, reply.answers.len());
            }
            Err(e) => {
                trace!("{}: failed", host);
                debug!("{}: {}", host, e);
            }
        }

        result
    }
}
