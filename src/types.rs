//! Lookup tables between the symbolic names and numeric codes used in
//! messages. These are immutable and need no initialisation.

use std::net::SocketAddr;
use std::time::{Duration, SystemTime};
use strum_macros::{Display, EnumString};

/// Resource Record Type, for example, A, CNAME or SOA.
///
/// Records and questions carry the raw 16 bit code, so types missing from
/// this table still round trip. `Type::from_str` looks a name up,
/// `Type::from_u16` (via [`num_traits::FromPrimitive`]) a code.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u16)]
pub enum Type {
    /// (Default) IPv4 Address.
    A = 1,

    /// Authoritative name server.
    NS = 2,

    /// Canonical name for an alias.
    CNAME = 5,

    /// Start of a zone of authority.
    SOA = 6,

    /// Domain name pointer.
    PTR = 12,

    /// Mail exchange.
    MX = 15,

    /// Text strings.
    TXT = 16,

    /// IPv6 Address. See [rfc3596].
    ///
    /// [rfc3596]: https://datatracker.ietf.org/doc/html/rfc3596
    AAAA = 28,

    /// Any record type. Only valid as a Question Type.
    #[strum(to_string = "ANY", serialize = "ALL", serialize = "*")]
    ANY = 255,
}

impl Default for Type {
    fn default() -> Self {
        Type::A
    }
}

impl From<Type> for u16 {
    fn from(t: Type) -> u16 {
        t as u16
    }
}

impl Type {
    /// Name of a type code, or `TYPE<n>` (rfc3597) for codes not in the table.
    pub fn describe(code: u16) -> String {
        match num_traits::FromPrimitive::from_u16(code) {
            Some(t) => Type::to_string(&t),
            None => format!("TYPE{}", code),
        }
    }
}

/// Resource Record Class, for example Internet.
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq, Hash)]
#[strum(ascii_case_insensitive)]
#[repr(u16)]
pub enum Class {
    /// (Default) The Internet (IN), see [rfc1035].
    ///
    /// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
    #[strum(serialize = "IN")]
    Internet = 1,

    /// CSNET (CS), obsolete (used only for examples in some obsolete RFCs).
    #[strum(serialize = "CS")]
    CsNet = 2,

    /// Chaosnet (CH), obsolete LAN protocol created at MIT in the mid-1970s.
    #[strum(serialize = "CH")]
    Chaos = 3,

    /// Hesiod (HS), an information service developed by MIT's Project Athena.
    #[strum(serialize = "HS")]
    Hesiod = 4,

    /// NONE [RFC2136]
    #[strum(serialize = "NONE")]
    None = 254,

    /// * (ANY) See [rfc1035]
    ///
    /// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
    #[strum(to_string = "ANY", serialize = "*")]
    Any = 255,
}

impl Default for Class {
    fn default() -> Self {
        Class::Internet
    }
}

impl From<Class> for u16 {
    fn from(c: Class) -> u16 {
        c as u16
    }
}

impl Class {
    /// Name of a class code, or `CLASS<n>` (rfc3597) for codes not in the table.
    pub fn describe(code: u16) -> String {
        match num_traits::FromPrimitive::from_u16(code) {
            Some(c) => Class::to_string(&c),
            None => format!("CLASS{}", code),
        }
    }
}

/// Specifies kind of query in this message. See [rfc1035], [rfc6895] and <https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-5>
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
/// [rfc6895]: https://datatracker.ietf.org/doc/html/rfc6895
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)] // Really only 4 bits
pub enum Opcode {
    Query = 0,

    /// Inverse Query (OBSOLETE). See [rfc3425].
    ///
    /// [rfc3425]: https://datatracker.ietf.org/doc/html/rfc3425
    IQuery = 1,
    Status = 2,

    /// See [rfc1996]
    ///
    /// [rfc1996]: https://datatracker.ietf.org/doc/html/rfc1996
    Notify = 4,

    /// See [rfc2136]
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    Update = 5,

    /// DNS Stateful Operations (DSO). See [rfc8490]
    ///
    /// [rfc8490]: https://datatracker.ietf.org/doc/html/rfc8490
    DSO = 6,
    // 3 and 7-15 Remain unassigned.
}

/// Response Codes.
/// See [rfc1035] and <https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6>
///
/// An error code in a reply is not a failure of the exchange, it is up to
/// the caller to interpret it.
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
pub enum Rcode {
    /// No Error
    NoError = 0,

    /// Format Error
    FormErr = 1,

    /// Server Failure
    ServFail = 2,

    /// Non-Existent Domain
    NXDomain = 3,

    /// Not Implemented
    NotImp = 4,

    /// Query Refused
    Refused = 5,

    /// Name Exists when it should not. See [rfc2136] and [rfc6672].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    /// [rfc6672]: https://datatracker.ietf.org/doc/html/rfc6672
    YXDomain = 6,

    /// RR Set Exists when it should not. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    YXRRSet = 7,

    /// RR Set that should exist does not. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    NXRRSet = 8,

    /// Not Authoritative [rfc2136] or Not Authorized [rfc2845].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    /// [rfc2845]: https://datatracker.ietf.org/doc/html/rfc2845
    NotAuth = 9,

    /// Name not contained in zone. See [rfc2136].
    ///
    /// [rfc2136]: https://datatracker.ietf.org/doc/html/rfc2136
    NotZone = 10,

    /// DSO-TYPE Not Implemented. See [rfc8490].
    ///
    /// [rfc8490]: https://datatracker.ietf.org/doc/html/rfc8490
    DSOTYPENI = 11,
    // 12-15 Unassigned
}

/// Statistics about one request/response exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    /// When the request was sent.
    pub start: SystemTime,

    /// Time between sending the request and receiving the reply.
    pub duration: Duration,

    /// The server that replied.
    pub server: SocketAddr,

    /// Size of the request datagram in bytes.
    pub request_size: usize,

    /// Size of the reply datagram in bytes.
    pub response_size: usize,
}
