//! The fixed 12 byte message header. See [rfc1035#section-4.1.1].
//!
//! ```text
//!                                 1  1  1  1  1  1
//!   0  1  2  3  4  5  6  7  8  9  0  1  2  3  4  5
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                      ID                       |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |QR|   Opcode  |AA|TC|RD|RA|   Z    |   RCODE   |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! |                    QDCOUNT                    |
//! |                    ANCOUNT                    |
//! |                    NSCOUNT                    |
//! |                    ARCOUNT                    |
//! +--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+--+
//! ```
//!
//! [rfc1035#section-4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1

use crate::bail;
use crate::errors::Result;
use crate::io::{cursor_at, CursorExt};
use crate::types::{Opcode, Rcode};
use byteorder::{ReadBytesExt, BE};
use num_traits::FromPrimitive;
use std::fmt;
use std::io::Cursor;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Header {
    /// 16-bit identifier assigned by the program that generates any kind of
    /// query. This identifier is copied into the corresponding reply and can be
    /// used by the requester to match up replies to outstanding queries.
    pub id: u16,

    /// QR, Opcode, AA, TC, RD, RA, Z and RCODE packed as on the wire. Use the
    /// flag constants on [`Header`] to test or change them.
    pub flags: u16,

    /// Number of entries in the question section.
    pub qd_count: u16,

    /// Number of resource records in the answer section.
    pub an_count: u16,

    /// Number of name server resource records in the authority section.
    pub ns_count: u16,

    /// Number of resource records in the additional section.
    pub ar_count: u16,
}

impl Header {
    /// Size of the header on the wire: 6 fields, 16 bits each.
    pub const SIZE: usize = 12;

    /// Specifies whether this message is a query (0), or a response (1).
    pub const RESPONSE: u16 = 0x8000;

    /// Authoritative Answer - the responding name server is an authority for
    /// the domain name in the question section.
    pub const AUTHORITATIVE: u16 = 0x0400;

    /// Truncation - this message was truncated.
    pub const TRUNCATED: u16 = 0x0200;

    /// Recursion Desired - directs the name server to pursue the query
    /// recursively.
    pub const RECURSION_DESIRED: u16 = 0x0100;

    /// Recursion Available - set in a response when the server supports
    /// recursive queries.
    pub const RECURSION_AVAILABLE: u16 = 0x0080;

    pub const OPCODE_MASK: u16 = 0x7800;
    pub const RCODE_MASK: u16 = 0x000F;

    pub fn has_flag(&self, flag: u16) -> bool {
        self.flags & flag != 0
    }

    pub fn set_flag(&mut self, flag: u16, on: bool) {
        if on {
            self.flags |= flag
        } else {
            self.flags &= !flag
        }
    }

    pub fn is_response(&self) -> bool {
        self.has_flag(Header::RESPONSE)
    }

    pub fn is_truncated(&self) -> bool {
        self.has_flag(Header::TRUNCATED)
    }

    /// The raw 4 bit opcode.
    pub fn opcode(&self) -> u8 {
        ((self.flags & Header::OPCODE_MASK) >> 11) as u8
    }

    /// The raw 4 bit response code.
    pub fn rcode(&self) -> u8 {
        (self.flags & Header::RCODE_MASK) as u8
    }

    /// Symbolic names of the flags set in this header, for diagnostics.
    pub fn flag_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for (flag, name) in [
            (Header::RESPONSE, "QR"),
            (Header::AUTHORITATIVE, "AA"),
            (Header::TRUNCATED, "TC"),
            (Header::RECURSION_DESIRED, "RD"),
            (Header::RECURSION_AVAILABLE, "RA"),
            (Header::RCODE_MASK, "RCODE-ERROR"),
        ] {
            if self.has_flag(flag) {
                names.push(name)
            }
        }
        names
    }

    /// Writes the header to `buf` in network order.
    pub fn write(&self, buf: &mut Vec<u8>) {
        for field in [
            self.id,
            self.flags,
            self.qd_count,
            self.an_count,
            self.ns_count,
            self.ar_count,
        ] {
            buf.extend_from_slice(&field.to_be_bytes());
        }
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Header::SIZE);
        self.write(&mut buf);
        buf
    }

    /// Decodes a header from the first 12 bytes of `buf`.
    pub fn from_slice(buf: &[u8]) -> Result<Header> {
        Header::read(&mut cursor_at(buf, 0))
    }

    pub(crate) fn read(cur: &mut Cursor<&[u8]>) -> Result<Header> {
        if cur.remaining() < Header::SIZE {
            bail!(
                MalformedHeader,
                "need {} bytes, only {} available",
                Header::SIZE,
                cur.remaining()
            );
        }

        let mut fields = [0_u16; 6];
        for field in fields.iter_mut() {
            *field = match cur.read_u16::<BE>() {
                Ok(v) => v,
                Err(e) => bail!(MalformedHeader, "{}", e),
            };
        }

        let [id, flags, qd_count, an_count, ns_count, ar_count] = fields;
        Ok(Header {
            id,
            flags,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        })
    }

    pub(crate) fn opcode_name(&self) -> String {
        match Opcode::from_u8(self.opcode()) {
            Some(opcode) => opcode.to_string(),
            None => self.opcode().to_string(),
        }
    }

    pub(crate) fn rcode_name(&self) -> String {
        match Rcode::from_u8(self.rcode()) {
            Some(rcode) => rcode.to_string(),
            None => self.rcode().to_string(),
        }
    }
}

/// A one line summary, e.g. `flags 0x8180 (QR RD RA), QD 1, AN 1, NS 0, AR 0`.
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "flags {flags:#06x} ({names}), QD {qd}, AN {an}, NS {ns}, AR {ar}",
            flags = self.flags,
            names = self.flag_names().join(" "),
            qd = self.qd_count,
            an = self.an_count,
            ns = self.ns_count,
            ar = self.ar_count,
        )
    }
}
