//! Resource records and their type specific payloads.
//! See [rfc1035#section-3.2] and [rfc1035#section-4.1.3].
//!
//! [rfc1035#section-3.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.2
//! [rfc1035#section-4.1.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3

use crate::bail;
use crate::errors::Result;
use crate::io::{cursor_at, CursorExt};
use crate::name::Name;
use crate::types::{Class, Type};
use byteorder::{ReadBytesExt, BE};
use num_traits::FromPrimitive;
use std::io::Cursor;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Resource Record (RR)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Owner name.
    pub name: Name,

    /// Record type code, see [`Type`].
    pub r#type: u16,

    /// Record class code, see [`Class`].
    pub class: u16,

    /// The number of seconds that the resource record may be cached
    /// before the source of the information should again be consulted.
    /// Zero is interpreted to mean that the RR can only be used for the
    /// transaction in progress.
    pub ttl: i32,

    /// RDATA exactly as it appeared on the wire. Embedded names may hold
    /// compression pointers into the message it came from.
    pub rdata: Vec<u8>,

    /// The decoded RDATA.
    pub resource: Resource,
}

/// Typed RDATA, one variant per record type this crate understands.
// This should be kept in sync with Type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Resource {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),

    CNAME(Name),
    NS(Name),
    PTR(Name),

    MX(MX),
    SOA(SOA),
    TXT(TXT),

    /// A type without a decoder, only the raw [`Record::rdata`] is available.
    Unknown,
}

/// Mail exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MX {
    /// The preference given to this RR among others at the same owner.
    /// Lower values are preferred.
    pub preference: u16,

    /// A host willing to act as a mail exchange for the owner name.
    pub exchange: Name,
}

/// Start of a zone of authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SOA {
    /// The name server that was the original or primary source of data for this zone.
    pub mname: Name,

    /// The mailbox of the person responsible for this zone.
    pub rname: Name,

    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// Text record, kept as opaque bytes.
///
/// These are normally one or more length prefixed character-strings, see
/// [`TXT::strings`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TXT(pub Vec<u8>);

impl TXT {
    /// Splits the payload into its character-strings. If the length
    /// prefixes do not add up, the whole payload is returned as one string.
    pub fn strings(&self) -> Vec<&[u8]> {
        let mut strings = Vec::new();
        let mut rest = self.0.as_slice();

        while let Some((&len, tail)) = rest.split_first() {
            match tail.get(..len as usize) {
                Some(s) => strings.push(s),
                None => return vec![self.0.as_slice()],
            }
            rest = &tail[len as usize..];
        }

        strings
    }
}

impl From<&str> for TXT {
    /// A single character-string. Text longer than 255 bytes is split into
    /// several strings.
    fn from(s: &str) -> TXT {
        let mut buf = Vec::with_capacity(s.len() + 1);
        for chunk in s.as_bytes().chunks(255) {
            buf.push(chunk.len() as u8);
            buf.extend_from_slice(chunk);
        }
        TXT(buf)
    }
}

impl Resource {
    /// The type code of this payload, `None` for [`Resource::Unknown`].
    pub fn r#type(&self) -> Option<Type> {
        Some(match self {
            Resource::A(_) => Type::A,
            Resource::AAAA(_) => Type::AAAA,
            Resource::CNAME(_) => Type::CNAME,
            Resource::NS(_) => Type::NS,
            Resource::PTR(_) => Type::PTR,
            Resource::MX(_) => Type::MX,
            Resource::SOA(_) => Type::SOA,
            Resource::TXT(_) => Type::TXT,
            Resource::Unknown => return None,
        })
    }

    /// Decodes the `len` bytes of RDATA at `start` within the message `buf`.
    ///
    /// `buf` is the whole message, not just the RDATA, as embedded names may
    /// point back into it. The payload must use up exactly `len` bytes.
    pub fn parse(r#type: u16, buf: &[u8], start: usize, len: usize) -> Result<Resource> {
        let end = match start.checked_add(len) {
            Some(end) => end,
            None => bail!(MalformedRecord, "rdata at offset {} of {} bytes overflows", start, len),
        };
        if buf.len() < end {
            bail!(
                MalformedRecord,
                "rdata at offset {} needs {} bytes, only {} available",
                start,
                len,
                buf.len().saturating_sub(start)
            );
        }

        let r#type = match Type::from_u16(r#type) {
            Some(t) => t,
            None => return Ok(Resource::Unknown),
        };

        let mut cur = cursor_at(&buf[..end], start);
        let resource = match r#type {
            Type::A => Resource::A(parse_addr::<4>(&mut cur, r#type)?.into()),
            Type::AAAA => Resource::AAAA(parse_addr::<16>(&mut cur, r#type)?.into()),

            Type::CNAME => Resource::CNAME(parse_name(&mut cur, r#type)?),
            Type::NS => Resource::NS(parse_name(&mut cur, r#type)?),
            Type::PTR => Resource::PTR(parse_name(&mut cur, r#type)?),

            Type::MX => Resource::MX(MX {
                preference: parse_u16(&mut cur, r#type)?,
                exchange: parse_name(&mut cur, r#type)?,
            }),

            Type::SOA => Resource::SOA(SOA {
                mname: parse_name(&mut cur, r#type)?,
                rname: parse_name(&mut cur, r#type)?,
                serial: parse_u32(&mut cur, r#type)?,
                refresh: parse_u32(&mut cur, r#type)?,
                retry: parse_u32(&mut cur, r#type)?,
                expire: parse_u32(&mut cur, r#type)?,
                minimum: parse_u32(&mut cur, r#type)?,
            }),

            Type::TXT => Resource::TXT(TXT(buf[start..end].to_vec())),

            // Only valid as a question type.
            Type::ANY => return Ok(Resource::Unknown),
        };

        if r#type != Type::TXT && cur.offset() != end {
            bail!(
                MalformedRecord,
                "{} rdata at offset {} has {} unused bytes",
                r#type,
                start,
                end - cur.offset()
            );
        }

        Ok(resource)
    }

    /// Writes the uncompressed wire form of this payload.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            Resource::A(ip) => buf.extend_from_slice(&ip.octets()),
            Resource::AAAA(ip) => buf.extend_from_slice(&ip.octets()),

            Resource::CNAME(name) | Resource::NS(name) | Resource::PTR(name) => name.write(buf)?,

            Resource::MX(mx) => {
                buf.extend_from_slice(&mx.preference.to_be_bytes());
                mx.exchange.write(buf)?;
            }

            Resource::SOA(soa) => {
                soa.mname.write(buf)?;
                soa.rname.write(buf)?;
                for v in [soa.serial, soa.refresh, soa.retry, soa.expire, soa.minimum] {
                    buf.extend_from_slice(&v.to_be_bytes());
                }
            }

            Resource::TXT(txt) => buf.extend_from_slice(&txt.0),

            Resource::Unknown => bail!(MalformedRecord, "cannot encode a resource of unknown type"),
        }

        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }
}

fn parse_addr<const N: usize>(cur: &mut Cursor<&[u8]>, r#type: Type) -> Result<[u8; N]> {
    if cur.remaining() != N {
        bail!(
            MalformedRecord,
            "invalid {} record length ({}) expected {}",
            r#type,
            cur.remaining(),
            N
        );
    }
    match cur.take_array::<N>() {
        Some(octets) => Ok(octets),
        None => bail!(MalformedRecord, "truncated {} record", r#type),
    }
}

/// Reads a (possibly compressed) name that must start and end within the rdata.
fn parse_name(cur: &mut Cursor<&[u8]>, r#type: Type) -> Result<Name> {
    if cur.remaining() == 0 {
        bail!(MalformedRecord, "{} rdata ended before its name at offset {}", r#type, cur.offset());
    }
    Name::read(cur)
}

fn parse_u16(cur: &mut Cursor<&[u8]>, r#type: Type) -> Result<u16> {
    match cur.read_u16::<BE>() {
        Ok(v) => Ok(v),
        Err(_) => bail!(MalformedRecord, "{} rdata too short at offset {}", r#type, cur.offset()),
    }
}

fn parse_u32(cur: &mut Cursor<&[u8]>, r#type: Type) -> Result<u32> {
    match cur.read_u32::<BE>() {
        Ok(v) => Ok(v),
        Err(_) => bail!(MalformedRecord, "{} rdata too short at offset {}", r#type, cur.offset()),
    }
}

impl Record {
    /// Size of the fixed fields that follow the owner name.
    const FIXED_LEN: usize = 10;

    /// Builds a record from a typed payload, deriving its type and RDATA.
    pub fn new(name: Name, class: u16, ttl: i32, resource: Resource) -> Result<Record> {
        let r#type = match resource.r#type() {
            Some(t) => t.into(),
            None => bail!(MalformedRecord, "use Record::from_raw for records of unknown type"),
        };

        Ok(Record {
            name,
            r#type,
            class,
            ttl,
            rdata: resource.to_vec()?,
            resource,
        })
    }

    /// Builds a record from raw RDATA, decoding it if the type is known.
    /// Any names in `rdata` must be uncompressed.
    pub fn from_raw(name: Name, r#type: u16, class: u16, ttl: i32, rdata: Vec<u8>) -> Result<Record> {
        let resource = Resource::parse(r#type, &rdata, 0, rdata.len())?;
        Ok(Record {
            name,
            r#type,
            class,
            ttl,
            rdata,
            resource,
        })
    }

    pub fn known_type(&self) -> Option<Type> {
        Type::from_u16(self.r#type)
    }

    pub fn known_class(&self) -> Option<Class> {
        Class::from_u16(self.class)
    }

    /// Writes this record without compression.
    ///
    /// Decoded payloads are re-encoded from [`Record::resource`], since the raw
    /// RDATA may hold pointers that only make sense in the original message.
    /// Unknown types are written from [`Record::rdata`].
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        let encoded;
        let rdata = match self.resource {
            Resource::Unknown => &self.rdata,
            _ => {
                encoded = self.resource.to_vec()?;
                &encoded
            }
        };

        if rdata.len() > u16::MAX as usize {
            bail!(MalformedRecord, "rdata of {} bytes does not fit in RDLENGTH", rdata.len());
        }

        self.name.write(buf)?;
        buf.extend_from_slice(&self.r#type.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        buf.extend_from_slice(rdata);

        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Decodes the record at `offset` in the message `buf`, returning it and
    /// the number of bytes it occupies: name + 10 + RDLENGTH.
    pub fn from_slice(buf: &[u8], offset: usize) -> Result<(Record, usize)> {
        let mut cur = cursor_at(buf, offset);
        let record = Record::read(&mut cur)?;
        Ok((record, cur.offset() - offset))
    }

    pub(crate) fn read(cur: &mut Cursor<&[u8]>) -> Result<Record> {
        let name = Name::read(cur)?;

        if cur.remaining() < Record::FIXED_LEN {
            bail!(
                MalformedRecord,
                "'{}' needs {} bytes of fixed fields, only {} available",
                name,
                Record::FIXED_LEN,
                cur.remaining()
            );
        }

        // These reads are covered by the check above.
        let fixed = (
            cur.read_u16::<BE>(),
            cur.read_u16::<BE>(),
            cur.read_i32::<BE>(),
            cur.read_u16::<BE>(),
        );
        let (r#type, class, ttl, len) = match fixed {
            (Ok(t), Ok(c), Ok(ttl), Ok(len)) => (t, c, ttl, len as usize),
            _ => bail!(MalformedRecord, "'{}' has truncated fixed fields", name),
        };

        let start = cur.offset();
        let rdata = match cur.take(len) {
            Some(rdata) => rdata.to_vec(),
            None => bail!(
                MalformedRecord,
                "'{}' declares {} bytes of rdata, only {} available",
                name,
                len,
                cur.remaining()
            ),
        };

        // Decode against the whole message, so pointers resolve. This never
        // moves `cur`, which is already past the rdata.
        let resource = Resource::parse(r#type, cur.get_ref(), start, len)?;

        Ok(Record {
            name,
            r#type,
            class,
            ttl,
            rdata,
            resource,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).unwrap()
    }

    #[test]
    fn test_raw_round_trip() {
        let record = Record::from_raw(name("abcdefghijklmnopqrstuvwxyz.com"), 0, 0, 128, b"1234".to_vec()).unwrap();
        assert_eq!(record.resource, Resource::Unknown);

        let buf = record.to_vec().unwrap();
        let want_len = (1 + 26 + 1 + 3 + 1) + 2 + 2 + 4 + 2 + 4;
        assert_eq!(buf.len(), want_len);

        let (got, len) = Record::from_slice(&buf, 0).unwrap();
        assert_eq!(len, want_len);
        assert_eq!(got, record);
    }

    #[test]
    fn test_typed_round_trip() {
        let tests = vec![
            Resource::A("172.217.164.100".parse().unwrap()),
            Resource::AAAA("2607:f8b0:4005:805::2004".parse().unwrap()),
            Resource::CNAME(name("code.l.google.com")),
            Resource::NS(name("ns4.google.com")),
            Resource::PTR(name("dns.google")),
            Resource::MX(MX {
                preference: 10,
                exchange: name("aspmx.l.google.com"),
            }),
            Resource::SOA(SOA {
                mname: name("ns1.google.com"),
                rname: name("dns-admin.google.com"),
                serial: 379031418,
                refresh: 900,
                retry: 900,
                expire: 1800,
                minimum: 60,
            }),
            Resource::TXT(TXT::from("v=spf1 include:_spf.google.com ~all")),
        ];

        for resource in tests {
            let record = Record::new(name("google.com"), Class::Internet.into(), -1, resource.clone()).unwrap();
            assert_eq!(Some(record.r#type), resource.r#type().map(u16::from));

            let buf = record.to_vec().unwrap();
            let (got, len) = Record::from_slice(&buf, 0).unwrap();
            assert_eq!(got, record);
            assert_eq!(len, buf.len());
            assert_eq!(len, 12 + 10 + record.rdata.len());
        }
    }

    #[test]
    fn test_compressed_rdata() {
        // An MX record whose exchange points back at the owner name.
        let mut buf = name("example.com").to_vec().unwrap();
        buf.extend_from_slice(&[0xC0, 0]); // Owner, pointing at offset 0.
        buf.extend_from_slice(&[0, 15, 0, 1, 0, 0, 0x0E, 0x10, 0, 9]);
        buf.extend_from_slice(&[0, 5, 4, b'm', b'a', b'i', b'l', 0xC0, 0]);
        buf.extend_from_slice(&[0xDE, 0xAD]); // Trailing bytes.

        let (record, len) = Record::from_slice(&buf, 13).unwrap();
        assert_eq!(len, 2 + 10 + 9);
        assert_eq!(record.name.to_string(), "example.com");
        assert_eq!(record.ttl, 3600);
        assert_eq!(record.rdata.len(), 9);
        assert_eq!(
            record.resource,
            Resource::MX(MX {
                preference: 5,
                exchange: name("mail.example.com"),
            })
        );

        // Writing expands the pointer.
        let (again, _) = Record::from_slice(&record.to_vec().unwrap(), 0).unwrap();
        assert_eq!(again.resource, record.resource);
        assert_eq!(again.rdata.len(), 2 + 18);
    }

    #[test]
    fn test_truncated() {
        let buf = Record::new(name("a.com"), 1, 60, Resource::A(Ipv4Addr::LOCALHOST))
            .unwrap()
            .to_vec()
            .unwrap();
        assert_eq!(buf.len(), 7 + 10 + 4);

        for len in 7..buf.len() {
            assert!(
                matches!(Record::from_slice(&buf[..len], 0), Err(Error::MalformedRecord(_))),
                "{} bytes",
                len
            );
        }
    }

    #[test]
    fn test_bad_rdata() {
        let tests: Vec<(&str, u16, Vec<u8>)> = vec![
            ("short A", 1, vec![127, 0, 0]),
            ("long A", 1, vec![127, 0, 0, 1, 0]),
            ("short AAAA", 28, vec![0; 15]),
            ("empty CNAME", 5, vec![]),
            ("CNAME with trailing bytes", 5, vec![1, b'a', 0, 0]),
            ("MX without name", 15, vec![0, 10]),
            ("SOA without timers", 6, vec![0, 0, 0, 0, 0, 1]),
        ];

        for (desc, r#type, rdata) in tests {
            assert!(
                matches!(
                    Record::from_raw(name("a"), r#type, 1, 0, rdata),
                    Err(Error::MalformedRecord(_))
                ),
                "{}",
                desc
            );
        }

        // A name that runs off the end of the rdata.
        assert!(matches!(
            Record::from_raw(name("a"), 2, 1, 0, vec![3, b'c', b'o']),
            Err(Error::MalformedName(_))
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        let buf = [127, 0, 0, 1];
        assert_eq!(Resource::parse(1, &buf, 0, 4).unwrap(), Resource::A(Ipv4Addr::LOCALHOST));

        for (start, len) in [(usize::MAX, 4), (1, usize::MAX), (1, 4), (5, 0)] {
            assert!(
                matches!(Resource::parse(1, &buf, start, len), Err(Error::MalformedRecord(_))),
                "start {} len {}",
                start,
                len
            );
        }
    }

    #[test]
    fn test_unknown_types() {
        let record = Record::from_raw(name("a"), 65, 1, 0, vec![1, 2, 3]).unwrap();
        assert_eq!(record.resource, Resource::Unknown);
        assert_eq!(record.known_type(), None);
        assert_eq!(record.known_class(), Some(Class::Internet));

        // ANY only makes sense in a question.
        let record = Record::from_raw(name("a"), 255, 1, 0, vec![]).unwrap();
        assert_eq!(record.resource, Resource::Unknown);

        assert!(matches!(
            Record::new(name("a"), 1, 0, Resource::Unknown),
            Err(Error::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_txt_strings() {
        let txt = TXT(b"\x05hello\x00\x05world".to_vec());
        assert_eq!(txt.strings(), vec![&b"hello"[..], b"", b"world"]);

        // Lengths that don't add up give back the whole payload.
        let txt = TXT(b"\x09oops".to_vec());
        assert_eq!(txt.strings(), vec![&b"\x09oops"[..]]);

        let long = "x".repeat(300);
        let txt = TXT::from(long.as_str());
        assert_eq!(txt.0.len(), 302);
        assert_eq!(txt.strings().len(), 2);
    }
}
