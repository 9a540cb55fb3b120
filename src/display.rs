//! Implements the Display trait for the various types, so they output
//! in `dig` style.
// Refer to https://github.com/tigeli/bind-utils/blob/master/bin/dig/dig.c for reference.

use crate::resource::{MX, SOA, TXT};
use crate::{Class, Header, Message, Question, Record, Resource, Stats, Type};
use chrono::prelude::*;
use std::fmt;
use std::fmt::Write;

/// Displays this message in a format resembling `dig` output.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_header(f)?;

        // Always display the question section, but optionally
        // display the other sections.
        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            question.fmt(f)?;
        }
        writeln!(f)?;

        for (title, records) in [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ] {
            if records.is_empty() {
                continue;
            }

            writeln!(f, ";; {} SECTION:", title)?;
            for record in records {
                record.fmt(f)?;
            }
            writeln!(f)?;
        }

        if let Some(stats) = &self.stats {
            stats.fmt(f)?;
        }

        writeln!(f)
    }
}

impl Message {
    fn fmt_header(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {opcode}, status: {rcode}, id: {id}",
            opcode = self.header.opcode_name(),
            rcode = self.header.rcode_name(),
            id = self.header.id,
        )?;

        let mut flags = String::new();
        for (flag, name) in [
            (Header::RESPONSE, " qr"),
            (Header::AUTHORITATIVE, " aa"),
            (Header::TRUNCATED, " tc"),
            (Header::RECURSION_DESIRED, " rd"),
            (Header::RECURSION_AVAILABLE, " ra"),
        ] {
            if self.header.has_flag(flag) {
                flags.push_str(name)
            }
        }

        writeln!(f, ";; flags:{flags}; QUERY: {qd_count}, ANSWER: {an_count}, AUTHORITY: {ns_count}, ADDITIONAL: {ar_count}",
            flags = flags,
            qd_count = self.header.qd_count,
            an_count = self.header.an_count,
            ns_count = self.header.ns_count,
            ar_count = self.header.ar_count,
        )?;

        writeln!(f)
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, ";; Query time: {} msec", self.duration.as_millis())?;
        writeln!(f, ";; SERVER: {}", self.server)?;

        let start: chrono::DateTime<Local> = self.start.into();
        // ;; WHEN: Sat Jun 12 12:14:21 PDT 2021
        writeln!(f, ";; WHEN: {}", start.format("%a %b %-d %H:%M:%S %z %-Y"))?;
        writeln!(
            f,
            ";; MSG SIZE sent: {} rcvd: {}",
            self.request_size, self.response_size
        )
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "; {name:<18} {class:4} {type}",
            name = self.name,
            class = Class::describe(self.class),
            r#type = Type::describe(self.r#type),
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rdata = match self.resource {
            Resource::Unknown => unknown_rdata(&self.rdata),
            _ => self.resource.to_string(),
        };

        writeln!(
            f,
            "{name:<20} {ttl:>4} {class:4} {type:6} {rdata}",
            name = self.name,
            ttl = self.ttl,
            class = Class::describe(self.class),
            r#type = Type::describe(self.r#type),
            rdata = rdata,
        )
    }
}

/// The generic `\# <length> <hex>` form from [rfc3597#section-5].
///
/// [rfc3597#section-5]: https://datatracker.ietf.org/doc/html/rfc3597#section-5
fn unknown_rdata(rdata: &[u8]) -> String {
    let mut s = format!("\\# {}", rdata.len());
    if !rdata.is_empty() {
        s.push(' ');
        for b in rdata {
            // Writing to a String never fails.
            let _ = write!(s, "{:02x}", b);
        }
    }
    s
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::A(ip) => ip.fmt(f),
            Resource::AAAA(ip) => ip.fmt(f),

            Resource::NS(name) => name.fmt(f),
            Resource::CNAME(name) => name.fmt(f),
            Resource::PTR(name) => name.fmt(f),

            Resource::SOA(soa) => soa.fmt(f),
            Resource::TXT(txt) => txt.fmt(f),
            Resource::MX(mx) => mx.fmt(f),

            Resource::Unknown => write!(f, "\\# ?"),
        }
    }
}

impl fmt::Display for MX {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // "10 aspmx.l.google.com"
        write!(
            f,
            "{preference} {exchange}",
            preference = self.preference,
            exchange = self.exchange,
        )
    }
}

impl fmt::Display for SOA {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // "ns1.google.com dns-admin.google.com 376337657 900 900 1800 60"
        write!(
            f,
            "{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}",
            mname = self.mname,
            rname = self.rname,
            serial = self.serial,
            refresh = self.refresh,
            retry = self.retry,
            expire = self.expire,
            minimum = self.minimum,
        )
    }
}

impl fmt::Display for TXT {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, txt) in self.strings().iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }

            f.write_char('"')?;
            for &b in txt.iter() {
                match b {
                    b'"' | b'\\' => write!(f, "\\{}", b as char)?,
                    0x20..=0x7E => f.write_char(b as char)?,
                    _ => write!(f, "\\{:03}", b)?,
                }
            }
            f.write_char('"')?;
        }

        Ok(())
    }
}
