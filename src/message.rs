use crate::errors::{Error, Result, Section};
use crate::header::Header;
use crate::io::{cursor_at, CursorExt};
use crate::question::Question;
use crate::resource::Record;
use crate::types::Stats;
use log::debug;
use std::io::Cursor;

/// DNS Message that serves as the root of all DNS requests and responses.
///
/// The header counts mirror the section lengths: the `add_*` methods keep
/// them in step, and parsing fails unless every declared entry is present.
///
/// # Examples
///
/// ```rust
/// use ddnsr::{Class, Message, Type};
///
/// let mut m = Message::query(0xFEFF, true);
/// m.add_question("bramp.net", Type::A.into(), Class::Internet.into()).unwrap();
///
/// // Encode the query as a Vec<u8>, ready to send.
/// let req = m.to_vec().expect("failed to encode DNS request");
///
/// // And back again.
/// let m2 = Message::from_slice(&req).expect("invalid message");
/// assert_eq!(m, m2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    pub header: Header,

    /// The questions.
    pub questions: Vec<Question>,

    /// The answer records.
    pub answers: Vec<Record>,

    /// The authoritative records.
    pub authorities: Vec<Record>,

    /// The additional records.
    pub additionals: Vec<Record>,

    /// Details of the exchange that produced this message, if any.
    pub stats: Option<Stats>,
}

impl Message {
    /// An empty standard query with the given id.
    pub fn query(id: u16, recursion_desired: bool) -> Message {
        let mut m = Message::default();
        m.header.id = id;
        m.header.set_flag(Header::RECURSION_DESIRED, recursion_desired);
        m
    }

    pub fn add_question(&mut self, name: &str, r#type: u16, class: u16) -> Result<()> {
        let q = Question::new(name, r#type, class)?;
        self.header.qd_count = increment(self.header.qd_count, Section::Question)?;
        self.questions.push(q);
        Ok(())
    }

    pub fn add_answer(&mut self, record: Record) -> Result<()> {
        self.header.an_count = increment(self.header.an_count, Section::Answer)?;
        self.answers.push(record);
        Ok(())
    }

    pub fn add_authority(&mut self, record: Record) -> Result<()> {
        self.header.ns_count = increment(self.header.ns_count, Section::Authority)?;
        self.authorities.push(record);
        Ok(())
    }

    pub fn add_additional(&mut self, record: Record) -> Result<()> {
        self.header.ar_count = increment(self.header.ar_count, Section::Additional)?;
        self.additionals.push(record);
        Ok(())
    }

    /// Returns this DNS Message as a Vec<u8> ready to be sent, as defined by [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
    ///
    /// Names are written without compression.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        self.check_counts()?;

        let mut buf = Vec::<u8>::with_capacity(512);
        self.header.write(&mut buf);

        for question in &self.questions {
            question.write(&mut buf)?;
        }

        for record in self.answers.iter().chain(&self.authorities).chain(&self.additionals) {
            record.write(&mut buf)?;
        }

        Ok(buf)
    }

    fn check_counts(&self) -> Result<()> {
        let sections = [
            (Section::Question, self.header.qd_count, self.questions.len()),
            (Section::Answer, self.header.an_count, self.answers.len()),
            (Section::Authority, self.header.ns_count, self.authorities.len()),
            (Section::Additional, self.header.ar_count, self.additionals.len()),
        ];

        for (section, expected, found) in sections {
            if expected as usize != found {
                return Err(Error::CountMismatch {
                    section,
                    expected,
                    found,
                });
            }
        }

        Ok(())
    }

    /// Parses a whole message.
    ///
    /// Reads the header, then exactly as many questions and records as it
    /// declares. Any failure discards the message. Bytes after the last
    /// record are ignored.
    pub fn from_slice(buf: &[u8]) -> Result<Message> {
        let mut cur = cursor_at(buf, 0);

        let header = Header::read(&mut cur)?;
        let questions = read_section(&mut cur, header.qd_count, Section::Question, Question::read)?;
        let answers = read_section(&mut cur, header.an_count, Section::Answer, Record::read)?;
        let authorities = read_section(&mut cur, header.ns_count, Section::Authority, Record::read)?;
        let additionals = read_section(&mut cur, header.ar_count, Section::Additional, Record::read)?;

        if cur.remaining() > 0 {
            debug!("ignoring {} bytes after the last record", cur.remaining());
        }

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
            stats: None,
        })
    }
}

fn increment(count: u16, section: Section) -> Result<u16> {
    match count.checked_add(1) {
        Some(count) => Ok(count),
        None => Err(Error::CountMismatch {
            section,
            expected: count,
            found: count as usize + 1,
        }),
    }
}

/// Reads `count` entries with `read`. Running out of bytes exactly where an
/// entry should start is a [`Error::CountMismatch`], anything else is the
/// entry's own error.
fn read_section<'a, T, F>(cur: &mut Cursor<&'a [u8]>, count: u16, section: Section, read: F) -> Result<Vec<T>>
where
    F: Fn(&mut Cursor<&'a [u8]>) -> Result<T>,
{
    // Every entry takes at least one byte, so never reserve more than remain.
    let mut entries = Vec::with_capacity(usize::from(count).min(cur.remaining()));

    for _ in 0..count {
        if cur.remaining() == 0 {
            return Err(Error::CountMismatch {
                section,
                expected: count,
                found: entries.len(),
            });
        }
        entries.push(read(cur)?);
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::Name;
    use crate::resource::{Resource, MX};
    use crate::types::{Class, Type};
    use pretty_assertions::assert_eq;
    use std::net::Ipv4Addr;
    use std::str::FromStr;

    fn reply() -> Message {
        let mut m = Message::query(0xFEFF, true);
        m.header.set_flag(Header::RESPONSE, true);
        m.add_question("a.com", Type::A.into(), Class::Internet.into()).unwrap();

        let name = Name::from_str("a.com").unwrap();
        m.add_answer(Record::new(name.clone(), 1, 60, Resource::A(Ipv4Addr::new(10, 0, 0, 1))).unwrap())
            .unwrap();
        m.add_answer(Record::new(name.clone(), 1, 60, Resource::A(Ipv4Addr::new(10, 0, 0, 2))).unwrap())
            .unwrap();
        m.add_authority(Record::new(name.clone(), 1, 60, Resource::NS(Name::from_str("ns.a.com").unwrap())).unwrap())
            .unwrap();
        m.add_additional(
            Record::new(
                name,
                1,
                60,
                Resource::MX(MX {
                    preference: 1,
                    exchange: Name::from_str("mx.a.com").unwrap(),
                }),
            )
            .unwrap(),
        )
        .unwrap();
        m
    }

    #[test]
    fn test_query_packing() {
        let mut m = Message::query(0xFEFF, true);
        m.add_question("a.com", 0, 0).unwrap();
        assert_eq!(m.header.qd_count, 1);

        let buf = m.to_vec().unwrap();
        assert_eq!(
            buf,
            vec![0xFE, 0xFF, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, b'a', 3, b'c', b'o', b'm', 0, 0, 0, 0, 0]
        );

        let got = Message::from_slice(&buf).unwrap();
        assert_eq!(got, m);
        assert_eq!(got.questions[0].name.to_string(), "a.com");
    }

    #[test]
    fn test_multiple_questions() {
        let mut m = Message::query(1, false);
        m.add_question("www.google.com", 1, 1).unwrap();
        m.add_question("www.amazon.com", 1, 1).unwrap();
        assert_eq!(m.header.qd_count, 2);
        assert!(m.to_vec().unwrap().len() < 512);
    }

    #[test]
    fn test_round_trip() {
        let m = reply();
        let got = Message::from_slice(&m.to_vec().unwrap()).unwrap();
        assert_eq!(got, m);
    }

    #[test]
    fn test_count_mismatch() {
        let m = reply();
        let buf = m.to_vec().unwrap();

        // Claim one more answer than is present: the first authority record is
        // read as the second answer, and the authority section comes up short.
        let mut bad = buf.clone();
        bad[7] = 3;
        assert!(matches!(
            Message::from_slice(&bad),
            Err(Error::CountMismatch {
                section: Section::Additional,
                ..
            })
        ));

        // Cut the message after the first answer.
        let first_answer_end = Header::SIZE + m.questions[0].to_vec().unwrap().len() + m.answers[0].to_vec().unwrap().len();
        let mut short = buf[..first_answer_end].to_vec();
        short[9] = 0; // No authority
        short[11] = 0; // or additional records.
        assert!(matches!(
            Message::from_slice(&short),
            Err(Error::CountMismatch {
                section: Section::Answer,
                expected: 2,
                found: 1,
            })
        ));
    }

    #[test]
    fn test_truncated_mid_record() {
        let buf = reply().to_vec().unwrap();
        for len in 0..buf.len() {
            assert!(Message::from_slice(&buf[..len]).is_err(), "{} bytes", len);
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let m = reply();
        let mut buf = m.to_vec().unwrap();
        buf.extend_from_slice(&[0; 16]);
        assert_eq!(Message::from_slice(&buf).unwrap(), m);
    }

    #[test]
    fn test_counts_checked_on_encode() {
        let mut m = reply();
        m.header.an_count = 5;
        assert!(matches!(
            m.to_vec(),
            Err(Error::CountMismatch {
                section: Section::Answer,
                expected: 5,
                found: 2,
            })
        ));
    }

    #[test]
    fn test_huge_counts() {
        // A bare header claiming the maximum number of answers.
        let buf = [0, 0, 0x80, 0, 0, 0, 0xFF, 0xFF, 0, 0, 0, 0];
        assert!(matches!(
            Message::from_slice(&buf),
            Err(Error::CountMismatch {
                section: Section::Answer,
                expected: 0xFFFF,
                found: 0,
            })
        ));
    }

    #[test]
    fn test_empty_label_not_encoded() {
        let mut m = reply();
        m.answers[0].name = Name::from_labels(vec![&b"a"[..], &b""[..], &b"com"[..]]);
        assert!(matches!(m.to_vec(), Err(Error::MalformedName(_))));
    }

    #[test]
    fn test_invalid_messages() {
        for buf in [&b"\x00\x00\x00\x00"[..], &b"\xFF\xFF\xFF\xFF"[..], &b"\x00"[..]] {
            assert!(matches!(Message::from_slice(buf), Err(Error::MalformedHeader(_))));
        }

        // A header promising a question that isn't there.
        let buf = [0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            Message::from_slice(&buf),
            Err(Error::CountMismatch {
                section: Section::Question,
                expected: 1,
                found: 0,
            })
        ));
    }
}
