//! Domain names and their wire encoding, including compression pointers.
//!
//! See [rfc1035#section-3.1] and [rfc1035#section-4.1.4].
//!
//! [rfc1035#section-3.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.1
//! [rfc1035#section-4.1.4]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4

use crate::bail;
use crate::errors::Result;
use crate::io::{cursor_at, CursorExt};
use std::fmt;
use std::fmt::Write;
use std::io::Cursor;
use std::str::FromStr;

/// A domain name: an ordered list of labels, case preserved.
///
/// Labels are kept as raw bytes, the wire format does not require them to
/// be ASCII. The root name has no labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Name {
    labels: Vec<Vec<u8>>,
}

impl Name {
    /// Maximum encoded length of a name, including length bytes and the
    /// terminating zero. [RFC1035]
    pub const MAX_LEN: usize = 255;

    /// Restricts the length of a domain label to 63 characters. [RFC1034]
    pub const MAX_LABEL_LEN: usize = 63;

    /// The two high bits of a length byte that mark a compression pointer.
    const POINTER: u8 = 0xC0;

    pub fn root() -> Name {
        Name::default()
    }

    /// Builds a name from its labels. The labels are not checked until
    /// the name is encoded.
    pub fn from_labels<I, L>(labels: I) -> Name
    where
        I: IntoIterator<Item = L>,
        L: Into<Vec<u8>>,
    {
        Name {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(Vec::as_slice)
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Length of this name once encoded (without compression).
    pub fn encoded_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Writes the uncompressed wire form of this name to `buf`.
    ///
    /// # Errors
    ///
    /// [`crate::Error::MalformedName`] if a label is empty or longer than 63 bytes, or the
    /// encoded name would be longer than 255 bytes. Nothing is written in
    /// that case.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        for label in &self.labels {
            if label.is_empty() {
                bail!(MalformedName, "empty label in '{}'", self);
            }
            if label.len() > Name::MAX_LABEL_LEN {
                bail!(
                    MalformedName,
                    "label '{}' longer than {} bytes",
                    String::from_utf8_lossy(label),
                    Name::MAX_LABEL_LEN
                );
            }
        }

        if self.encoded_len() > Name::MAX_LEN {
            bail!(
                MalformedName,
                "'{}' encodes to {} bytes, more than {}",
                self,
                self.encoded_len(),
                Name::MAX_LEN
            );
        }

        for label in &self.labels {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label);
        }
        buf.push(0);

        Ok(())
    }

    /// Returns the uncompressed wire form of this name.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.encoded_len());
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Decodes the name starting at `offset` within the message `buf`.
    ///
    /// Returns the name and the number of bytes it occupies at `offset`.
    /// When the name is (partly) compressed that count stops at the first
    /// pointer, which always counts as 2 bytes however many labels were
    /// found by following it. Bytes after the name are ignored.
    pub fn from_slice(buf: &[u8], offset: usize) -> Result<(Name, usize)> {
        let mut cur = cursor_at(buf, offset);
        let name = Name::read(&mut cur)?;
        Ok((name, cur.offset() - offset))
    }

    /// Reads a name at the cursor's position, leaving the cursor just after
    /// the bytes the name occupies there.
    ///
    /// Pointers must point strictly before the start of the run of labels
    /// they end, so every jump goes further back in the message and the
    /// expansion always terminates.
    pub(crate) fn read(cur: &mut Cursor<&[u8]>) -> Result<Name> {
        let buf: &[u8] = *cur.get_ref();
        let start = cur.offset();

        let mut labels = Vec::new();
        let mut pos = start;
        let mut run_start = start;
        let mut end = None; // Set once the first pointer has been followed.
        let mut len = 1; // The terminating zero.

        loop {
            let b = match buf.get(pos) {
                Some(b) => *b,
                None => bail!(MalformedName, "name at offset {} runs past the end of the message", start),
            };

            match b & Name::POINTER {
                0x00 if b == 0 => {
                    pos += 1;
                    break;
                }

                0x00 => {
                    let label_len = b as usize;
                    let label = match buf.get(pos + 1..pos + 1 + label_len) {
                        Some(label) => label,
                        None => bail!(
                            MalformedName,
                            "label at offset {} runs past the end of the message",
                            pos
                        ),
                    };

                    len += label_len + 1;
                    if len > Name::MAX_LEN {
                        bail!(MalformedName, "name at offset {} is longer than {} bytes", start, Name::MAX_LEN);
                    }

                    labels.push(label.to_vec());
                    pos += label_len + 1;
                }

                Name::POINTER => {
                    let low = match buf.get(pos + 1) {
                        Some(low) => *low as usize,
                        None => bail!(MalformedName, "truncated compression pointer at offset {}", pos),
                    };
                    let ptr = ((b & !Name::POINTER) as usize) << 8 | low;

                    if ptr >= run_start {
                        bail!(
                            MalformedName,
                            "compression loop: pointer at offset {} to {} does not point backwards",
                            pos,
                            ptr
                        );
                    }

                    if end.is_none() {
                        end = Some(pos + 2);
                    }

                    pos = ptr;
                    run_start = ptr;
                }

                // 0x40 and 0x80 are extended label types (rfc6891), never used in practice.
                other => bail!(MalformedName, "unsupported label type {:#04x} at offset {}", other, pos),
            }
        }

        cur.set_position(end.unwrap_or(pos) as u64);

        Ok(Name { labels })
    }
}

impl FromStr for Name {
    type Err = crate::Error;

    /// Parses a dotted name, the inverse of `Display`. A single trailing dot
    /// is allowed, and both `""` and `"."` are the root name. `\.`, `\\` and
    /// `\DDD` (a decimal byte) are unescaped. Label lengths are checked when
    /// encoding.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Name::root());
        }

        let mut labels = Vec::new();
        let mut label = Vec::new();
        let mut bytes = s.bytes();

        while let Some(b) = bytes.next() {
            match b {
                b'.' => {
                    if label.is_empty() {
                        bail!(MalformedName, "empty label in domain name '{}'", s);
                    }
                    labels.push(std::mem::take(&mut label));
                }

                b'\\' => match bytes.next() {
                    Some(d) if d.is_ascii_digit() => {
                        let digits = [Some(d), bytes.next(), bytes.next()];
                        let mut value = 0_u32;
                        for digit in digits {
                            match digit {
                                Some(d) if d.is_ascii_digit() => value = value * 10 + u32::from(d - b'0'),
                                _ => bail!(MalformedName, "escape in '{}' needs three digits", s),
                            }
                        }
                        match u8::try_from(value) {
                            Ok(v) => label.push(v),
                            Err(_) => bail!(MalformedName, "escape \\{} in '{}' is larger than 255", value, s),
                        }
                    }
                    Some(c) => label.push(c),
                    None => bail!(MalformedName, "'{}' ends with a lone backslash", s),
                },

                _ => label.push(b),
            }
        }

        // A trailing dot leaves the last label empty.
        if !label.is_empty() {
            labels.push(label);
        }

        Ok(Name { labels })
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.labels.is_empty() {
            return f.pad(".");
        }

        let mut s = String::with_capacity(self.encoded_len());
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                s.push('.');
            }
            for &b in label {
                match b {
                    b'.' | b'\\' => {
                        s.push('\\');
                        s.push(b as char);
                    }
                    0x21..=0x7E => s.push(b as char),
                    _ => write!(s, "\\{:03}", b)?,
                }
            }
        }

        // pad, so callers can align names in columns.
        f.pad(&s)
    }
}
