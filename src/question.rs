use crate::bail;
use crate::errors::Result;
use crate::io::{cursor_at, CursorExt};
use crate::name::Name;
use crate::types::{Class, Type};
use byteorder::{ReadBytesExt, BE};
use std::io::Cursor;
use std::str::FromStr;

/// DNS Question. See [rfc1035#section-4.1.2].
///
/// [rfc1035#section-4.1.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Question {
    pub name: Name,

    /// Record type code, see [`Type`].
    pub r#type: u16,

    /// Record class code, see [`Class`].
    pub class: u16,
}

impl Question {
    pub fn new(name: &str, r#type: u16, class: u16) -> Result<Question> {
        Ok(Question {
            name: Name::from_str(name)?,
            r#type,
            class,
        })
    }

    /// The record type, if it is one this crate knows by name.
    pub fn known_type(&self) -> Option<Type> {
        num_traits::FromPrimitive::from_u16(self.r#type)
    }

    pub fn known_class(&self) -> Option<Class> {
        num_traits::FromPrimitive::from_u16(self.class)
    }

    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        self.name.write(buf)?;
        buf.extend_from_slice(&self.r#type.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());
        Ok(())
    }

    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.name.encoded_len() + 4);
        self.write(&mut buf)?;
        Ok(buf)
    }

    /// Decodes the question at `offset` in the message `buf`, returning it
    /// and the number of bytes it occupies (name + 4).
    pub fn from_slice(buf: &[u8], offset: usize) -> Result<(Question, usize)> {
        let mut cur = cursor_at(buf, offset);
        let q = Question::read(&mut cur)?;
        Ok((q, cur.offset() - offset))
    }

    pub(crate) fn read(cur: &mut Cursor<&[u8]>) -> Result<Question> {
        let name = Name::read(cur)?;

        let r#type = match cur.read_u16::<BE>() {
            Ok(t) => t,
            Err(_) => bail!(MalformedQuestion, "missing type for '{}'", name),
        };
        let class = match cur.read_u16::<BE>() {
            Ok(c) => c,
            Err(_) => bail!(MalformedQuestion, "missing class for '{}'", name),
        };

        Ok(Question {
            name,
            r#type,
            class,
        })
    }
}
