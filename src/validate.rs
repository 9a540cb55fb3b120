use crate::errors::ValidationError;
use crate::Message;

impl Message {
    /// Checks that this message is a usable reply to `request`.
    ///
    /// Only the header is inspected: the ids must match, the response flag
    /// must be set and the truncation flag clear. An error RCODE or an empty
    /// answer section is still a valid reply.
    pub fn validate(&self, request: &Message) -> Result<(), ValidationError> {
        if self.header.id != request.header.id {
            return Err(ValidationError::IdMismatch {
                request: request.header.id,
                reply: self.header.id,
            });
        }

        if !self.header.is_response() {
            return Err(ValidationError::NotResponse);
        }

        if self.header.is_truncated() {
            return Err(ValidationError::Truncated);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Header;
    use pretty_assertions::assert_eq;

    fn reply(id: u16, flags: u16) -> Message {
        let mut m = Message::default();
        m.header.id = id;
        m.header.flags = flags;
        m
    }

    #[test]
    fn test_validate() {
        let request = Message::query(0x1234, true);

        let tests = [
            ("ok", reply(0x1234, Header::RESPONSE), Ok(())),
            (
                "error rcode is still a reply",
                reply(0x1234, Header::RESPONSE | 3),
                Ok(()),
            ),
            (
                "id mismatch wins over everything else",
                reply(0x4321, Header::TRUNCATED),
                Err(ValidationError::IdMismatch {
                    request: 0x1234,
                    reply: 0x4321,
                }),
            ),
            (
                "not a response",
                reply(0x1234, Header::RECURSION_AVAILABLE | Header::TRUNCATED),
                Err(ValidationError::NotResponse),
            ),
            (
                "truncated",
                reply(0x1234, Header::RESPONSE | Header::TRUNCATED),
                Err(ValidationError::Truncated),
            ),
        ];

        for (name, reply, want) in tests {
            assert_eq!(reply.validate(&request), want, "{}", name);
        }
    }
}
