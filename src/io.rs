//! Cursor helpers shared by the codecs.
//!
//! Every decoder works on a `Cursor` over the *whole* message, so that
//! compression pointers can reach back to earlier parts of it, and
//! reports how far it moved the cursor.

use std::convert::TryInto;
use std::io::Cursor;

pub(crate) trait CursorExt<'a> {
    /// Current absolute offset into the message.
    fn offset(&self) -> usize;

    /// Returns the number of bytes remaining to be consumed.
    /// This is used as a way to check for malformed input.
    fn remaining(&self) -> usize;

    /// Returns the next `len` bytes and advances past them, or `None` (leaving
    /// the cursor where it was) if fewer than `len` bytes remain.
    fn take(&mut self, len: usize) -> Option<&'a [u8]>;

    /// Like [`CursorExt::take`] but for a fixed size array.
    fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N).and_then(|s| s.try_into().ok())
    }
}

impl<'a> CursorExt<'a> for Cursor<&'a [u8]> {
    fn offset(&self) -> usize {
        self.position() as usize
    }

    fn remaining(&self) -> usize {
        self.get_ref().len().saturating_sub(self.offset())
    }

    fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let buf: &'a [u8] = *self.get_ref();
        let start = self.offset();
        let slice = buf.get(start..start.checked_add(len)?)?;
        self.set_position((start + len) as u64);
        Some(slice)
    }
}

/// Returns a cursor over `buf` positioned at `offset`.
pub(crate) fn cursor_at(buf: &[u8], offset: usize) -> Cursor<&[u8]> {
    let mut cur = Cursor::new(buf);
    cur.set_position(offset as u64);
    cur
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_take() {
        let buf = [1_u8, 2, 3, 4, 5];
        let mut cur = cursor_at(&buf, 1);

        assert_eq!(cur.remaining(), 4);
        assert_eq!(cur.take(2), Some(&buf[1..3]));
        assert_eq!(cur.offset(), 3);

        // Asking for too much leaves the cursor alone.
        assert_eq!(cur.take(3), None);
        assert_eq!(cur.offset(), 3);

        assert_eq!(cur.take_array::<2>(), Some([4, 5]));
        assert_eq!(cur.remaining(), 0);
    }

    #[test]
    fn test_past_the_end() {
        let buf = [1_u8, 2];
        let mut cur = cursor_at(&buf, 7);
        assert_eq!(cur.remaining(), 0);
        assert_eq!(cur.take(1), None);
    }
}
