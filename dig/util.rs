use encoding8::ascii;

/// Formats one row of a hex dump: offset, up to 16 hex bytes, then the
/// printable ASCII characters.
fn hexdump_row(offset: usize, row: &[u8]) -> String {
    let row_hex: String = row.iter().map(|x| format!("{0:02X} ", x)).collect();

    // For each byte on this row, only print out the ascii printable ones.
    let row_str: String = row
        .iter()
        .map(|x| if ascii::is_printable(*x) { *x as char } else { '.' })
        .collect();

    format!("{0:>08x}: {1:<48} {2:}", offset, row_hex, row_str)
}

// Dumps out the slice in a pretty way
pub fn hexdump(slice: &[u8]) {
    const WIDTH: usize = 16;

    for (i, row) in slice.chunks(WIDTH).enumerate() {
        println!("{}", hexdump_row(i * WIDTH, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hexdump_row() {
        assert_eq!(
            hexdump_row(16, b"\x03com\x00"),
            format!("00000010: {:<48} .com.", "03 63 6F 6D 00 ")
        );
    }
}
