//! Spreadsheet-style column letters.
//!
//! Column titles are derived from position: index 0 is `A`, 25 is `Z`,
//! 26 is `AA`, and so on.

/// Convert a 0-based column index to column letters (A, B, ..., Z, AA, AB, ...)
pub fn column_title(col: u32) -> String {
    let mut result = Vec::new();
    let mut n = u64::from(col) + 1; // Convert to 1-based
    while n > 0 {
        n -= 1;
        let offset = u8::try_from(n % 26).unwrap_or(0);
        result.push(char::from(b'A' + offset));
        n /= 26;
    }
    result.iter().rev().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_letter_sequence() {
        assert_eq!(column_title(0), "A");
        assert_eq!(column_title(25), "Z");
        assert_eq!(column_title(26), "AA");
        assert_eq!(column_title(27), "AB");
        assert_eq!(column_title(701), "ZZ");
        assert_eq!(column_title(702), "AAA");
    }
}
