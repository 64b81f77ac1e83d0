//! A1-notation helpers.

/// Column letters for a 1-indexed column number: `1` → `A`, `27` → `AA`.
#[must_use]
pub fn column_letters(column: u32) -> String {
    let mut n = column;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26, so the cast cannot truncate.
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Tab name quoted for use in a range; embedded `'` is doubled.
#[must_use]
pub fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}

/// A whole row, e.g. `'Tab'!6:6`.
#[must_use]
pub fn row_range(sheet: &str, row: u32) -> String {
    format!("{}!{row}:{row}", quote_sheet_name(sheet))
}

/// A single cell, e.g. `'Tab'!H327`.
#[must_use]
pub fn cell_range(sheet: &str, column: u32, row: u32) -> String {
    format!("{}!{}{row}", quote_sheet_name(sheet), column_letters(column))
}
