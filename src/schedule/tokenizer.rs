//! Splitting of raw table-cell text.
//!
//! Every `<br>` in a cell becomes `\n` before the text reaches here. Cells are full of
//! U+00A0 NO-BREAK SPACE, which [`char::is_whitespace`] already treats as whitespace,
//! so trimming and field splitting use the Unicode notion throughout.

use log::debug;

/// Trimmed, non-empty lines of `raw`.
pub fn lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Whitespace-delimited fields of a single line.
pub fn fields(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Parses a captured number, falling back to zero.
///
/// Captures come from `\d`, which also matches non-ASCII digits such as `０`.
pub fn safe_atoi(s: &str) -> u32 {
    s.parse().unwrap_or_else(|_| {
        debug!("Treating {s:?} as zero");
        0
    })
}
