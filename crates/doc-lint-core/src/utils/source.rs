//! Source text helpers.

/// Calculates the byte offset for a 1-indexed line and column.
///
/// Returns 0 for line 0, and the end of the text if the line is out of bounds.
#[must_use]
pub fn offset_for(content: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let mut offset = 0;
    for (i, line_content) in content.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            let line_len = line_content.trim_end_matches(['\r', '\n']).len();
            return offset + column.saturating_sub(1).min(line_len);
        }
        offset += line_content.len();
    }

    offset
}
