// tokenizer.rs
//
// Splits raw source text into lowercase word lists, one per non-blank line.
// No validation happens here: malformed lines pass through for the later
// stages to reject.

use crate::ast::{Location, TokenLine};

/// Comments run from this character to the end of the line.
pub const COMMENT_MARKER: char = '#';

pub fn tokenize(source_text: &str, file: &str) -> Vec<TokenLine> {
    source_text
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            tokenize_line(line).map(|words| TokenLine {
                location: Location { file: file.to_string(), line: index + 1 },
                words,
            })
        })
        .collect()
}

/// Returns `None` for lines that are blank once the comment is removed.
pub fn tokenize_line(line: &str) -> Option<Vec<String>> {
    let code = match line.find(COMMENT_MARKER) {
        Some(pos) => &line[..pos],
        None => line,
    };
    let code = code.trim();
    if code.is_empty() {
        return None;
    }
    Some(code.split_whitespace().map(str::to_lowercase).collect())
}
