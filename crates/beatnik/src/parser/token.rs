//! Splits notation text into tokens.

/// Starts a comment that runs to the end of the line
pub const COMMENT_MARK: char = '#';

/// A whitespace-free slice of the input with its 1-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub index: usize,
    pub text: &'s str,
}

/// Strip comments and split the rest on ASCII whitespace.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    input
        .lines()
        .map(strip_comment)
        .flat_map(str::split_ascii_whitespace)
        .enumerate()
        .map(|(i, text)| Token { index: i + 1, text })
        .collect()
}

fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_MARK) {
        Some(pos) => &line[..pos],
        None => line,
    }
}
