//! Whitespace tokenizer with character offsets.

use std::fmt;

/// A maximal run of non-whitespace characters.
///
/// Offsets count `char`s, not bytes, so they line up with the rope-backed
/// [`EditBuffer`](crate::text::EditBuffer).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    /// Character offset of the first character.
    pub start: usize,
    /// Token text, never empty.
    pub text: String,
}

impl Token {
    /// Create a token at a character offset.
    #[must_use]
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty(), "tokens are never empty");
        Self { start, text }
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Always false for tokens produced by [`tokenize`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset of the last character.
    #[must_use]
    pub fn end_inclusive(&self) -> usize {
        (self.start + self.len()).saturating_sub(1)
    }

    /// Offset one past the last character.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.len()
    }

    /// Last character of the token.
    #[must_use]
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.text, self.start)
    }
}

/// Split text on Unicode whitespace.
///
/// Every maximal run of non-whitespace characters becomes one [`Token`]
/// positioned at the character offset of its first character.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (pos, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            if !current.is_empty() {
                tokens.push(Token::new(start, std::mem::take(&mut current)));
            }
        } else {
            if current.is_empty() {
                start = pos;
            }
            current.push(ch);
        }
    }
    if !current.is_empty() {
        tokens.push(Token::new(start, current));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("The cat sat.");
        assert_eq!(texts(&tokens), ["The", "cat", "sat."]);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[2].start, 8);
        assert_eq!(tokens[2].end(), 12);
        assert_eq!(tokens[2].end_inclusive(), 11);
    }

    #[test]
    fn test_tokenize_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_runs_of_whitespace() {
        let tokens = tokenize("  a \n\n bb\tc  ");
        assert_eq!(texts(&tokens), ["a", "bb", "c"]);
        assert_eq!(tokens[0].start, 2);
        assert_eq!(tokens[1].start, 7);
        assert_eq!(tokens[2].start, 10);
    }

    #[test]
    fn test_tokenize_counts_chars_not_bytes() {
        let tokens = tokenize("für über");
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[1].len(), 4);
        assert_eq!(tokens[1].end(), 8);
    }

    #[test]
    fn test_tokenize_unicode_whitespace() {
        // U+00A0 no-break space and U+3000 ideographic space
        let tokens = tokenize("a\u{a0}b\u{3000}c");
        assert_eq!(texts(&tokens), ["a", "b", "c"]);
    }

    #[test]
    fn test_token_display() {
        assert_eq!(Token::new(4, "cat").to_string(), "cat@4");
    }
}
