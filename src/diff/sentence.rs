//! Sentence segmentation over token runs.

use crate::diff::token::Token;

/// Characters that close a sentence when they end a token.
pub const TERMINATORS: [char; 4] = ['.', ':', '?', '!'];

/// A non-empty token run ending at terminal punctuation or at end of input.
pub type Sentence = Vec<Token>;

fn ends_sentence(token: &Token) -> bool {
    token.last_char().is_some_and(|ch| TERMINATORS.contains(&ch))
}

/// Group tokens into sentences.
///
/// The concatenation of the returned sentences is the input sequence.
#[must_use]
pub fn to_sentences(tokens: &[Token]) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = Vec::new();

    for token in tokens {
        current.push(token.clone());
        if ends_sentence(token) {
            sentences.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::token::tokenize;

    fn shape(sentences: &[Sentence]) -> Vec<Vec<&str>> {
        sentences
            .iter()
            .map(|s| s.iter().map(|t| t.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_split_on_terminators() {
        let sentences = to_sentences(&tokenize("One two. Three? Four: five! six"));
        assert_eq!(
            shape(&sentences),
            vec![
                vec!["One", "two."],
                vec!["Three?"],
                vec!["Four:"],
                vec!["five!"],
                vec!["six"],
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(to_sentences(&[]).is_empty());
    }

    #[test]
    fn test_terminator_must_end_token() {
        // "e.g" does not end with a terminator, "3.5" neither.
        let sentences = to_sentences(&tokenize("see e.g the 3.5 rule."));
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_partition_reconstructs_input() {
        let tokens = tokenize("A b. C d? e");
        let joined: Vec<Token> = to_sentences(&tokens).into_iter().flatten().collect();
        assert_eq!(joined, tokens);
    }
}
