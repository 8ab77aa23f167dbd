//! Token diffing between an original passage and its rewrite.
//!
//! The pipeline runs leaves first:
//!
//! - [`tokenize`]: whitespace tokens with character offsets
//! - [`to_sentences`]: sentence runs ending at `. : ? !`
//! - [`align`]: Levenshtein edit script between two token runs
//! - [`consolidate`]: keep/replace runs over the original tokens
//!
//! [`compare`] ties them together. All functions here are pure and safe to
//! call from a worker thread.
//!
//! # Example
//!
//! ```
//! use redraft::diff::{CompareOptions, TokenAction, compare};
//!
//! let cmp = compare("The cat sat.", "The cat sits.", &CompareOptions::default());
//! assert_eq!(
//!     cmp.actions,
//!     vec![TokenAction::keep(2), TokenAction::replace(1, "sits.")]
//! );
//! ```

mod align;
mod consolidate;
mod sentence;
mod token;

pub use align::{EditAction, align};
pub use consolidate::{TokenAction, consolidate, covered_tokens};
pub use sentence::{Sentence, TERMINATORS, to_sentences};
pub use token::{Token, tokenize};

/// How the two texts are paired before alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignMode {
    /// Align sentence `i` of the original against sentence `i` of the rewrite.
    ///
    /// Keeps the table small and stops a dropped sentence from smearing
    /// replacements across the rest of the passage.
    #[default]
    Sentences,
    /// Align the full token sequences in one table.
    Whole,
}

/// Options for [`compare`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub mode: AlignMode,
}

impl CompareOptions {
    /// Set the pairing mode.
    #[must_use]
    pub fn with_mode(mut self, mode: AlignMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Result of comparing an original passage against its rewrite.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Comparison {
    /// Tokens of the original passage, offsets relative to the passage.
    pub tokens: Vec<Token>,
    /// Keep/replace runs covering every token in `tokens`.
    pub actions: Vec<TokenAction>,
}

impl Comparison {
    /// True when the rewrite changes nothing.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.actions.iter().all(TokenAction::is_keep)
    }

    /// Number of replacement runs.
    #[must_use]
    pub fn change_count(&self) -> usize {
        self.actions.iter().filter(|a| !a.is_keep()).count()
    }
}

/// Compare `original` against `rewritten`.
///
/// In [`AlignMode::Sentences`] sentences are paired by index. Original
/// sentences without a partner are kept; rewritten sentences without a
/// partner become one insertion after the last original token. Either way the
/// actions cover every original token.
#[must_use]
pub fn compare(original: &str, rewritten: &str, options: &CompareOptions) -> Comparison {
    let tokens = tokenize(original);
    let target = tokenize(rewritten);

    let actions = match options.mode {
        AlignMode::Whole => consolidate(&align(&tokens, &target)),
        AlignMode::Sentences => compare_sentences(&tokens, &target),
    };
    debug_assert_eq!(covered_tokens(&actions), tokens.len());

    Comparison { tokens, actions }
}

fn compare_sentences(tokens: &[Token], target: &[Token]) -> Vec<TokenAction> {
    let left = to_sentences(tokens);
    let right = to_sentences(target);
    if left.is_empty() && right.is_empty() {
        return vec![TokenAction::keep(0)];
    }

    let paired = left.len().min(right.len());

    let mut actions = Vec::new();
    for (a, b) in left.iter().zip(&right) {
        actions.extend(consolidate(&align(a, b)));
    }

    let unpaired: usize = left[paired..].iter().map(Vec::len).sum();
    if unpaired > 0 {
        actions.push(TokenAction::keep(unpaired));
    }

    let extra: Vec<&str> = right[paired..]
        .iter()
        .flatten()
        .map(|t| t.text.as_str())
        .collect();
    if !extra.is_empty() {
        let extra = extra.join(" ");
        // A trailing replacement already ends at the last token; extend it
        // rather than stacking an insertion marker on top of it.
        match actions.last_mut() {
            Some(TokenAction {
                replacement: Some(text),
                ..
            }) => {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(&extra);
            }
            _ => actions.push(TokenAction::replace(0, extra)),
        }
    }

    actions
}
