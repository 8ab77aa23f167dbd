//! Collapse elementary edit steps into keep/replace runs.

use crate::diff::align::EditAction;
use std::fmt;

/// A run of source tokens that is either kept or replaced as a whole.
///
/// `replacement == None` keeps `token_count` source tokens. `Some(text)`
/// replaces the next `token_count` source tokens (possibly zero, a pure
/// insertion) with `text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenAction {
    pub token_count: usize,
    pub replacement: Option<String>,
}

impl TokenAction {
    /// Keep `token_count` source tokens unchanged.
    #[must_use]
    pub fn keep(token_count: usize) -> Self {
        Self {
            token_count,
            replacement: None,
        }
    }

    /// Replace `token_count` source tokens with `text`.
    #[must_use]
    pub fn replace(token_count: usize, text: impl Into<String>) -> Self {
        Self {
            token_count,
            replacement: Some(text.into()),
        }
    }

    /// True when this run keeps its tokens.
    #[must_use]
    pub fn is_keep(&self) -> bool {
        self.replacement.is_none()
    }

    /// True for a replacement that consumes no source tokens.
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.replacement.is_some() && self.token_count == 0
    }
}

impl fmt::Display for TokenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.replacement {
            None => write!(f, "{}/keep", self.token_count),
            Some(text) => write!(f, "{}/'{text}'", self.token_count),
        }
    }
}

/// Total number of source tokens covered by `actions`.
#[must_use]
pub fn covered_tokens(actions: &[TokenAction]) -> usize {
    actions.iter().map(|a| a.token_count).sum()
}

/// Accumulates one dirty run.
#[derive(Default)]
struct DirtyRun {
    consumed: usize,
    text: String,
    active: bool,
}

impl DirtyRun {
    fn push_text(&mut self, text: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(text);
    }

    fn take(&mut self) -> TokenAction {
        let run = std::mem::take(self);
        TokenAction::replace(run.consumed, run.text)
    }
}

/// Merge consecutive steps of the same kind.
///
/// Copy runs become keep actions. Mixed Insert/Delete/Replace runs become one
/// replacement whose count is the number of consumed source tokens and whose
/// text joins the inserted and replacing tokens with single spaces. The final
/// run is always emitted, including an insert-only run at the tail. An empty
/// script still yields one action, a keep of zero tokens.
#[must_use]
pub fn consolidate(actions: &[EditAction]) -> Vec<TokenAction> {
    let mut result = Vec::new();
    let mut copies = 0usize;
    let mut dirty = DirtyRun::default();

    for action in actions {
        match action {
            EditAction::Copy(_) => {
                if dirty.active {
                    result.push(dirty.take());
                }
                copies += 1;
            }
            EditAction::Insert(token) | EditAction::Replace(token) => {
                if copies > 0 {
                    result.push(TokenAction::keep(std::mem::take(&mut copies)));
                }
                dirty.active = true;
                dirty.consumed += action.source_len();
                dirty.push_text(&token.text);
            }
            EditAction::Delete => {
                if copies > 0 {
                    result.push(TokenAction::keep(std::mem::take(&mut copies)));
                }
                dirty.active = true;
                dirty.consumed += 1;
            }
        }
    }

    if dirty.active {
        result.push(dirty.take());
    } else {
        result.push(TokenAction::keep(copies));
    }

    result
}
