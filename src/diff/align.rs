//! Minimum edit distance alignment between token sequences.
//!
//! Classic Levenshtein table over exact token text equality, with the
//! recorded action per cell used to reconstruct the edit script.
//!
//! # Tie-break
//!
//! When several transitions reach the same minimum cost, Insert wins over
//! Delete and Delete wins over Replace. The rendered diff depends on this
//! order, so it is fixed.

use crate::diff::token::Token;

/// One elementary Levenshtein step.
///
/// Carried tokens belong to the target sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditAction {
    /// Drop the next source token.
    Delete,
    /// Insert a target token.
    Insert(Token),
    /// Replace the next source token with a target token.
    Replace(Token),
    /// Keep the next source token; texts are equal.
    Copy(Token),
}

impl EditAction {
    /// True for [`EditAction::Copy`].
    #[must_use]
    pub fn is_copy(&self) -> bool {
        matches!(self, Self::Copy(_))
    }

    /// Number of source tokens this step consumes.
    #[must_use]
    pub fn source_len(&self) -> usize {
        match self {
            Self::Insert(_) => 0,
            Self::Delete | Self::Replace(_) | Self::Copy(_) => 1,
        }
    }

    /// Number of target tokens this step produces.
    #[must_use]
    pub fn target_len(&self) -> usize {
        match self {
            Self::Delete => 0,
            Self::Insert(_) | Self::Replace(_) | Self::Copy(_) => 1,
        }
    }
}

/// Align `source` against `target` and return the edit script in document
/// order.
///
/// The table is `(source.len() + 1) x (target.len() + 1)`, so this is meant for
/// sentence- or paragraph-sized inputs.
#[must_use]
pub fn align(source: &[Token], target: &[Token]) -> Vec<EditAction> {
    let rows = source.len() + 1;
    let cols = target.len() + 1;
    let mut cost = vec![0usize; rows * cols];
    let mut steps: Vec<EditAction> = vec![EditAction::Delete; rows * cols];
    let at = |i: usize, j: usize| i * cols + j;

    for i in 1..rows {
        cost[at(i, 0)] = i;
    }
    for j in 1..cols {
        cost[at(0, j)] = j;
        steps[at(0, j)] = EditAction::Insert(target[j - 1].clone());
    }

    for i in 1..rows {
        for j in 1..cols {
            let here = at(i, j);
            if source[i - 1].text == target[j - 1].text {
                cost[here] = cost[at(i - 1, j - 1)];
                steps[here] = EditAction::Copy(target[j - 1].clone());
                continue;
            }

            let insert = cost[at(i, j - 1)] + 1;
            let delete = cost[at(i - 1, j)] + 1;
            let replace = cost[at(i - 1, j - 1)] + 1;
            let best = insert.min(delete).min(replace);

            cost[here] = best;
            steps[here] = if best == insert {
                EditAction::Insert(target[j - 1].clone())
            } else if best == delete {
                EditAction::Delete
            } else {
                EditAction::Replace(target[j - 1].clone())
            };
        }
    }

    let mut script = Vec::with_capacity(rows.max(cols));
    let (mut i, mut j) = (source.len(), target.len());
    while i > 0 || j > 0 {
        let step = steps[at(i, j)].clone();
        match step {
            EditAction::Insert(_) => j -= 1,
            EditAction::Delete => i -= 1,
            EditAction::Replace(_) | EditAction::Copy(_) => {
                i -= 1;
                j -= 1;
            }
        }
        script.push(step);
    }
    script.reverse();

    script
}
