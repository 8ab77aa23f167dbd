//! Projection of keep/replace runs onto buffer offsets.

use crate::diff::{Token, TokenAction, covered_tokens};
use crate::markup::span::Span;

/// Map `actions` onto absolute character offsets.
///
/// `tokens` are the original tokens the actions were computed against, with
/// offsets relative to `region_start`. Keep runs produce nothing. Replacement
/// runs cover their tokens from the first token's start to the last token's
/// end. Pure insertions become a marker in front of the next original token,
/// or after the last token when none is left. The region end is never passed
/// in, so a tail insertion anchors at the last token's end and any trailing
/// whitespace in the region stays outside the marker.
///
/// The actions must cover exactly `tokens.len()` tokens. A mismatch is a
/// caller bug: debug builds assert, release builds clamp instead of panicking.
#[must_use]
pub fn project(actions: &[TokenAction], tokens: &[Token], region_start: usize) -> Vec<Span> {
    debug_assert_eq!(
        covered_tokens(actions),
        tokens.len(),
        "token actions must cover the original tokens"
    );

    let content_end = tokens.last().map_or(region_start, |t| t.end() + region_start);
    let mut spans = Vec::new();
    let mut k = 0usize;

    for action in actions {
        let Some(text) = &action.replacement else {
            k += action.token_count;
            continue;
        };

        if action.token_count == 0 {
            let anchor = tokens
                .get(k)
                .map_or(content_end, |t| t.start + region_start);
            spans.push(Span::insertion(anchor, region_start, text));
            continue;
        }

        let Some(first) = tokens.get(k) else {
            break;
        };
        let last_idx = (k + action.token_count - 1).min(tokens.len() - 1);
        let last = &tokens[last_idx];
        spans.push(Span::replace(
            first.start + region_start..last.end() + region_start,
            text.clone(),
        ));
        k += action.token_count;
    }

    spans
}
