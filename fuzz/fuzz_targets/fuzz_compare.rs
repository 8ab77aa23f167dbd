//! Fuzz target for the comparison pipeline.
//!
//! Arbitrary text pairs must compare without panicking, and the resulting
//! runs must cover every original token in both pairing modes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use redraft::diff::{AlignMode, CompareOptions, compare, covered_tokens};
use redraft::markup::project;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    original: &'a str,
    rewritten: &'a str,
    whole: bool,
    region_start: u16,
}

fuzz_target!(|input: Input<'_>| {
    // Keep the DP table small enough for the fuzzer to make progress
    if input.original.len() > 2048 || input.rewritten.len() > 2048 {
        return;
    }

    let mode = if input.whole {
        AlignMode::Whole
    } else {
        AlignMode::Sentences
    };
    let cmp = compare(
        input.original,
        input.rewritten,
        &CompareOptions::default().with_mode(mode),
    );
    assert_eq!(covered_tokens(&cmp.actions), cmp.tokens.len());

    let region_start = usize::from(input.region_start);
    let spans = project(&cmp.actions, &cmp.tokens, region_start);
    for pair in spans.windows(2) {
        assert!(pair[0].end() <= pair[1].start());
    }
});
