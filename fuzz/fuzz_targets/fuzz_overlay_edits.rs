//! Fuzz target for edits against a reviewed buffer.
//!
//! Replays arbitrary insert/delete/accept sequences through `EditBuffer`.
//! Every operation must either succeed or return an error; none may panic,
//! and the overlay must never point past the end of the buffer.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use redraft::EditBuffer;
use redraft::diff::CompareOptions;

#[derive(Arbitrary, Debug)]
enum Op<'a> {
    Insert { offset: u16, text: &'a str },
    Delete { offset: u16, len: u8 },
    Accept { position: u16 },
    Begin { position: u16 },
}

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    original: &'a str,
    rewritten: &'a str,
    ops: Vec<Op<'a>>,
}

fuzz_target!(|input: Input<'_>| {
    if input.original.len() > 1024 || input.rewritten.len() > 1024 {
        return;
    }

    let mut buf = EditBuffer::with_text(input.original);
    let len = buf.len_chars();
    buf.compare_range(input.rewritten, 0..len, &CompareOptions::default());

    for op in input.ops.iter().take(256) {
        match *op {
            Op::Insert { offset, text } => {
                let _ = buf.insert(usize::from(offset), text);
            }
            Op::Delete { offset, len } => {
                let _ = buf.delete(usize::from(offset), usize::from(len));
            }
            Op::Accept { position } => {
                let _ = buf.accept_at(usize::from(position));
            }
            Op::Begin { position } => {
                buf.overlay_mut().set_begin_indicator(usize::from(position));
            }
        }

        if let Some(scope) = buf.overlay().scope() {
            assert!(scope.start <= scope.end);
            assert!(scope.end <= buf.len_chars());
        }
    }
});
