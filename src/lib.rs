//! `redraft` - Word-level review markup for rewritten text
//!
//! Compares a passage against a rewrite of it, turns the differences into
//! replacement spans over the original, and keeps those spans valid while the
//! passage is edited and individual changes are accepted.
//!
//! The pipeline:
//!
//! - [`diff`]: tokenizer, sentence splitter, Levenshtein alignment and
//!   consolidation into keep/replace runs
//! - [`markup`]: projection onto buffer offsets and the live [`Overlay`]
//! - [`text`]: rope-backed [`EditBuffer`] that routes edits through the overlay
//! - [`session`]: background rewrite requests against a [`Rewriter`]

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow session::SessionOptions etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::inherent_to_string)] // to_string methods are convenient
#![allow(clippy::should_implement_trait)] // from_str naming is intentional
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod diff;
pub mod error;
pub mod event;
pub mod markup;
pub mod session;
pub mod text;

// Re-export core types at crate root
pub use diff::{AlignMode, CompareOptions, Comparison, Token, TokenAction, compare};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use markup::{Overlay, Scope, Span, SpanKind};
pub use session::{CommandSet, FixedRewriter, Rewriter, Session, SessionOptions};
pub use text::{EditBuffer, RopeWrapper};
