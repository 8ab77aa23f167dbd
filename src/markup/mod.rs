//! Replacement spans and the live overlay that tracks them.
//!
//! Key types:
//!
//! - [`Span`]: a character range tagged with its replacement text
//! - [`project`]: maps keep/replace runs onto buffer offsets
//! - [`Overlay`]: the spans and compared region of one buffer, kept valid
//!   across edits
//!
//! # Example
//!
//! ```
//! use redraft::diff::{CompareOptions, compare};
//! use redraft::markup::Overlay;
//!
//! let cmp = compare("The cat sat.", "The cat sits.", &CompareOptions::default());
//! let mut overlay = Overlay::new();
//! overlay.rebuild(&cmp.actions, &cmp.tokens, 0, 12);
//! assert_eq!(overlay.find(9).map(|s| s.replacement.as_str()), Some("sits."));
//!
//! // Typing before the span moves it along
//! overlay.on_edit(0, 4);
//! assert_eq!(overlay.spans()[0].range, 12..16);
//! ```

mod overlay;
mod project;
mod span;

pub use overlay::{Overlay, Scope};
pub use project::project;
pub use span::{Span, SpanKind};
