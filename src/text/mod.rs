//! Rope-backed text storage with live markup.
//!
//! Key types:
//!
//! - [`EditBuffer`]: editable buffer that keeps its [`Overlay`](crate::markup::Overlay)
//!   in sync with every insertion and deletion
//! - [`RopeWrapper`]: character-addressed rope used as storage

mod edit;
mod rope;

pub use edit::EditBuffer;
pub use rope::RopeWrapper;
