//! Annotation classifier for Delver.
//!
//! Turns the free-text notes of a dungeon document into typed [`Note`]s by
//! trying an ordered list of patterns with named capture groups. The first
//! pattern that matches decides the note's shape; derived prose (discovery
//! messages, imperatives, alternate room descriptions) is generated once here
//! and never changes afterwards.
//!
//! [`Note`]: dv_core::Note

/// Classification of a sentence into a note kind.
pub mod classify;
/// Item-list parsing.
pub mod items;
/// Key requirements on doors.
pub mod keys;
/// The ordered pattern table.
pub mod patterns;
/// Imperatives derived from trigger phrases.
pub mod trigger;

pub use classify::{classify, classify_record};
pub use items::parse_items;
pub use keys::{key_count, keys_required};
pub use trigger::imperative_for;
