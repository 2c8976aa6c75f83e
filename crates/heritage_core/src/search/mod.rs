//! Directory search entry points.
//!
//! # Responsibility
//! - Expose filter/sort/group queries over the approved member list.
//! - Keep result shaping inside core so every UI renders the same
//!   directory.

pub mod directory;
