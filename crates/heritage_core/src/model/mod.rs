//! Domain model for submitted member records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape for submission, moderation and display.
//!
//! # Invariants
//! - Every domain object is identified by a stable `MemberId`.
//! - Visibility is represented by moderation status, not deletion flags.

pub mod member;
