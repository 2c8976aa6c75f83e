//! Relationship graph built from flat member records.
//!
//! # Responsibility
//! - Turn name-referencing records into a linked parent/child/spouse graph.
//! - Expose the node lookup the rendering layer uses for detail display.
//!
//! # Invariants
//! - The graph is a pure function of the approved-record list and is
//!   rebuilt from scratch on every input change.
//! - Unresolvable names never produce nodes or errors; they stay as text
//!   on the referencing record.

pub mod resolver;

pub use resolver::{resolve, FamilyGraph, PersonKey, PersonNode};
