//! Tree layout engine over the resolved relationship graph.
//!
//! # Responsibility
//! - Turn the graph into renderable structures: a recursive nested tree
//!   and a generation-banded view with couples merged into one unit.
//! - Hold the sibling-reorder state that outlives single layout calls.
//!
//! # Invariants
//! - Every traversal carries a visited set; cyclic parent chains truncate
//!   instead of recursing forever.
//! - Layout output needs no graph queries beyond the per-person lookup.

use crate::graph::PersonKey;
use serde::Serialize;

pub mod banded;
pub mod nested;
pub mod order;

pub use banded::{build_bands, generations, GenerationBand};
pub use nested::{build_nested, FamilyUnitNode};
pub use order::{SiblingOrder, SwapDirection};

/// One visual layout entity: a person alone or merged with their spouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FamilyUnit {
    Single {
        person: PersonKey,
    },
    Couple {
        person: PersonKey,
        spouse: PersonKey,
    },
}

impl FamilyUnit {
    /// Primary person of the unit.
    pub fn person(&self) -> &PersonKey {
        match self {
            Self::Single { person } | Self::Couple { person, .. } => person,
        }
    }

    /// Spouse of the unit, when it is a couple.
    pub fn spouse(&self) -> Option<&PersonKey> {
        match self {
            Self::Single { .. } => None,
            Self::Couple { spouse, .. } => Some(spouse),
        }
    }

    /// Keys rendered by this unit, primary person first.
    pub fn members(&self) -> impl Iterator<Item = &PersonKey> {
        std::iter::once(self.person()).chain(self.spouse())
    }
}
