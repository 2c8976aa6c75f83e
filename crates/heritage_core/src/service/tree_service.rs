//! Family tree view facade.
//!
//! # Responsibility
//! - Hold the latest resolved graph and the sibling-order state for one
//!   tree view.
//! - Recompute the graph wholesale whenever the approved-record snapshot
//!   changes.
//!
//! # Invariants
//! - `set_members` replaces the graph; nothing is patched incrementally.
//! - Sibling-order state survives graph rebuilds and dies with the view.
//! - No state is shared between view instances.

use crate::graph::{resolve, FamilyGraph, PersonKey, PersonNode};
use crate::layout::{
    build_bands, build_nested, FamilyUnitNode, GenerationBand, SiblingOrder, SwapDirection,
};
use crate::model::member::MemberRecord;

/// One tree page's worth of state: resolved graph plus display ordering.
///
/// The surrounding application calls [`FamilyTreeView::set_members`] from
/// its "data changed" handler and re-reads the layouts; this replaces the
/// original site's implicit reactive re-render with an explicit recompute.
#[derive(Debug, Default)]
pub struct FamilyTreeView {
    graph: FamilyGraph,
    sibling_order: SiblingOrder,
}

impl FamilyTreeView {
    /// Creates an empty view; call [`set_members`](Self::set_members) with
    /// the first snapshot to populate it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the relationship graph from a fresh approved snapshot.
    ///
    /// Sibling-order state is kept: permutations for parent units that
    /// still exist keep applying, entries for vanished units go stale
    /// harmlessly.
    pub fn set_members(&mut self, records: &[MemberRecord]) {
        self.graph = resolve(records);
    }

    /// The current resolved graph.
    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    /// Looks up one person for detail display.
    pub fn person(&self, key: &PersonKey) -> Option<&PersonNode> {
        self.graph.get(key)
    }

    /// Lays out the recursive nested tree, seeding sibling order lazily.
    pub fn nested(&mut self) -> Vec<FamilyUnitNode> {
        build_nested(&self.graph, &mut self.sibling_order)
    }

    /// Lays out the generation-banded view.
    pub fn bands(&self) -> Vec<GenerationBand> {
        build_bands(&self.graph)
    }

    /// Swaps two adjacent siblings under one parent unit.
    ///
    /// Returns `false` when the unit has no recorded order yet or the
    /// swap would run off either end.
    pub fn swap_siblings(
        &mut self,
        unit_key: &str,
        index: usize,
        direction: SwapDirection,
    ) -> bool {
        self.sibling_order.swap_adjacent(unit_key, index, direction)
    }

    /// Read access to the sibling-order state, mainly for inspection.
    pub fn sibling_order(&self) -> &SiblingOrder {
        &self.sibling_order
    }
}
