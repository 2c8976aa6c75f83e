//! Recursive nested tree layout.
//!
//! # Responsibility
//! - Render each root as a family unit followed by its children row,
//!   depth-first, spouses merged into the parent unit.
//! - Apply caller-held sibling permutations while laying out children.
//!
//! # Invariants
//! - One visited set per root traversal; a node already visited in the
//!   current traversal renders nothing, which truncates cycles.
//! - A spouse consumed by a unit is not re-rendered as its own root.
//! - A unit's child row is the union of both spouses' children.

use super::order::SiblingOrder;
use super::FamilyUnit;
use crate::graph::{FamilyGraph, PersonKey};
use serde::Serialize;
use std::collections::HashSet;

/// One node of the nested layout: a unit plus its laid-out children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilyUnitNode {
    pub unit: FamilyUnit,
    pub children: Vec<FamilyUnitNode>,
}

/// Lays out every root as a recursive family-unit tree.
///
/// `sibling_order` is read for stored permutations and lazily seeded for
/// parent units that expose more than one child, which is why it is taken
/// mutably; layout itself stays a function of the graph.
pub fn build_nested(graph: &FamilyGraph, sibling_order: &mut SiblingOrder) -> Vec<FamilyUnitNode> {
    let mut trees = Vec::new();
    let mut consumed_roots: HashSet<PersonKey> = HashSet::new();

    for root in graph.roots() {
        if consumed_roots.contains(root) {
            continue;
        }
        let mut visited = HashSet::new();
        if let Some(node) = render_unit(graph, root, &mut visited, sibling_order) {
            if let Some(spouse) = node.unit.spouse() {
                consumed_roots.insert(spouse.clone());
            }
            trees.push(node);
        }
    }

    trees
}

fn render_unit(
    graph: &FamilyGraph,
    key: &PersonKey,
    visited: &mut HashSet<PersonKey>,
    sibling_order: &mut SiblingOrder,
) -> Option<FamilyUnitNode> {
    if !visited.insert(key.clone()) {
        return None;
    }
    let person = graph.get(key)?;

    let spouse = person
        .spouse
        .as_ref()
        .filter(|spouse| *spouse != key && !visited.contains(*spouse))
        .and_then(|spouse| graph.get(spouse));
    if let Some(spouse) = spouse {
        visited.insert(spouse.key.clone());
    }

    // Children row: union of both spouses' children, person's side first.
    let mut child_keys = person.children.clone();
    if let Some(spouse) = spouse {
        for child in &spouse.children {
            if !child_keys.contains(child) {
                child_keys.push(child.clone());
            }
        }
    }

    let unit_key = SiblingOrder::unit_key(key, spouse.map(|node| &node.key));
    sibling_order.ensure(&unit_key, &child_keys);
    let arranged = sibling_order.apply(&unit_key, &child_keys);

    let children = arranged
        .iter()
        .filter_map(|child| render_unit(graph, child, visited, sibling_order))
        .collect();

    let unit = match spouse {
        Some(spouse) => FamilyUnit::Couple {
            person: key.clone(),
            spouse: spouse.key.clone(),
        },
        None => FamilyUnit::Single { person: key.clone() },
    };

    Some(FamilyUnitNode { unit, children })
}
