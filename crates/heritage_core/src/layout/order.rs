//! Sibling display-order state for the nested tree view.
//!
//! # Responsibility
//! - Remember a per-parent permutation of child keys across layout calls.
//! - Apply a permutation without losing children it does not name.
//!
//! # Invariants
//! - An entry is created lazily, the first time a parent unit with more
//!   than one child is laid out.
//! - The only mutation is swapping two adjacent siblings.
//! - State lives for the lifetime of one tree view; it is never persisted.

use crate::graph::PersonKey;
use std::collections::HashMap;

/// Direction of an adjacent-sibling swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    /// Swap with the sibling before the index.
    Previous,
    /// Swap with the sibling after the index.
    Next,
}

/// Caller-controlled sibling permutations, keyed per parent unit.
///
/// The key for a couple is `"A+B"` with the two names in lexicographic
/// order, so both orientations of the couple address the same entry;
/// an unpartnered parent uses its own name.
#[derive(Debug, Clone, Default)]
pub struct SiblingOrder {
    orders: HashMap<String, Vec<PersonKey>>,
}

impl SiblingOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the stable map key for a parent unit.
    pub fn unit_key(person: &PersonKey, spouse: Option<&PersonKey>) -> String {
        match spouse {
            Some(spouse) => {
                let (a, b) = if person.as_str() <= spouse.as_str() {
                    (person, spouse)
                } else {
                    (spouse, person)
                };
                format!("{a}+{b}")
            }
            None => person.as_str().to_string(),
        }
    }

    /// Returns the stored permutation for a parent unit, if any.
    pub fn get(&self, unit_key: &str) -> Option<&[PersonKey]> {
        self.orders.get(unit_key).map(Vec::as_slice)
    }

    /// Records the initial ordering for a parent unit with multiple
    /// children. Existing entries are left untouched.
    pub(crate) fn ensure(&mut self, unit_key: &str, children: &[PersonKey]) {
        if children.len() > 1 && !self.orders.contains_key(unit_key) {
            self.orders
                .insert(unit_key.to_string(), children.to_vec());
        }
    }

    /// Swaps the child at `index` with its neighbor in `direction`.
    ///
    /// Returns `false` when the unit has no stored order or the swap would
    /// run off either end.
    pub fn swap_adjacent(
        &mut self,
        unit_key: &str,
        index: usize,
        direction: SwapDirection,
    ) -> bool {
        let Some(order) = self.orders.get_mut(unit_key) else {
            return false;
        };
        let neighbor = match direction {
            SwapDirection::Previous => {
                if index == 0 || index >= order.len() {
                    return false;
                }
                index - 1
            }
            SwapDirection::Next => {
                if index + 1 >= order.len() {
                    return false;
                }
                index + 1
            }
        };
        order.swap(index, neighbor);
        true
    }

    /// Applies the stored permutation to a child list.
    ///
    /// Named children come first in permutation order; children the
    /// permutation does not name keep their original relative order at the
    /// end. Without a stored entry the input order passes through.
    pub fn apply(&self, unit_key: &str, children: &[PersonKey]) -> Vec<PersonKey> {
        let Some(order) = self.orders.get(unit_key) else {
            return children.to_vec();
        };
        let mut arranged: Vec<PersonKey> = order
            .iter()
            .filter(|key| children.contains(key))
            .cloned()
            .collect();
        for child in children {
            if !arranged.contains(child) {
                arranged.push(child.clone());
            }
        }
        arranged
    }
}

#[cfg(test)]
mod tests {
    use super::{SiblingOrder, SwapDirection};
    use crate::graph::PersonKey;

    fn keys(names: &[&str]) -> Vec<PersonKey> {
        names.iter().map(|n| PersonKey::new(*n)).collect()
    }

    #[test]
    fn unit_key_is_orientation_independent_for_couples() {
        let a = PersonKey::new("Ada Fomuso");
        let b = PersonKey::new("Paul Fomuso");
        assert_eq!(
            SiblingOrder::unit_key(&a, Some(&b)),
            SiblingOrder::unit_key(&b, Some(&a))
        );
        assert_eq!(SiblingOrder::unit_key(&a, None), "Ada Fomuso");
    }

    #[test]
    fn ensure_skips_single_child_units() {
        let mut order = SiblingOrder::new();
        order.ensure("Ada Fomuso", &keys(&["John Fomuso"]));
        assert!(order.get("Ada Fomuso").is_none());
    }

    #[test]
    fn swap_adjacent_reorders_within_bounds() {
        let mut order = SiblingOrder::new();
        order.ensure("Ada Fomuso", &keys(&["John Fomuso", "Jane Fomuso"]));

        assert!(order.swap_adjacent("Ada Fomuso", 0, SwapDirection::Next));
        assert_eq!(
            order.get("Ada Fomuso").unwrap(),
            keys(&["Jane Fomuso", "John Fomuso"]).as_slice()
        );

        assert!(!order.swap_adjacent("Ada Fomuso", 0, SwapDirection::Previous));
        assert!(!order.swap_adjacent("Ada Fomuso", 1, SwapDirection::Next));
        assert!(!order.swap_adjacent("unknown", 0, SwapDirection::Next));
    }

    #[test]
    fn apply_reorders_named_children_and_appends_the_rest() {
        let mut order = SiblingOrder::new();
        order.ensure("Ada Fomuso", &keys(&["John Fomuso", "Jane Fomuso"]));
        order.swap_adjacent("Ada Fomuso", 0, SwapDirection::Next);

        // A new sibling appeared after the permutation was stored.
        let current = keys(&["John Fomuso", "Jane Fomuso", "June Fomuso"]);
        let arranged = order.apply("Ada Fomuso", &current);
        assert_eq!(
            arranged,
            keys(&["Jane Fomuso", "John Fomuso", "June Fomuso"])
        );

        // A sibling the permutation names but the graph no longer has is
        // simply dropped.
        let shrunk = keys(&["Jane Fomuso"]);
        assert_eq!(order.apply("Ada Fomuso", &shrunk), keys(&["Jane Fomuso"]));
    }
}
