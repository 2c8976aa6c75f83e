//! Generation-banded layout.
//!
//! # Responsibility
//! - Assign a generation depth to every person reachable from a root.
//! - Group people into per-generation bands, merging each couple into one
//!   unit exactly once.
//!
//! # Invariants
//! - Generation propagation carries one visited set per root and refuses
//!   to re-descend into a visited node, so cycles terminate.
//! - Across all bands, each person key appears in exactly one unit.
//! - Band contents follow first-encounter order over the graph's
//!   insertion-ordered key sequence.

use super::FamilyUnit;
use crate::graph::{FamilyGraph, PersonKey};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// All units sharing one generation depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationBand {
    /// Depth from the nearest root; roots are generation 0.
    pub generation: u32,
    pub units: Vec<FamilyUnit>,
}

/// Computes the generation of every person reachable from a root.
///
/// Each root starts a traversal at depth 0 and pushes `depth + 1` to its
/// children. A person reached at several depths keeps the largest one;
/// within a single traversal a visited node is not descended into again.
/// People unreachable from any root (members of a parent cycle) receive no
/// generation and are absent from the result.
pub fn generations(graph: &FamilyGraph) -> HashMap<PersonKey, u32> {
    let mut depths: HashMap<PersonKey, u32> = HashMap::new();
    for root in graph.roots() {
        let mut visited: HashSet<PersonKey> = HashSet::new();
        descend(graph, root, 0, &mut visited, &mut depths);
    }
    depths
}

fn descend(
    graph: &FamilyGraph,
    key: &PersonKey,
    depth: u32,
    visited: &mut HashSet<PersonKey>,
    depths: &mut HashMap<PersonKey, u32>,
) {
    if !visited.insert(key.clone()) {
        return;
    }
    let entry = depths.entry(key.clone()).or_insert(depth);
    if depth > *entry {
        *entry = depth;
    }
    let Some(node) = graph.get(key) else {
        return;
    };
    for child in &node.children {
        descend(graph, child, depth + 1, visited, depths);
    }
}

/// Groups the graph into generation bands with couples merged.
///
/// A person whose spouse lands in the same generation forms a couple unit
/// with them; the spouse is marked consumed and never emitted again, not
/// standalone and not inside another couple. Spouses ending up in
/// different generations stay singleton units in their own bands.
pub fn build_bands(graph: &FamilyGraph) -> Vec<GenerationBand> {
    let depths = generations(graph);

    let mut by_generation: BTreeMap<u32, Vec<&PersonKey>> = BTreeMap::new();
    for key in graph.keys() {
        if let Some(depth) = depths.get(key) {
            by_generation.entry(*depth).or_default().push(key);
        }
    }

    let mut consumed: HashSet<PersonKey> = HashSet::new();
    let mut bands = Vec::with_capacity(by_generation.len());
    for (generation, keys) in by_generation {
        let mut units = Vec::new();
        for key in keys {
            if consumed.contains(key) {
                continue;
            }
            consumed.insert(key.clone());

            let spouse = graph
                .get(key)
                .and_then(|node| node.spouse.as_ref())
                .filter(|spouse| {
                    !consumed.contains(*spouse) && depths.get(*spouse) == Some(&generation)
                });
            match spouse {
                Some(spouse) => {
                    consumed.insert(spouse.clone());
                    units.push(FamilyUnit::Couple {
                        person: key.clone(),
                        spouse: spouse.clone(),
                    });
                }
                None => units.push(FamilyUnit::Single { person: key.clone() }),
            }
        }
        bands.push(GenerationBand { generation, units });
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::{build_bands, generations, FamilyUnit};
    use crate::graph::{resolve, PersonKey};
    use crate::model::member::MemberRecord;

    fn member(full: &str, father: &str, mother: &str) -> MemberRecord {
        let (first, last) = full.split_once(' ').unwrap_or((full, ""));
        let mut record = MemberRecord::new(first, last);
        if !father.is_empty() {
            record.father_name = Some(father.to_string());
        }
        if !mother.is_empty() {
            record.mother_name = Some(mother.to_string());
        }
        record
    }

    #[test]
    fn deeper_path_wins_across_roots() {
        // Lone Root -> Mid Child -> Deep Child, and Deep Child is also a
        // direct child of Other Root: depth 2 beats depth 1.
        let records = vec![
            member("Lone Root", "", ""),
            member("Other Root", "", ""),
            member("Mid Child", "Lone Root", ""),
            member("Deep Child", "Mid Child", "Other Root"),
        ];
        let graph = resolve(&records);
        let depths = generations(&graph);

        assert_eq!(depths.get(&PersonKey::new("Lone Root")), Some(&0));
        assert_eq!(depths.get(&PersonKey::new("Other Root")), Some(&0));
        assert_eq!(depths.get(&PersonKey::new("Mid Child")), Some(&1));
        assert_eq!(depths.get(&PersonKey::new("Deep Child")), Some(&2));
    }

    #[test]
    fn cycle_members_receive_no_generation() {
        let records = vec![
            member("Ann Cycle", "Cam Cycle", ""),
            member("Ben Cycle", "Ann Cycle", ""),
            member("Cam Cycle", "Ben Cycle", ""),
        ];
        let graph = resolve(&records);

        assert!(generations(&graph).is_empty());
        assert!(build_bands(&graph).is_empty());
    }

    #[test]
    fn couple_in_same_band_merges_once() {
        let records = vec![
            member("Paul Fomuso", "", ""),
            member("Ada Fomuso", "", ""),
            member("John Fomuso", "Paul Fomuso", "Ada Fomuso"),
        ];
        let graph = resolve(&records);
        let bands = build_bands(&graph);

        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].generation, 0);
        assert_eq!(
            bands[0].units,
            vec![FamilyUnit::Couple {
                person: PersonKey::new("Paul Fomuso"),
                spouse: PersonKey::new("Ada Fomuso"),
            }]
        );
        assert_eq!(
            bands[1].units,
            vec![FamilyUnit::Single {
                person: PersonKey::new("John Fomuso"),
            }]
        );
    }

    #[test]
    fn spouses_in_different_generations_stay_single() {
        // Root marries their grandchild-in-law's generation: the spouse
        // sits at depth 1, the person at depth 0, so no couple forms.
        let mut root = member("Paul Fomuso", "", "");
        root.spouse_name = Some("Mary Lane".to_string());
        let mut spouse = member("Mary Lane", "Ada Fomuso", "");
        spouse.spouse_name = Some("Paul Fomuso".to_string());
        let records = vec![root, member("Ada Fomuso", "", ""), spouse];

        let graph = resolve(&records);
        let bands = build_bands(&graph);

        let flattened: Vec<&FamilyUnit> =
            bands.iter().flat_map(|band| band.units.iter()).collect();
        assert!(flattened
            .iter()
            .all(|unit| matches!(unit, FamilyUnit::Single { .. })));
    }
}
