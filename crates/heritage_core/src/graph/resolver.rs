//! Relationship resolver over approved member records.
//!
//! # Responsibility
//! - Build one `PersonNode` per record, keyed by rendered full name.
//! - Populate children edges from father/mother references and spouse
//!   links from explicit and inferred pairings.
//! - Detect the root set (people with no resolvable in-system parent).
//!
//! # Invariants
//! - `children` lists are deduplicated and keep first-insertion order.
//! - Spouse links are symmetric after resolution.
//! - Resolution is deterministic for a fixed input list.

use crate::model::member::MemberRecord;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Join key for relationship links: the rendered full name of a person.
///
/// The website links records by the full-name string a visitor typed into
/// the father/mother/spouse fields, not by the storage-assigned id. The
/// newtype keeps that design decision explicit at every call site. Known
/// limitation carried over for compatibility: two different people sharing
/// a rendered full name resolve to one merged node (last record wins; the
/// resolver logs a warning when it happens).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonKey(String);

impl PersonKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PersonKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One vertex of the relationship graph.
///
/// Carries the source record so the rendering layer can show bio, photo
/// and contact details without going back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonNode {
    pub key: PersonKey,
    pub member: MemberRecord,
    /// Keys of records naming this person as father or mother.
    pub children: Vec<PersonKey>,
    /// Explicitly named or inferred spouse, if resolvable.
    pub spouse: Option<PersonKey>,
}

/// Resolved relationship graph plus its root set.
///
/// Iteration via [`FamilyGraph::keys`] follows first-insertion order of the
/// input records, which keeps downstream layouts deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FamilyGraph {
    people: HashMap<PersonKey, PersonNode>,
    order: Vec<PersonKey>,
    roots: Vec<PersonKey>,
}

impl FamilyGraph {
    /// Returns an empty graph, the state before any records arrive.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up one person by key.
    pub fn get(&self, key: &PersonKey) -> Option<&PersonNode> {
        self.people.get(key)
    }

    /// Iterates keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &PersonKey> {
        self.order.iter()
    }

    /// Keys of people with no resolvable in-system parent.
    pub fn roots(&self) -> &[PersonKey] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Builds the relationship graph from an approved-record snapshot.
///
/// Pure apart from logging: calling it twice on the same input yields
/// structurally identical output. Dangling father/mother/spouse names are
/// treated as people outside the system and produce no edges. The inferred
/// spouse pass runs after the explicit one and may overwrite it, last
/// writer in input order wins; this mirrors the behavior of the original
/// website and is covered by a regression test. A partner displaced by an
/// overwrite is widowed rather than left pointing at a person who no
/// longer points back.
pub fn resolve(records: &[MemberRecord]) -> FamilyGraph {
    let mut people: HashMap<PersonKey, PersonNode> = HashMap::new();
    let mut order: Vec<PersonKey> = Vec::new();

    for record in records {
        let key = record.person_key();
        if people.contains_key(&key) {
            warn!(
                "event=duplicate_person_key module=graph status=ok key={} action=merge_last_wins",
                key
            );
        } else {
            order.push(key.clone());
        }
        people.insert(
            key.clone(),
            PersonNode {
                key,
                member: record.clone(),
                children: Vec::new(),
                spouse: None,
            },
        );
    }

    // Children pass: any record naming an existing person as father or
    // mother becomes that person's child, once.
    for record in records {
        let child = record.person_key();
        for parent_name in [record.father_name.as_deref(), record.mother_name.as_deref()] {
            let Some(parent_key) = reference_key(parent_name) else {
                continue;
            };
            if let Some(parent) = people.get_mut(&parent_key) {
                if !parent.children.contains(&child) {
                    parent.children.push(child.clone());
                }
            }
        }
    }

    // Explicit spouse pass: symmetric link when the named spouse resolves.
    for record in records {
        let key = record.person_key();
        let Some(spouse_key) = reference_key(record.spouse_name.as_deref()) else {
            continue;
        };
        if spouse_key != key && people.contains_key(&spouse_key) && people.contains_key(&key) {
            link_spouses(&mut people, &key, &spouse_key);
        }
    }

    // Inferred spouse pass: two resolvable parents of the same record are
    // taken to be married to each other. Runs after the explicit pass and
    // may overwrite it; input record order decides the final pairing.
    for record in records {
        let (Some(father_key), Some(mother_key)) = (
            reference_key(record.father_name.as_deref()),
            reference_key(record.mother_name.as_deref()),
        ) else {
            continue;
        };
        if father_key != mother_key
            && people.contains_key(&father_key)
            && people.contains_key(&mother_key)
        {
            link_spouses(&mut people, &father_key, &mother_key);
        }
    }

    // Root pass: a person is a root iff no parent reference resolves to a
    // node. Empty or unresolved names do not disqualify.
    let roots: Vec<PersonKey> = order
        .iter()
        .filter(|key| {
            people.get(*key).is_some_and(|node| {
                let father = reference_key(node.member.father_name.as_deref());
                let mother = reference_key(node.member.mother_name.as_deref());
                !father.is_some_and(|parent| people.contains_key(&parent))
                    && !mother.is_some_and(|parent| people.contains_key(&parent))
            })
        })
        .cloned()
        .collect();

    info!(
        "event=family_resolve module=graph status=ok people={} roots={}",
        order.len(),
        roots.len()
    );

    FamilyGraph {
        people,
        order,
        roots,
    }
}

fn reference_key(name: Option<&str>) -> Option<PersonKey> {
    let name = name?;
    if name.trim().is_empty() {
        return None;
    }
    // Matching is exact on the raw string, including case and whitespace.
    Some(PersonKey::new(name))
}

/// Symmetrically marries `a` and `b`. A partner displaced by the new
/// pairing is widowed (its spouse pointer cleared) so spouse links stay
/// symmetric even when a later pass overwrites an earlier one.
fn link_spouses(people: &mut HashMap<PersonKey, PersonNode>, a: &PersonKey, b: &PersonKey) {
    for (this, other) in [(a, b), (b, a)] {
        let displaced = people.get(this).and_then(|node| {
            node.spouse
                .clone()
                .filter(|previous| previous != other && previous != this)
        });
        if let Some(previous) = displaced {
            if let Some(node) = people.get_mut(&previous) {
                if node.spouse.as_ref() == Some(this) {
                    node.spouse = None;
                }
            }
        }
        if let Some(node) = people.get_mut(this) {
            node.spouse = Some(other.clone());
        }
    }
}
