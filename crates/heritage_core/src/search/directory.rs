//! In-memory directory search over approved members.
//!
//! # Responsibility
//! - Filter members by a case-insensitive substring across name,
//!   relation and parent fields.
//! - Sort by last name and group into alphabetical sections.
//!
//! # Invariants
//! - Section letters are always emitted in ascending order; the sort
//!   order only affects members inside each section.
//! - An empty search term matches everyone.
//! - Ties in the sort keep input order (the submitted order).

use crate::model::member::MemberRecord;
use std::collections::BTreeMap;

/// Sort direction for the last-name ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Directory query input, one field per page control.
#[derive(Debug, Clone, Default)]
pub struct DirectoryQuery {
    /// Free-text search term; blank matches all members.
    pub term: String,
    pub order: SortOrder,
}

/// One alphabetical section of the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryGroup {
    /// Uppercased first letter of the last name; `'?'` when missing.
    pub letter: char,
    pub members: Vec<MemberRecord>,
}

/// Runs the full directory pipeline: filter, sort, group.
pub fn search_directory(members: &[MemberRecord], query: &DirectoryQuery) -> Vec<DirectoryGroup> {
    group_by_letter(&filter_and_sort(members, query))
}

/// Filters by substring match and sorts by lowercased last name.
pub fn filter_and_sort(members: &[MemberRecord], query: &DirectoryQuery) -> Vec<MemberRecord> {
    let term = query.term.trim().to_lowercase();
    let mut matched: Vec<MemberRecord> = members
        .iter()
        .filter(|member| term.is_empty() || matches_term(member, &term))
        .cloned()
        .collect();

    matched.sort_by(|a, b| {
        let name_a = a.last_name.to_lowercase();
        let name_b = b.last_name.to_lowercase();
        match query.order {
            SortOrder::Ascending => name_a.cmp(&name_b),
            SortOrder::Descending => name_b.cmp(&name_a),
        }
    });

    matched
}

/// Groups an already-sorted member list into alphabetical sections.
pub fn group_by_letter(members: &[MemberRecord]) -> Vec<DirectoryGroup> {
    let mut groups: BTreeMap<char, Vec<MemberRecord>> = BTreeMap::new();
    for member in members {
        let letter = member
            .last_name
            .trim()
            .chars()
            .next()
            .map(|first| first.to_ascii_uppercase())
            .unwrap_or('?');
        groups.entry(letter).or_default().push(member.clone());
    }

    groups
        .into_iter()
        .map(|(letter, members)| DirectoryGroup { letter, members })
        .collect()
}

fn matches_term(member: &MemberRecord, term: &str) -> bool {
    let mut haystacks: Vec<String> = vec![
        member.full_name(),
        member.first_name.clone(),
        member.last_name.clone(),
    ];
    for value in [
        member.nickname.as_deref(),
        member.relation.as_deref(),
        member.father_name.as_deref(),
        member.mother_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        haystacks.push(value.to_string());
    }

    haystacks
        .iter()
        .any(|value| value.to_lowercase().contains(term))
}
