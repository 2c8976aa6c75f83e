use heritage_core::{
    search_directory, DirectoryQuery, MemberRecord, SortOrder,
};

fn member(first: &str, last: &str, relation: &str) -> MemberRecord {
    let mut record = MemberRecord::new(first, last);
    if !relation.is_empty() {
        record.relation = Some(relation.to_string());
    }
    record
}

fn family() -> Vec<MemberRecord> {
    vec![
        member("Ada", "Fomuso", "Matriarch"),
        member("John", "Fomuso", "Son of Ada Fomuso"),
        member("Mary", "Lane", "Cousin"),
        member("Abe", "Alpha", ""),
    ]
}

#[test]
fn groups_are_alphabetical_sections_by_last_initial() {
    let groups = search_directory(&family(), &DirectoryQuery::default());

    let letters: Vec<char> = groups.iter().map(|group| group.letter).collect();
    assert_eq!(letters, vec!['A', 'F', 'L']);

    let fomusos: Vec<&str> = groups[1]
        .members
        .iter()
        .map(|member| member.first_name.as_str())
        .collect();
    assert_eq!(fomusos, vec!["Ada", "John"]);
}

#[test]
fn search_term_narrows_across_fields() {
    let query = DirectoryQuery {
        term: "cousin".to_string(),
        ..DirectoryQuery::default()
    };
    let groups = search_directory(&family(), &query);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].letter, 'L');
    assert_eq!(groups[0].members[0].first_name, "Mary");
}

#[test]
fn descending_order_flips_members_not_sections() {
    let query = DirectoryQuery {
        term: String::new(),
        order: SortOrder::Descending,
    };
    let groups = search_directory(&family(), &query);

    // Sections stay ascending even when member sort is descending.
    let letters: Vec<char> = groups.iter().map(|group| group.letter).collect();
    assert_eq!(letters, vec!['A', 'F', 'L']);
}

#[test]
fn no_match_yields_empty_directory() {
    let query = DirectoryQuery {
        term: "nobody here".to_string(),
        ..DirectoryQuery::default()
    };
    assert!(search_directory(&family(), &query).is_empty());
    assert!(search_directory(&[], &DirectoryQuery::default()).is_empty());
}
