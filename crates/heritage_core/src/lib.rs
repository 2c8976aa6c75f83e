//! Core domain logic for the Heritage family website.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use graph::{resolve, FamilyGraph, PersonKey, PersonNode};
pub use layout::{
    build_bands, build_nested, generations, FamilyUnit, FamilyUnitNode, GenerationBand,
    SiblingOrder, SwapDirection,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{MemberId, MemberRecord, MemberStatus, MemberValidationError};
pub use repo::member_repo::{
    MemberListQuery, MemberRepository, RepoError, RepoResult, SqliteMemberRepository,
};
pub use search::directory::{
    filter_and_sort, group_by_letter, search_directory, DirectoryGroup, DirectoryQuery, SortOrder,
};
pub use service::admin_service::{AdminConfig, AdminConfigError, AdminGate};
pub use service::member_service::{
    EditMemberRequest, MemberService, MemberServiceError, SubmitMemberRequest,
};
pub use service::tree_service::FamilyTreeView;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
