//! Member lifecycle use-case service.
//!
//! # Responsibility
//! - Accept visitor submissions with the website's required-field policy.
//! - Provide the admin moderation surface: approve, reject, edit, remove.
//! - Supply the approved-record snapshot consumed by the tree view.
//!
//! # Invariants
//! - Submissions always enter storage as `Pending`.
//! - Approve/reject act only on pending records; remove only on approved.
//! - Edits use full field replacement semantics.

use crate::model::member::{MemberId, MemberRecord, MemberStatus, MemberValidationError};
use crate::repo::member_repo::{MemberListQuery, MemberRepository, RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for member lifecycle use-cases.
#[derive(Debug)]
pub enum MemberServiceError {
    /// A submission field required by the website form is blank.
    MissingField(&'static str),
    /// Model-level validation failed.
    Validation(MemberValidationError),
    /// Target member does not exist.
    MemberNotFound(MemberId),
    /// Operation requires a pending record but the target is approved.
    NotPending(MemberId),
    /// Operation requires an approved record but the target is pending.
    NotApproved(MemberId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for MemberServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field is blank: {field}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::NotPending(id) => write!(f, "member is not pending: {id}"),
            Self::NotApproved(id) => write!(f, "member is not approved: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent member state: {details}"),
        }
    }
}

impl Error for MemberServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemberValidationError> for MemberServiceError {
    fn from(value: MemberValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for MemberServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::MemberNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Visitor-facing submission input, one field per form control.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitMemberRequest {
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub father_name: String,
    pub mother_name: String,
    pub spouse_name: Option<String>,
    pub relation: String,
    pub bio: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub photo: Option<String>,
}

/// Admin-facing edit input. All fields replace the stored values; the
/// admin form has no required-field policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditMemberRequest {
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub spouse_name: Option<String>,
    pub relation: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub photo: Option<String>,
}

/// Member lifecycle service facade.
pub struct MemberService<R: MemberRepository> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Accepts a visitor submission into the pending queue.
    ///
    /// # Contract
    /// - First/last name, both parent names, relation and bio must be
    ///   non-blank, matching the website form.
    /// - The stored record has `status = Pending`.
    ///
    /// # Errors
    /// - [`MemberServiceError::MissingField`] for blank required input.
    /// - Validation and repository errors unchanged.
    pub fn submit(
        &self,
        request: &SubmitMemberRequest,
    ) -> Result<MemberRecord, MemberServiceError> {
        require_field("first_name", &request.first_name)?;
        require_field("last_name", &request.last_name)?;
        require_field("father_name", &request.father_name)?;
        require_field("mother_name", &request.mother_name)?;
        require_field("relation", &request.relation)?;
        require_field("bio", &request.bio)?;

        let mut member = MemberRecord::new(request.first_name.trim(), request.last_name.trim());
        member.salutation = normalize_optional(request.salutation.as_deref());
        member.nickname = normalize_optional(request.nickname.as_deref());
        member.father_name = Some(request.father_name.trim().to_string());
        member.mother_name = Some(request.mother_name.trim().to_string());
        member.spouse_name = normalize_optional(request.spouse_name.as_deref());
        member.relation = Some(request.relation.trim().to_string());
        member.bio = Some(request.bio.trim().to_string());
        member.email = normalize_optional(request.email.as_deref());
        member.phone = normalize_optional(request.phone.as_deref());
        member.location = normalize_optional(request.location.as_deref());
        member.photo = request.photo.clone();

        let id = self.repo.create_member(&member)?;
        info!("event=member_submit module=service status=ok member={id}");
        self.read_back(id, "created member not found in read-back")
    }

    /// Publishes a pending submission.
    pub fn approve(&self, id: MemberId) -> Result<MemberRecord, MemberServiceError> {
        let member = self.require_member(id)?;
        if member.status != MemberStatus::Pending {
            return Err(MemberServiceError::NotPending(id));
        }

        self.repo.approve_member(id)?;
        info!("event=member_approve module=service status=ok member={id}");
        self.read_back(id, "approved member not found in read-back")
    }

    /// Discards a pending submission entirely.
    pub fn reject(&self, id: MemberId) -> Result<(), MemberServiceError> {
        let member = self.require_member(id)?;
        if member.status != MemberStatus::Pending {
            return Err(MemberServiceError::NotPending(id));
        }

        self.repo.delete_member(id)?;
        info!("event=member_reject module=service status=ok member={id}");
        Ok(())
    }

    /// Replaces an existing record's fields with the edit input.
    ///
    /// # Contract
    /// - Full replacement semantics; untouched form fields must be passed
    ///   back by the caller.
    /// - Status and timestamps are not editable through this path.
    pub fn edit(
        &self,
        id: MemberId,
        request: &EditMemberRequest,
    ) -> Result<MemberRecord, MemberServiceError> {
        let mut member = self.require_member(id)?;
        member.salutation = normalize_optional(request.salutation.as_deref());
        member.first_name = request.first_name.trim().to_string();
        member.last_name = request.last_name.trim().to_string();
        member.nickname = normalize_optional(request.nickname.as_deref());
        member.father_name = normalize_optional(request.father_name.as_deref());
        member.mother_name = normalize_optional(request.mother_name.as_deref());
        member.spouse_name = normalize_optional(request.spouse_name.as_deref());
        member.relation = normalize_optional(request.relation.as_deref());
        member.bio = normalize_optional(request.bio.as_deref());
        member.email = normalize_optional(request.email.as_deref());
        member.phone = normalize_optional(request.phone.as_deref());
        member.location = normalize_optional(request.location.as_deref());
        member.photo = request.photo.clone();

        self.repo.update_member(&member)?;
        info!("event=member_edit module=service status=ok member={id}");
        self.read_back(id, "edited member not found in read-back")
    }

    /// Removes an approved member from the site.
    pub fn remove(&self, id: MemberId) -> Result<(), MemberServiceError> {
        let member = self.require_member(id)?;
        if member.status != MemberStatus::Approved {
            return Err(MemberServiceError::NotApproved(id));
        }

        self.repo.delete_member(id)?;
        info!("event=member_remove module=service status=ok member={id}");
        Ok(())
    }

    /// Gets one member by stable ID.
    pub fn get(&self, id: MemberId) -> RepoResult<Option<MemberRecord>> {
        self.repo.get_member(id)
    }

    /// Lists the admin review queue, oldest submission first.
    pub fn list_pending(&self) -> RepoResult<Vec<MemberRecord>> {
        self.list_by_status(MemberStatus::Pending)
    }

    /// Lists published members, oldest submission first.
    pub fn list_approved(&self) -> RepoResult<Vec<MemberRecord>> {
        self.list_by_status(MemberStatus::Approved)
    }

    /// Returns the ordered approved-record snapshot fed to the resolver.
    pub fn approved_snapshot(&self) -> RepoResult<Vec<MemberRecord>> {
        self.list_approved()
    }

    fn list_by_status(&self, status: MemberStatus) -> RepoResult<Vec<MemberRecord>> {
        let query = MemberListQuery {
            status: Some(status),
            ..MemberListQuery::default()
        };
        self.repo.list_members(&query)
    }

    fn require_member(&self, id: MemberId) -> Result<MemberRecord, MemberServiceError> {
        self.repo
            .get_member(id)?
            .ok_or(MemberServiceError::MemberNotFound(id))
    }

    fn read_back(
        &self,
        id: MemberId,
        details: &'static str,
    ) -> Result<MemberRecord, MemberServiceError> {
        self.repo
            .get_member(id)?
            .ok_or(MemberServiceError::InconsistentState(details))
    }
}

fn require_field(name: &'static str, value: &str) -> Result<(), MemberServiceError> {
    if value.trim().is_empty() {
        return Err(MemberServiceError::MissingField(name));
    }
    Ok(())
}

fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
