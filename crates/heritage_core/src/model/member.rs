//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical biographical record submitted by visitors.
//! - Derive the rendered full name used to link records to each other.
//! - Provide validation shared by every write path.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another member.
//! - `status` is the source of truth for directory/tree visibility.
//! - `photo`, when present, is a base64 image data URL under the size cap.

use crate::graph::PersonKey;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by storage on creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemberId = Uuid;

/// Maximum accepted size of a stored photo data URL, in bytes.
pub const MAX_PHOTO_BYTES: usize = 2 * 1024 * 1024;

static PHOTO_DATA_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/(?:png|jpe?g|gif|webp);base64,[A-Za-z0-9+/]+={0,2}$")
        .expect("valid photo data URL regex")
});

/// Moderation state controlling visibility of a member record.
///
/// Only approved members are fed to the relationship resolver and shown in
/// the directory; pending ones are visible to the admin queue only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Submitted by a visitor, awaiting admin review.
    Pending,
    /// Reviewed and published by an administrator.
    Approved,
}

/// Validation failures for member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    /// `uuid` is the nil UUID.
    NilUuid,
    /// `first_name` is blank after trim.
    BlankFirstName,
    /// `last_name` is blank after trim.
    BlankLastName,
    /// `photo` is present but not an image data URL.
    InvalidPhotoDataUrl,
    /// `photo` exceeds [`MAX_PHOTO_BYTES`].
    PhotoTooLarge { size: usize, max: usize },
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "member uuid must not be nil"),
            Self::BlankFirstName => write!(f, "first name must not be blank"),
            Self::BlankLastName => write!(f, "last name must not be blank"),
            Self::InvalidPhotoDataUrl => {
                write!(f, "photo must be a base64 image data URL")
            }
            Self::PhotoTooLarge { size, max } => {
                write!(f, "photo is {size} bytes, exceeding the {max} byte cap")
            }
        }
    }
}

impl Error for MemberValidationError {}

/// Canonical biographical record for one person.
///
/// Relationship fields (`father_name`, `mother_name`, `spouse_name`) are
/// free-text names that may or may not match another record's rendered full
/// name. Unmatched values stay on the record as pending relationships to
/// people not yet in the system; matching is exact, case- and
/// whitespace-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// Stable global ID used for admin mutations and auditing.
    pub uuid: MemberId,
    /// Optional honorific rendered in front of the name ("Ma", "Dr", ...).
    pub salutation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    /// Other name the person goes by. Display only.
    pub nickname: Option<String>,
    /// Free-text father reference, matched against rendered full names.
    pub father_name: Option<String>,
    /// Free-text mother reference, matched against rendered full names.
    pub mother_name: Option<String>,
    /// Free-text spouse reference, matched against rendered full names.
    pub spouse_name: Option<String>,
    /// How the person relates to the family ("Son of John Smith", ...).
    pub relation: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    /// Base64 image data URL produced by the upload collaborator.
    pub photo: Option<String>,
    pub status: MemberStatus,
    /// Unix epoch milliseconds, assigned by storage on insert.
    pub submitted_at: Option<i64>,
    /// Unix epoch milliseconds, assigned when the record is approved.
    pub approved_at: Option<i64>,
    /// Unix epoch milliseconds, refreshed by storage on every update.
    pub updated_at: Option<i64>,
}

impl MemberRecord {
    /// Creates a new pending member with a generated stable ID.
    ///
    /// # Invariants
    /// - Optional fields are initialized to `None`.
    /// - `status` starts as [`MemberStatus::Pending`].
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            salutation: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            nickname: None,
            father_name: None,
            mother_name: None,
            spouse_name: None,
            relation: None,
            bio: None,
            email: None,
            phone: None,
            location: None,
            photo: None,
            status: MemberStatus::Pending,
            submitted_at: None,
            approved_at: None,
            updated_at: None,
        }
    }

    /// Creates a member with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - [`MemberValidationError::NilUuid`] when `uuid` is nil.
    pub fn with_id(
        uuid: MemberId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, MemberValidationError> {
        if uuid.is_nil() {
            return Err(MemberValidationError::NilUuid);
        }
        let mut member = Self::new(first_name, last_name);
        member.uuid = uuid;
        Ok(member)
    }

    /// Renders the display full name: salutation + first + last, joined by
    /// single spaces with blank parts skipped.
    ///
    /// This string doubles as the de facto join key between records; see
    /// [`PersonKey`] for the caveats that come with name-based identity.
    pub fn full_name(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(salutation) = self.salutation.as_deref() {
            if !salutation.trim().is_empty() {
                parts.push(salutation.trim());
            }
        }
        let first = self.first_name.trim();
        if !first.is_empty() {
            parts.push(first);
        }
        let last = self.last_name.trim();
        if !last.is_empty() {
            parts.push(last);
        }
        parts.join(" ")
    }

    /// Returns the graph join key derived from the rendered full name.
    pub fn person_key(&self) -> PersonKey {
        PersonKey::new(self.full_name())
    }

    /// Returns whether this record is visible to the directory and tree.
    pub fn is_approved(&self) -> bool {
        self.status == MemberStatus::Approved
    }

    /// Checks model-level invariants.
    ///
    /// Required-field policy for submissions (parents, relation, bio) is
    /// enforced by the submit service, not here, so admin edits can relax
    /// it without a second record shape.
    ///
    /// # Errors
    /// - Any [`MemberValidationError`] variant that applies.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.uuid.is_nil() {
            return Err(MemberValidationError::NilUuid);
        }
        if self.first_name.trim().is_empty() {
            return Err(MemberValidationError::BlankFirstName);
        }
        if self.last_name.trim().is_empty() {
            return Err(MemberValidationError::BlankLastName);
        }
        if let Some(photo) = self.photo.as_deref() {
            if photo.len() > MAX_PHOTO_BYTES {
                return Err(MemberValidationError::PhotoTooLarge {
                    size: photo.len(),
                    max: MAX_PHOTO_BYTES,
                });
            }
            if !PHOTO_DATA_URL_RE.is_match(photo) {
                return Err(MemberValidationError::InvalidPhotoDataUrl);
            }
        }
        Ok(())
    }
}
