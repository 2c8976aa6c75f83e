//! Member repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and moderation APIs over `members` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `MemberRecord::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - List order is `submitted_at ASC, uuid ASC`, the resolver input order.

use crate::db::DbError;
use crate::model::member::{MemberId, MemberRecord, MemberStatus, MemberValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const MEMBER_SELECT_SQL: &str = "SELECT
    uuid,
    salutation,
    first_name,
    last_name,
    nickname,
    father_name,
    mother_name,
    spouse_name,
    relation,
    bio,
    email,
    phone,
    location,
    photo,
    status,
    submitted_at,
    approved_at,
    updated_at
FROM members";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for member persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MemberValidationError),
    Db(DbError),
    NotFound(MemberId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "member not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted member data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<MemberValidationError> for RepoError {
    fn from(value: MemberValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing members.
#[derive(Debug, Clone, Default)]
pub struct MemberListQuery {
    pub status: Option<MemberStatus>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for member CRUD and moderation operations.
pub trait MemberRepository {
    fn create_member(&self, member: &MemberRecord) -> RepoResult<MemberId>;
    fn update_member(&self, member: &MemberRecord) -> RepoResult<()>;
    fn get_member(&self, id: MemberId) -> RepoResult<Option<MemberRecord>>;
    fn list_members(&self, query: &MemberListQuery) -> RepoResult<Vec<MemberRecord>>;
    fn approve_member(&self, id: MemberId) -> RepoResult<()>;
    fn delete_member(&self, id: MemberId) -> RepoResult<()>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn create_member(&self, member: &MemberRecord) -> RepoResult<MemberId> {
        member.validate()?;

        self.conn.execute(
            "INSERT INTO members (
                uuid,
                salutation,
                first_name,
                last_name,
                nickname,
                father_name,
                mother_name,
                spouse_name,
                relation,
                bio,
                email,
                phone,
                location,
                photo,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15);",
            params![
                member.uuid.to_string(),
                member.salutation.as_deref(),
                member.first_name.as_str(),
                member.last_name.as_str(),
                member.nickname.as_deref(),
                member.father_name.as_deref(),
                member.mother_name.as_deref(),
                member.spouse_name.as_deref(),
                member.relation.as_deref(),
                member.bio.as_deref(),
                member.email.as_deref(),
                member.phone.as_deref(),
                member.location.as_deref(),
                member.photo.as_deref(),
                member_status_to_db(member.status),
            ],
        )?;

        Ok(member.uuid)
    }

    fn update_member(&self, member: &MemberRecord) -> RepoResult<()> {
        member.validate()?;

        let changed = self.conn.execute(
            "UPDATE members
             SET
                salutation = ?1,
                first_name = ?2,
                last_name = ?3,
                nickname = ?4,
                father_name = ?5,
                mother_name = ?6,
                spouse_name = ?7,
                relation = ?8,
                bio = ?9,
                email = ?10,
                phone = ?11,
                location = ?12,
                photo = ?13,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?14;",
            params![
                member.salutation.as_deref(),
                member.first_name.as_str(),
                member.last_name.as_str(),
                member.nickname.as_deref(),
                member.father_name.as_deref(),
                member.mother_name.as_deref(),
                member.spouse_name.as_deref(),
                member.relation.as_deref(),
                member.bio.as_deref(),
                member.email.as_deref(),
                member.phone.as_deref(),
                member.location.as_deref(),
                member.photo.as_deref(),
                member.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(member.uuid));
        }

        Ok(())
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<MemberRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_member_row(row)?));
        }

        Ok(None)
    }

    fn list_members(&self, query: &MemberListQuery) -> RepoResult<Vec<MemberRecord>> {
        let mut sql = format!("{MEMBER_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(member_status_to_db(status).to_string()));
        }

        sql.push_str(" ORDER BY submitted_at ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut members = Vec::new();

        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        Ok(members)
    }

    fn approve_member(&self, id: MemberId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE members
             SET
                status = 'approved',
                approved_at = (strftime('%s', 'now') * 1000),
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_member(&self, id: MemberId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM members WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<MemberRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in members.uuid"))
    })?;

    let status_text: String = row.get("status")?;
    let status = parse_member_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid member status `{status_text}` in members.status"
        ))
    })?;

    let member = MemberRecord {
        uuid,
        salutation: row.get("salutation")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        nickname: row.get("nickname")?,
        father_name: row.get("father_name")?,
        mother_name: row.get("mother_name")?,
        spouse_name: row.get("spouse_name")?,
        relation: row.get("relation")?,
        bio: row.get("bio")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        location: row.get("location")?,
        photo: row.get("photo")?,
        status,
        submitted_at: row.get("submitted_at")?,
        approved_at: row.get("approved_at")?,
        updated_at: row.get("updated_at")?,
    };
    member.validate()?;
    Ok(member)
}

fn member_status_to_db(status: MemberStatus) -> &'static str {
    match status {
        MemberStatus::Pending => "pending",
        MemberStatus::Approved => "approved",
    }
}

fn parse_member_status(value: &str) -> Option<MemberStatus> {
    match value {
        "pending" => Some(MemberStatus::Pending),
        "approved" => Some(MemberStatus::Approved),
        _ => None,
    }
}
