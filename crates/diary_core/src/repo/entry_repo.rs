//! Entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/get/list/delete over the `entries` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Entry::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Lists are ordered by `timestamp DESC, seq DESC` (newest insert wins ties).

use crate::db::DbError;
use crate::model::entry::{Entry, EntryId, EntryValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    uuid,
    content,
    timestamp
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether this error means the storage itself is gone, as
    /// opposed to one statement failing.
    pub fn is_connection_lost(&self) -> bool {
        let Self::Db(DbError::Sqlite(err)) = self else {
            return matches!(self, Self::Db(DbError::StorageUnavailable { .. }));
        };
        matches!(
            err.sqlite_error_code(),
            Some(
                ErrorCode::CannotOpen
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::NotADatabase
                    | ErrorCode::DatabaseCorrupt
            )
        )
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
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

/// Query options for listing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryListQuery {
    /// Literal, case-sensitive substring filter. `None` or empty lists all.
    pub contains: Option<String>,
}

impl EntryListQuery {
    /// Query matching every entry.
    pub fn all() -> Self {
        Self::default()
    }

    /// Query matching entries containing `needle`.
    pub fn containing(needle: impl Into<String>) -> Self {
        Self {
            contains: Some(needle.into()),
        }
    }
}

/// Repository interface for diary entries.
pub trait EntryRepository {
    /// Persists one new entry and returns its id.
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId>;
    /// Gets one entry by id.
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>>;
    /// Lists entries newest first, optionally filtered by substring.
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>>;
    /// Removes one entry. Returns `NotFound` when no row matched.
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// Fails when the `entries` schema is not in place.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_entry_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &Entry) -> RepoResult<EntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO entries (uuid, content, timestamp) VALUES (?1, ?2, ?3);",
            params![entry.id.to_string(), entry.content.as_str(), entry.timestamp],
        )?;

        Ok(entry.id)
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<Entry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }
        Ok(None)
    }

    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(needle) = query.contains.as_deref().filter(|value| !value.is_empty()) {
            // instr() is byte-exact; LIKE would fold ASCII case and treat % and _ as wildcards.
            sql.push_str(" AND instr(content, ?) > 0");
            bind_values.push(Value::Text(needle.to_string()));
        }

        sql.push_str(" ORDER BY timestamp DESC, seq DESC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in entries.uuid"))
    })?;

    let entry = Entry::with_timestamp(id, row.get::<_, String>("content")?, row.get("timestamp")?);
    entry.validate()?;
    Ok(entry)
}

fn ensure_entry_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "entries")? {
        return Err(RepoError::MissingRequiredTable("entries"));
    }

    for column in ["seq", "uuid", "content", "timestamp"] {
        if !table_has_column(conn, "entries", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "entries",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
