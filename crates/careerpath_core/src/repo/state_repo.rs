//! Namespaced state record repository and SQLite implementation.

use crate::db::DbError;
use crate::store::StateSnapshot;
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record namespace used when the host does not pick one.
pub const DEFAULT_NAMESPACE: &str = "career-path-store";

static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]{0,63}$").expect("valid namespace regex"));

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidNamespace(String),
    Encode(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidNamespace(value) => write!(f, "invalid record namespace `{value}`"),
            Self::Encode(err) => write!(f, "failed to encode state record: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted state record: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidNamespace(_) | Self::InvalidData(_) => None,
        }
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

/// Durable storage for one state snapshot per namespace.
pub trait StateRepository {
    /// Returns `None` when nothing was saved under `namespace` yet.
    fn load(&self, namespace: &str) -> RepoResult<Option<StateSnapshot>>;
    /// Replaces the record under `namespace`.
    fn save(&self, namespace: &str, snapshot: &StateSnapshot) -> RepoResult<()>;
    /// Deletes the record; returns whether one existed.
    fn clear(&self, namespace: &str) -> RepoResult<bool>;
}

pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load(&self, namespace: &str) -> RepoResult<Option<StateSnapshot>> {
        validate_namespace(namespace)?;

        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload FROM state_records WHERE namespace = ?1;",
                [namespace],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            info!("event=state_load module=repo status=empty namespace={namespace}");
            return Ok(None);
        };

        let snapshot = serde_json::from_str::<StateSnapshot>(&payload).map_err(|err| {
            warn!("event=state_load module=repo status=error namespace={namespace} error_code=decode_failed");
            RepoError::InvalidData(format!("undecodable payload in `{namespace}`: {err}"))
        })?;
        info!(
            "event=state_load module=repo status=ok namespace={} events={} objectives={}",
            namespace,
            snapshot.events.len(),
            snapshot.objectives.len()
        );
        Ok(Some(snapshot))
    }

    fn save(&self, namespace: &str, snapshot: &StateSnapshot) -> RepoResult<()> {
        validate_namespace(namespace)?;
        let payload = serde_json::to_string(snapshot).map_err(RepoError::Encode)?;

        self.conn.execute(
            "INSERT INTO state_records (namespace, payload, schema_version)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(namespace) DO UPDATE SET
                payload = excluded.payload,
                schema_version = excluded.schema_version,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![namespace, payload, snapshot.version],
        )?;

        info!(
            "event=state_save module=repo status=ok namespace={} events={} objectives={} bytes={}",
            namespace,
            snapshot.events.len(),
            snapshot.objectives.len(),
            payload.len()
        );
        Ok(())
    }

    fn clear(&self, namespace: &str) -> RepoResult<bool> {
        validate_namespace(namespace)?;
        let changed = self
            .conn
            .execute("DELETE FROM state_records WHERE namespace = ?1;", [namespace])?;
        Ok(changed > 0)
    }
}

fn validate_namespace(namespace: &str) -> RepoResult<()> {
    if NAMESPACE_RE.is_match(namespace) {
        Ok(())
    } else {
        Err(RepoError::InvalidNamespace(namespace.to_string()))
    }
}
