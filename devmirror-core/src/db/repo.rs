//! Database repository layer
//!
//! Provides query and insert operations for the analysis history.

use crate::error::{Error, Result};
use crate::types::AnalysisRecord;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Filter options for listing analysis history
#[derive(Debug, Clone)]
pub struct HistoryFilter {
    /// Only records for this user
    pub user_id: Option<String>,
    /// Maximum number of records, newest first
    pub limit: usize,
}

impl Default for HistoryFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            limit: 50,
        }
    }
}

/// Database handle (single connection)
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run migrations on this database
    pub fn migrate(&self) -> Result<()> {
        let conn = self.connection();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    ///
    /// Recovers from a poisoned lock; every write is a single statement.
    pub fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ============================================
    // Analysis history
    // ============================================

    /// Insert an analysis record, returning it with its assigned ID.
    pub fn insert_analysis(&self, record: &AnalysisRecord) -> Result<AnalysisRecord> {
        let conn = self.connection();
        conn.execute(
            r#"
            INSERT INTO analysis_history
                (user_id, timestamp, code_metrics, cognitive_profile, ai_reflection)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.user_id,
                record.timestamp.to_rfc3339(),
                record.code_metrics.to_string(),
                record.cognitive_profile.to_string(),
                record.ai_reflection,
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, user_id = %record.user_id, "Analysis record inserted");

        Ok(AnalysisRecord {
            id,
            ..record.clone()
        })
    }

    /// Get an analysis record by ID
    pub fn get_analysis(&self, id: i64) -> Result<Option<AnalysisRecord>> {
        let conn = self.connection();
        conn.query_row(
            "SELECT * FROM analysis_history WHERE id = ?",
            [id],
            Self::row_to_analysis,
        )
        .optional()
        .map_err(Error::from)
    }

    /// Get an analysis record by ID, failing if it does not exist
    pub fn require_analysis(&self, id: i64) -> Result<AnalysisRecord> {
        self.get_analysis(id)?.ok_or(Error::RecordNotFound(id))
    }

    /// List analysis records, newest first
    pub fn list_analyses(&self, filter: &HistoryFilter) -> Result<Vec<AnalysisRecord>> {
        let conn = self.connection();
        let limit = filter.limit as i64;

        let records = match &filter.user_id {
            Some(user_id) => {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT * FROM analysis_history
                    WHERE user_id = ?1
                    ORDER BY timestamp DESC, id DESC
                    LIMIT ?2
                    "#,
                )?;
                let rows = stmt.query_map(params![user_id, limit], Self::row_to_analysis)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            None => {
                let mut stmt = conn.prepare(
                    r#"
                    SELECT * FROM analysis_history
                    ORDER BY timestamp DESC, id DESC
                    LIMIT ?1
                    "#,
                )?;
                let rows = stmt.query_map([limit], Self::row_to_analysis)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };

        Ok(records)
    }

    /// Count analysis records, optionally for a single user
    pub fn count_analyses(&self, user_id: Option<&str>) -> Result<i64> {
        let conn = self.connection();
        let count = match user_id {
            Some(user_id) => conn.query_row(
                "SELECT COUNT(*) FROM analysis_history WHERE user_id = ?",
                [user_id],
                |r| r.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM analysis_history", [], |r| r.get(0))?,
        };
        Ok(count)
    }

    fn row_to_analysis(row: &Row) -> rusqlite::Result<AnalysisRecord> {
        let timestamp_str: String = row.get("timestamp")?;
        let code_metrics_str: String = row.get("code_metrics")?;
        let cognitive_profile_str: String = row.get("cognitive_profile")?;

        Ok(AnalysisRecord {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            code_metrics: serde_json::from_str(&code_metrics_str)
                .unwrap_or(serde_json::Value::Null),
            cognitive_profile: serde_json::from_str(&cognitive_profile_str)
                .unwrap_or(serde_json::Value::Null),
            ai_reflection: row.get("ai_reflection")?,
        })
    }
}
