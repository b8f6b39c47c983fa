use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, ErrorCode, Row, TransactionBehavior};
use tracing::info;

use super::super::repository::{
    InternshipRecord, InternshipRepository, NewInternshipRecord, RepositoryError,
};
use super::super::rules::{default_rules, NewScamRule, RuleStore, RuleStoreError, ScamRule};
use super::StoreError;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS scam_patterns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        keyword TEXT NOT NULL UNIQUE CHECK (length(keyword) BETWEEN 1 AND 128),
        description TEXT,
        weight INTEGER NOT NULL DEFAULT -10,
        tag TEXT CHECK (tag IS NULL OR length(tag) <= 32)
    );
    CREATE TABLE IF NOT EXISTS internships (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT,
        company_name TEXT,
        description TEXT,
        link TEXT,
        email TEXT,
        is_paid INTEGER,
        credibility_score INTEGER,
        status TEXT CHECK (status IS NULL OR length(status) <= 20),
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_internships_created ON internships(created_at);";

/// SQLite-backed store for scam rules and check history.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create the database at `path` (`:memory:` for a private in-memory database).
    pub fn open(path: &str) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_string(),
            source,
        })?;
        // journal_mode reports the resulting mode as a row.
        conn.query_row("PRAGMA journal_mode=WAL", [], |_| Ok(()))
            .and_then(|_| conn.busy_timeout(BUSY_TIMEOUT))
            .and_then(|_| conn.execute_batch(SCHEMA))
            .map_err(StoreError::Schema)?;

        info!(path, "check database ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::open(":memory:")
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, String> {
        self.conn
            .lock()
            .map_err(|_| "connection mutex poisoned".to_string())
    }
}

impl From<rusqlite::Error> for RuleStoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Unavailable(value.to_string())
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(value: rusqlite::Error) -> Self {
        if is_constraint_violation(&value) {
            Self::Rejected(value.to_string())
        } else {
            Self::Unavailable(value.to_string())
        }
    }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation
    )
}

fn rule_from_row(row: &Row<'_>) -> rusqlite::Result<ScamRule> {
    Ok(ScamRule {
        id: row.get(0)?,
        keyword: row.get(1)?,
        description: row.get(2)?,
        weight: row.get(3)?,
        tag: row.get(4)?,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<InternshipRecord> {
    let created_at: String = row.get(9)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|stamp| stamp.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(err)))?;

    Ok(InternshipRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        company_name: row.get(2)?,
        description: row.get(3)?,
        link: row.get(4)?,
        email: row.get(5)?,
        is_paid: row.get(6)?,
        credibility_score: row.get(7)?,
        status: row.get(8)?,
        created_at,
    })
}

fn insert_rule(conn: &Connection, rule: &NewScamRule) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT OR IGNORE INTO scam_patterns (keyword, description, weight, tag)
         VALUES (?1, ?2, ?3, ?4)",
        params![rule.keyword, rule.description, rule.weight, rule.tag],
    )
}

impl RuleStore for SqliteStore {
    fn all_rules(&self) -> Result<Vec<ScamRule>, RuleStoreError> {
        let conn = self.lock().map_err(RuleStoreError::Unavailable)?;
        let mut stmt = conn.prepare(
            "SELECT id, keyword, description, weight, tag FROM scam_patterns ORDER BY id",
        )?;
        let rules = stmt
            .query_map([], rule_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rules)
    }

    fn seed_defaults_if_empty(&self) -> Result<usize, RuleStoreError> {
        let mut conn = self.lock().map_err(RuleStoreError::Unavailable)?;
        // Immediate mode takes the write lock up front so concurrent seeders serialize.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: i64 =
            tx.query_row("SELECT COUNT(*) FROM scam_patterns", [], |row| row.get(0))?;
        if existing > 0 {
            return Ok(0);
        }

        let mut inserted = 0;
        for rule in default_rules() {
            inserted += insert_rule(&tx, &rule)?;
        }
        tx.commit()?;

        info!(inserted, "seeded default scam patterns");
        Ok(inserted)
    }

    fn add_rule(&self, rule: NewScamRule) -> Result<ScamRule, RuleStoreError> {
        let rule = rule.normalized()?;
        let conn = self.lock().map_err(RuleStoreError::Unavailable)?;

        let result = conn.execute(
            "INSERT INTO scam_patterns (keyword, description, weight, tag) VALUES (?1, ?2, ?3, ?4)",
            params![rule.keyword, rule.description, rule.weight, rule.tag],
        );
        match result {
            Ok(_) => {}
            Err(err) if is_constraint_violation(&err) => {
                return Err(RuleStoreError::Conflict(rule.keyword));
            }
            Err(other) => return Err(other.into()),
        }

        Ok(ScamRule {
            id: conn.last_insert_rowid(),
            keyword: rule.keyword,
            description: rule.description,
            weight: rule.weight,
            tag: rule.tag,
        })
    }
}

impl InternshipRepository for SqliteStore {
    fn record(&self, record: NewInternshipRecord) -> Result<InternshipRecord, RepositoryError> {
        let conn = self.lock().map_err(RepositoryError::Unavailable)?;
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO internships
                (title, company_name, description, link, email, is_paid, credibility_score, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                record.title,
                record.company_name,
                record.description,
                record.link,
                record.email,
                record.is_paid,
                record.credibility_score,
                record.status,
                created_at.to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Ok(InternshipRecord::from_new(id, record, created_at))
    }

    fn recent(&self, limit: usize) -> Result<Vec<InternshipRecord>, RepositoryError> {
        let conn = self.lock().map_err(RepositoryError::Unavailable)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = conn.prepare(
            "SELECT id, title, company_name, description, link, email, is_paid,
                    credibility_score, status, created_at
             FROM internships ORDER BY id DESC LIMIT ?1",
        )?;
        let records = stmt
            .query_map(params![limit], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
