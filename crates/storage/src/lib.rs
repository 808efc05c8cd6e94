#![forbid(unsafe_code)]

use mc_core::model::NormalizedName;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Search results visible to callers are capped at this many rows.
pub const SEARCH_RESULT_CAP: usize = 50;
/// Queries shorter than this return an empty result without touching SQL.
pub const SEARCH_MIN_QUERY_LEN: usize = 2;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    UnknownId,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::UnknownId => write!(f, "unknown id"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

#[derive(Clone, Debug)]
pub struct DesignRow {
    pub id: String,
    pub name: String,
    pub clean_name: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct NicheRow {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct NicheSummaryRow {
    pub niche: NicheRow,
    pub design_count: i64,
}

#[derive(Clone, Debug)]
pub struct AssignedDesignRow {
    pub design: DesignRow,
    pub assigned_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct NicheDetailRow {
    pub niche: NicheRow,
    pub designs: Vec<AssignedDesignRow>,
}

/// A design assigned to two or more niches, with every niche name it
/// belongs to.
#[derive(Clone, Debug)]
pub struct DuplicateDesignRow {
    pub design: DesignRow,
    pub niche_names: Vec<String>,
}

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join("merchcat.db");
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        let store = Self { conn, storage_dir };
        store.migrate()?;
        Ok(store)
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS meta (
              key TEXT PRIMARY KEY,
              value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS counters (
              name TEXT PRIMARY KEY,
              value INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS designs (
              id TEXT PRIMARY KEY,
              name TEXT NOT NULL UNIQUE,
              clean_name TEXT NOT NULL,
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS niches (
              id TEXT PRIMARY KEY,
              name TEXT NOT NULL,
              description TEXT,
              created_at_ms INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS assignments (
              design_id TEXT NOT NULL,
              niche_id TEXT NOT NULL,
              assigned_at_ms INTEGER NOT NULL,
              PRIMARY KEY (design_id, niche_id)
            );

            CREATE INDEX IF NOT EXISTS idx_assignments_niche ON assignments(niche_id);
            "#,
        )?;
        self.conn.execute(
            "INSERT OR IGNORE INTO meta(key, value) VALUES (?1, ?2)",
            params!["schema_version", "v1"],
        )?;
        Ok(())
    }

    /// Creates a design for every entry whose `name` is not already present.
    /// Returns only the newly created rows, in input order. The whole batch
    /// runs in one transaction, so the returned set is exactly what was
    /// persisted.
    pub fn ingest_designs(
        &mut self,
        entries: &[NormalizedName],
    ) -> Result<Vec<DesignRow>, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let mut created = Vec::new();

        for entry in entries {
            if entry.name.is_empty() {
                return Err(StoreError::InvalidInput("design name must not be empty"));
            }
            let exists = tx
                .query_row(
                    "SELECT 1 FROM designs WHERE name = ?1",
                    params![entry.name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if exists {
                continue;
            }

            let seq = next_counter_tx(&tx, "design_seq")?;
            let id = format!("dsn_{seq:06}");
            tx.execute(
                "INSERT INTO designs(id, name, clean_name, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
                params![id, entry.name, entry.clean_name, now_ms],
            )?;
            created.push(DesignRow {
                id,
                name: entry.name.clone(),
                clean_name: entry.clean_name.clone(),
                created_at_ms: now_ms,
            });
        }

        tx.commit()?;
        Ok(created)
    }

    pub fn list_designs(&self) -> Result<Vec<DesignRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, clean_name, created_at_ms FROM designs ORDER BY id ASC",
        )?;
        let rows = stmt.query_map([], design_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_design_by_name(&self, name: &str) -> Result<Option<DesignRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, clean_name, created_at_ms FROM designs WHERE name = ?1",
                params![name],
                design_from_row,
            )
            .optional()?)
    }

    /// Unconditional creation; duplicate niche names are permitted.
    pub fn create_niche(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<NicheRow, StoreError> {
        if name.is_empty() {
            return Err(StoreError::InvalidInput("niche name must not be empty"));
        }
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let seq = next_counter_tx(&tx, "niche_seq")?;
        let id = format!("nch_{seq:06}");
        tx.execute(
            "INSERT INTO niches(id, name, description, created_at_ms) VALUES (?1, ?2, ?3, ?4)",
            params![id, name, description, now_ms],
        )?;
        tx.commit()?;
        Ok(NicheRow {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at_ms: now_ms,
        })
    }

    pub fn list_niches(&self) -> Result<Vec<NicheSummaryRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT n.id, n.name, n.description, n.created_at_ms,
                   (SELECT COUNT(*) FROM assignments a WHERE a.niche_id = n.id)
            FROM niches n
            ORDER BY n.id ASC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(NicheSummaryRow {
                niche: NicheRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    created_at_ms: row.get(3)?,
                },
                design_count: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn get_niche(&self, niche_id: &str) -> Result<Option<NicheDetailRow>, StoreError> {
        let niche = self
            .conn
            .query_row(
                "SELECT id, name, description, created_at_ms FROM niches WHERE id = ?1",
                params![niche_id],
                |row| {
                    Ok(NicheRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        description: row.get(2)?,
                        created_at_ms: row.get(3)?,
                    })
                },
            )
            .optional()?;
        let Some(niche) = niche else {
            return Ok(None);
        };

        let mut stmt = self.conn.prepare(
            r#"
            SELECT d.id, d.name, d.clean_name, d.created_at_ms, a.assigned_at_ms
            FROM assignments a
            JOIN designs d ON d.id = a.design_id
            WHERE a.niche_id = ?1
            ORDER BY d.id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![niche_id], |row| {
            Ok(AssignedDesignRow {
                design: DesignRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    clean_name: row.get(2)?,
                    created_at_ms: row.get(3)?,
                },
                assigned_at_ms: row.get(4)?,
            })
        })?;
        let designs = rows.collect::<Result<Vec<_>, _>>()?;

        Ok(Some(NicheDetailRow { niche, designs }))
    }

    /// Adds the `(design, niche)` pair if absent. Returns whether the
    /// relation changed; re-assigning an existing pair is a no-op.
    pub fn assign(&mut self, design_id: &str, niche_id: &str) -> Result<bool, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        ensure_design_exists_tx(&tx, design_id)?;
        ensure_niche_exists_tx(&tx, niche_id)?;
        let changed = tx.execute(
            r#"
            INSERT OR IGNORE INTO assignments(design_id, niche_id, assigned_at_ms)
            VALUES (?1, ?2, ?3)
            "#,
            params![design_id, niche_id, now_ms],
        )?;
        tx.commit()?;
        Ok(changed > 0)
    }

    /// Removes the pair if present. Returns whether the relation changed;
    /// unassigning an absent pair is a no-op.
    pub fn unassign(&mut self, design_id: &str, niche_id: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        ensure_design_exists_tx(&tx, design_id)?;
        ensure_niche_exists_tx(&tx, niche_id)?;
        let deleted = tx.execute(
            "DELETE FROM assignments WHERE design_id = ?1 AND niche_id = ?2",
            params![design_id, niche_id],
        )?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    pub fn unassigned_designs(&self) -> Result<Vec<DesignRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT d.id, d.name, d.clean_name, d.created_at_ms
            FROM designs d
            WHERE NOT EXISTS (SELECT 1 FROM assignments a WHERE a.design_id = d.id)
            ORDER BY d.id ASC
            "#,
        )?;
        let rows = stmt.query_map([], design_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Designs assigned to two or more niches, each annotated with all the
    /// niche names it belongs to.
    pub fn duplicate_designs(&self) -> Result<Vec<DuplicateDesignRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT d.id, d.name, d.clean_name, d.created_at_ms, n.name
            FROM designs d
            JOIN assignments a ON a.design_id = d.id
            JOIN niches n ON n.id = a.niche_id
            WHERE d.id IN (
                SELECT design_id FROM assignments GROUP BY design_id HAVING COUNT(*) >= 2
            )
            ORDER BY d.id ASC, n.id ASC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                DesignRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    clean_name: row.get(2)?,
                    created_at_ms: row.get(3)?,
                },
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut duplicates: Vec<DuplicateDesignRow> = Vec::new();
        for row in rows {
            let (design, niche_name) = row?;
            match duplicates.last_mut() {
                Some(last) if last.design.id == design.id => last.niche_names.push(niche_name),
                _ => duplicates.push(DuplicateDesignRow {
                    design,
                    niche_names: vec![niche_name],
                }),
            }
        }
        Ok(duplicates)
    }

    /// Case-insensitive substring search over `name` and `clean_name`.
    /// Queries shorter than two characters return empty without a scan;
    /// results are capped at [`SEARCH_RESULT_CAP`]. With `exclude_niche`,
    /// designs already assigned to that niche are filtered out.
    pub fn search(
        &self,
        query: &str,
        exclude_niche: Option<&str>,
    ) -> Result<Vec<DesignRow>, StoreError> {
        if query.chars().count() < SEARCH_MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let needle = format!("%{}%", escape_like(&query.to_lowercase()));
        let mut stmt = self.conn.prepare(
            r#"
            SELECT d.id, d.name, d.clean_name, d.created_at_ms
            FROM designs d
            WHERE (LOWER(d.name) LIKE ?1 ESCAPE '\' OR LOWER(d.clean_name) LIKE ?1 ESCAPE '\')
              AND (?2 IS NULL OR NOT EXISTS (
                    SELECT 1 FROM assignments a
                    WHERE a.design_id = d.id AND a.niche_id = ?2
              ))
            ORDER BY d.id ASC
            LIMIT ?3
            "#,
        )?;
        let rows = stmt.query_map(
            params![needle, exclude_niche, SEARCH_RESULT_CAP as i64],
            design_from_row,
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

fn design_from_row(row: &rusqlite::Row<'_>) -> Result<DesignRow, rusqlite::Error> {
    Ok(DesignRow {
        id: row.get(0)?,
        name: row.get(1)?,
        clean_name: row.get(2)?,
        created_at_ms: row.get(3)?,
    })
}

fn ensure_design_exists_tx(tx: &Transaction<'_>, design_id: &str) -> Result<(), StoreError> {
    let exists = tx
        .query_row("SELECT 1 FROM designs WHERE id = ?1", params![design_id], |_| Ok(()))
        .optional()?
        .is_some();
    if exists { Ok(()) } else { Err(StoreError::UnknownId) }
}

fn ensure_niche_exists_tx(tx: &Transaction<'_>, niche_id: &str) -> Result<(), StoreError> {
    let exists = tx
        .query_row("SELECT 1 FROM niches WHERE id = ?1", params![niche_id], |_| Ok(()))
        .optional()?
        .is_some();
    if exists { Ok(()) } else { Err(StoreError::UnknownId) }
}

fn next_counter_tx(tx: &Transaction<'_>, name: &str) -> Result<i64, StoreError> {
    let current: i64 = tx
        .query_row(
            "SELECT value FROM counters WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO counters(name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value=excluded.value
        "#,
        params![name, next],
    )?;
    Ok(next)
}

// LIKE wildcards in user queries must match literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}
