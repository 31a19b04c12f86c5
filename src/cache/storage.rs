//! SQLite-backed bounded entry cache
//!
//! Holds the last refreshed projection of the catalog, capped at
//! [`ENTRY_CACHE_LIMIT`] rows. Every refresh replaces the whole table.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::client::ApiEntry;
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

/// Maximum number of rows kept in the cache
pub const ENTRY_CACHE_LIMIT: usize = 40;

const DB_FILE: &str = "catalog.db";

type Result<T> = std::result::Result<T, CacheError>;

/// A persisted catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct CachedEntry {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub auth: Option<String>,
    pub https: bool,
    pub cors: Option<String>,
    pub link: String,
    pub category: String,
    /// Unix timestamp of the refresh that wrote this row
    pub cached_at: i64,
}

impl CachedEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let id: String = row.get(0)?;
        let id = Uuid::parse_str(&id).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(Self {
            id,
            name: row.get(1)?,
            description: row.get(2)?,
            auth: row.get(3)?,
            https: row.get(4)?,
            cors: row.get(5)?,
            link: row.get(6)?,
            category: row.get(7)?,
            cached_at: row.get(8)?,
        })
    }
}

impl From<CachedEntry> for ApiEntry {
    fn from(entry: CachedEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
            description: entry.description,
            auth: entry.auth,
            https: entry.https,
            cors: entry.cors,
            link: entry.link,
            category: entry.category,
        }
    }
}

/// SQLite-backed storage for the bounded entry cache
pub struct EntryStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl EntryStore {
    /// Open or create the store at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/pubapi on Linux)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("pubapi"))
    }

    /// Open the store in a specific directory
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            Self::nuke(&db_path)?;
            return Self::open_at(cache_dir);
        }

        Self::init(conn, Some(db_path))
    }

    /// Open a throwaway in-memory store
    #[allow(dead_code)]
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, db_path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cached_entries (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                auth TEXT,
                https INTEGER NOT NULL,
                cors TEXT,
                link TEXT NOT NULL,
                category TEXT NOT NULL,
                position INTEGER NOT NULL,
                cached_at INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_cached_entries_name
                ON cached_entries(name COLLATE NOCASE);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn, db_path })
    }

    /// Path of the database file (None for in-memory stores)
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Replace the whole cache with at most [`ENTRY_CACHE_LIMIT`] entries.
    ///
    /// Delete and insert run in one transaction: on failure nothing changes.
    /// Returns the number of rows written.
    pub fn replace_all(&mut self, entries: &[ApiEntry]) -> Result<usize> {
        let now = Utc::now().timestamp();
        let limited = &entries[..entries.len().min(ENTRY_CACHE_LIMIT)];

        let tx = self.conn.transaction()?;
        let removed = tx.execute("DELETE FROM cached_entries", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO cached_entries
                 (id, name, description, auth, https, cors, link, category, position, cached_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for (position, entry) in limited.iter().enumerate() {
                stmt.execute(params![
                    entry.id.to_string(),
                    entry.name,
                    entry.description,
                    entry.auth,
                    entry.https,
                    entry.cors,
                    entry.link,
                    entry.category,
                    position as i64,
                    now
                ])?;
            }
        }
        tx.commit()?;

        log::debug!(
            "Replaced {} cached entries with {} (of {} offered)",
            removed,
            limited.len(),
            entries.len()
        );
        Ok(limited.len())
    }

    /// Read every cached entry ordered by name (case-insensitive)
    pub fn load_all(&self) -> Result<Vec<CachedEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, auth, https, cors, link, category, cached_at
             FROM cached_entries
             ORDER BY name COLLATE NOCASE ASC, position ASC",
        )?;
        let rows = stmt
            .query_map([], CachedEntry::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Find a cached entry by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Result<Option<CachedEntry>> {
        let entry = self
            .conn
            .query_row(
                "SELECT id, name, description, auth, https, cors, link, category, cached_at
                 FROM cached_entries
                 WHERE name = ?1 COLLATE NOCASE
                 ORDER BY position ASC
                 LIMIT 1",
                [name],
                CachedEntry::from_row,
            )
            .optional()?;
        Ok(entry)
    }

    /// Number of cached rows
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cached_entries", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    /// Clear all cached entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let removed = self.conn.execute("DELETE FROM cached_entries", [])?;
        Ok(ClearStats {
            entries_removed: removed,
        })
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let entries = self.count()?;

        let last_refresh: Option<i64> = self
            .conn
            .query_row("SELECT MAX(cached_at) FROM cached_entries", [], |r| r.get(0))
            .optional()?
            .flatten();

        let categories: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT category) FROM cached_entries",
            [],
            |r| r.get(0),
        )?;

        let size_bytes = self
            .db_path
            .as_ref()
            .and_then(|p| std::fs::metadata(p).ok())
            .map(|m| m.len() as usize)
            .unwrap_or(0);

        Ok(CacheStats {
            entries,
            capacity: ENTRY_CACHE_LIMIT,
            categories: categories as usize,
            last_refresh,
            size_bytes,
        })
    }

    /// Nuke the cache (delete the DB file)
    fn nuke(db_path: &Path) -> Result<()> {
        if db_path.exists() {
            std::fs::remove_file(db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
        }
        Ok(())
    }
}

/// Statistics about cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub categories: usize,
    pub last_refresh: Option<i64>,
    pub size_bytes: usize,
}
