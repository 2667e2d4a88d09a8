//! Gallery store — SQLite-backed append-only repository

use std::sync::Mutex;

use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use appforge_pipeline::ProjectBundle;

/// A published gallery entry as stored and listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryEntry {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub layout: String,
    pub description: String,
    /// Inline SVG thumbnail markup.
    pub thumbnail: String,
    pub files: ProjectBundle,
    /// Unix timestamp (milliseconds, UTC) recorded at append time.
    pub created_at: i64,
    pub featured: bool,
}

/// Publication payload: the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewGalleryEntry {
    pub title: String,
    pub theme: String,
    pub layout: String,
    pub description: String,
    pub thumbnail: String,
    pub files: ProjectBundle,
    pub featured: bool,
}

/// Repository abstraction over the shared store so the pipeline and HTTP
/// layer never depend on the storage technology.
pub trait GalleryStore: Send + Sync {
    /// Persist a new entry, assigning its id and timestamp.
    fn append(&self, entry: NewGalleryEntry) -> Result<GalleryEntry>;

    /// Entries sorted by `created_at` descending, at most `limit`.
    fn list(&self, limit: usize) -> Result<Vec<GalleryEntry>>;

    /// Remove an entry by id. Returns whether anything was removed.
    fn remove(&self, id: &str) -> Result<bool>;
}

/// SQLite-backed gallery.
pub struct SqliteGallery {
    conn: Mutex<Connection>,
}

impl SqliteGallery {
    pub fn open(db_path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS gallery_entries (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                theme TEXT NOT NULL,
                layout TEXT NOT NULL,
                description TEXT NOT NULL,
                thumbnail TEXT NOT NULL,
                files_json TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                featured INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_gallery_created ON gallery_entries(created_at);",
        )?;
        Ok(())
    }
}

impl GalleryStore for SqliteGallery {
    fn append(&self, entry: NewGalleryEntry) -> Result<GalleryEntry> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {e}"))?;

        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().timestamp_millis();
        let files_json = serde_json::to_string(&entry.files)?;

        conn.execute(
            "INSERT INTO gallery_entries
                (id, title, theme, layout, description, thumbnail, files_json, created_at, featured)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                entry.title,
                entry.theme,
                entry.layout,
                entry.description,
                entry.thumbnail,
                files_json,
                created_at,
                entry.featured as i64,
            ],
        )?;

        Ok(GalleryEntry {
            id,
            title: entry.title,
            theme: entry.theme,
            layout: entry.layout,
            description: entry.description,
            thumbnail: entry.thumbnail,
            files: entry.files,
            created_at,
            featured: entry.featured,
        })
    }

    fn list(&self, limit: usize) -> Result<Vec<GalleryEntry>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {e}"))?;

        let mut stmt = conn.prepare(
            "SELECT id, title, theme, layout, description, thumbnail, files_json, created_at, featured
             FROM gallery_entries
             ORDER BY created_at DESC, id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, i64>(8)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (id, title, theme, layout, description, thumbnail, files_json, created_at, featured) =
                row?;
            entries.push(GalleryEntry {
                id,
                title,
                theme,
                layout,
                description,
                thumbnail,
                files: serde_json::from_str(&files_json)?,
                created_at,
                featured: featured != 0,
            });
        }
        Ok(entries)
    }

    fn remove(&self, id: &str) -> Result<bool> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {e}"))?;
        let removed = conn.execute("DELETE FROM gallery_entries WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}
