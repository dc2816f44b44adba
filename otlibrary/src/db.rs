//! Ouverture et schéma de la base SQLite de la bibliothèque

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Base de données de la bibliothèque locale
///
/// La connexion est partagée derrière un mutex : toutes les opérations sont
/// courtes et synchrones, le verrou n'est jamais tenu pendant une attente.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Ouvre (ou crée) la base au chemin donné
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        info!(db_path=%path.display(), "Opened library database");
        Self::from_connection(conn)
    }

    /// Ouvre la base au chemin défini dans la configuration
    pub fn open_from_config() -> Result<Self> {
        let config = otconfig::get_config();
        let db_path = config.get_library_db_path()?;
        Self::open(Path::new(&db_path))
    }

    /// Crée une base en mémoire (tests)
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Self::create_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Accès à la connexion partagée
    pub(crate) fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS song (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                artists_text TEXT,
                duration_text TEXT,
                thumbnail_url TEXT,
                like_date INTEGER,
                total_play_time_ms INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS artist (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                thumbnail_url TEXT,
                info TEXT,
                bookmarked_at INTEGER
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS album (
                id TEXT PRIMARY KEY,
                title TEXT,
                authors_text TEXT,
                year TEXT,
                thumbnail_url TEXT,
                bookmarked_at INTEGER
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS song_artist_map (
                song_id TEXT NOT NULL,
                artist_id TEXT NOT NULL,
                PRIMARY KEY (song_id, artist_id),
                FOREIGN KEY (song_id) REFERENCES song(id) ON DELETE CASCADE,
                FOREIGN KEY (artist_id) REFERENCES artist(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS song_album_map (
                song_id TEXT NOT NULL,
                album_id TEXT NOT NULL,
                position INTEGER,
                PRIMARY KEY (song_id, album_id),
                FOREIGN KEY (song_id) REFERENCES song(id) ON DELETE CASCADE,
                FOREIGN KEY (album_id) REFERENCES album(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS playlist (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                browse_id TEXT
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS song_playlist_map (
                song_id TEXT NOT NULL,
                playlist_id INTEGER NOT NULL,
                position INTEGER NOT NULL,
                PRIMARY KEY (song_id, playlist_id),
                FOREIGN KEY (song_id) REFERENCES song(id) ON DELETE CASCADE,
                FOREIGN KEY (playlist_id) REFERENCES playlist(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_song_playlist_map_playlist
             ON song_playlist_map (playlist_id, position)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS lyrics (
                song_id TEXT PRIMARY KEY,
                fixed TEXT,
                synced TEXT,
                FOREIGN KEY (song_id) REFERENCES song(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS event (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                song_id TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                play_time_ms INTEGER NOT NULL,
                FOREIGN KEY (song_id) REFERENCES song(id) ON DELETE CASCADE
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_event_song ON event (song_id, timestamp)",
            [],
        )?;

        Ok(())
    }
}

/// Horodatage courant en millisecondes Unix
pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
