//! Opérations sur les playlists locales
//!
//! Les positions dans une playlist sont denses : toujours 0..n-1 sans trou.
//! Les réordonnancements et suppressions se font dans une transaction pour
//! que cet invariant tienne même en cas d'erreur à mi-chemin.

use crate::db::Database;
use crate::error::{LibraryError, Result};
use crate::models::{Playlist, PlaylistPreview, PlaylistSortBy, Song, SortOrder};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

fn playlist_from_row(row: &Row<'_>) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        name: row.get(1)?,
        browse_id: row.get(2)?,
    })
}

impl Database {
    /// Crée une playlist et retourne son identifiant local
    pub fn create_playlist(&self, name: &str, browse_id: Option<&str>) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO playlist (name, browse_id) VALUES (?1, ?2)",
            params![name, browse_id],
        )?;
        let id = conn.last_insert_rowid();
        debug!("created playlist {} ({})", name, id);
        Ok(id)
    }

    /// Renomme une playlist
    pub fn rename_playlist(&self, playlist_id: i64, name: &str) -> Result<()> {
        let updated = self.conn().execute(
            "UPDATE playlist SET name = ?1 WHERE id = ?2",
            params![name, playlist_id],
        )?;
        if updated == 0 {
            return Err(LibraryError::NotFound(format!("playlist {}", playlist_id)));
        }
        Ok(())
    }

    /// Supprime une playlist et ses associations
    pub fn delete_playlist(&self, playlist_id: i64) -> Result<()> {
        let deleted = self
            .conn()
            .execute("DELETE FROM playlist WHERE id = ?1", params![playlist_id])?;
        if deleted == 0 {
            return Err(LibraryError::NotFound(format!("playlist {}", playlist_id)));
        }
        Ok(())
    }

    /// Vide une playlist sans la supprimer
    pub fn clear_playlist(&self, playlist_id: i64) -> Result<()> {
        let removed = self.conn().execute(
            "DELETE FROM song_playlist_map WHERE playlist_id = ?1",
            params![playlist_id],
        )?;
        debug!("cleared playlist {} ({} songs)", playlist_id, removed);
        Ok(())
    }

    /// Récupère une playlist par son identifiant local
    pub fn playlist(&self, playlist_id: i64) -> Result<Option<Playlist>> {
        let conn = self.conn();
        let playlist = conn
            .query_row(
                "SELECT id, name, browse_id FROM playlist WHERE id = ?1",
                params![playlist_id],
                playlist_from_row,
            )
            .optional()?;
        Ok(playlist)
    }

    /// Liste les playlists avec leur nombre de chansons
    pub fn playlists(&self, sort_by: PlaylistSortBy, order: SortOrder) -> Result<Vec<PlaylistPreview>> {
        let sort_column = match sort_by {
            PlaylistSortBy::Name => "name COLLATE NOCASE",
            PlaylistSortBy::DateAdded => "playlist.id",
            PlaylistSortBy::SongCount => "song_count",
        };
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT playlist.id, playlist.name, playlist.browse_id,
                    COUNT(song_playlist_map.song_id) AS song_count
             FROM playlist
             LEFT JOIN song_playlist_map ON playlist.id = song_playlist_map.playlist_id
             GROUP BY playlist.id
             ORDER BY {} {}",
            sort_column,
            order.sql()
        ))?;
        let previews = stmt
            .query_map([], |row| {
                Ok(PlaylistPreview {
                    playlist: playlist_from_row(row)?,
                    song_count: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(previews)
    }

    /// Liste les chansons d'une playlist dans l'ordre des positions
    pub fn playlist_songs(&self, playlist_id: i64) -> Result<Vec<Song>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT song.id, song.title, song.artists_text, song.duration_text,
                    song.thumbnail_url, song.like_date, song.total_play_time_ms
             FROM song
             JOIN song_playlist_map ON song.id = song_playlist_map.song_id
             WHERE song_playlist_map.playlist_id = ?1
             ORDER BY song_playlist_map.position",
        )?;
        let songs = stmt
            .query_map(params![playlist_id], |row| {
                Ok(Song {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    artists_text: row.get(2)?,
                    duration_text: row.get(3)?,
                    thumbnail_url: row.get(4)?,
                    like_date: row.get(5)?,
                    total_play_time_ms: row.get(6)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(songs)
    }

    /// Ajoute une chanson en fin de playlist
    pub fn add_song_to_playlist(&self, playlist_id: i64, song_id: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO song_playlist_map (song_id, playlist_id, position)
             VALUES (?1, ?2,
                     (SELECT COALESCE(MAX(position) + 1, 0)
                      FROM song_playlist_map WHERE playlist_id = ?2))",
            params![song_id, playlist_id],
        )?;
        Ok(())
    }

    /// Déplace une chanson d'une position à une autre dans une playlist
    ///
    /// Les positions intermédiaires sont décalées pour rester denses.
    pub fn move_song_in_playlist(
        &self,
        playlist_id: i64,
        from_position: usize,
        to_position: usize,
    ) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let len: usize = tx.query_row(
            "SELECT COUNT(*) FROM song_playlist_map WHERE playlist_id = ?1",
            params![playlist_id],
            |row| row.get::<_, i64>(0).map(|n| n as usize),
        )?;
        if from_position >= len {
            return Err(LibraryError::InvalidPosition {
                position: from_position,
                len,
            });
        }
        if to_position >= len {
            return Err(LibraryError::InvalidPosition {
                position: to_position,
                len,
            });
        }

        let song_id: String = tx.query_row(
            "SELECT song_id FROM song_playlist_map
             WHERE playlist_id = ?1 AND position = ?2",
            params![playlist_id, from_position as i64],
            |row| row.get(0),
        )?;

        if from_position < to_position {
            tx.execute(
                "UPDATE song_playlist_map SET position = position - 1
                 WHERE playlist_id = ?1 AND position > ?2 AND position <= ?3",
                params![playlist_id, from_position as i64, to_position as i64],
            )?;
        } else if from_position > to_position {
            tx.execute(
                "UPDATE song_playlist_map SET position = position + 1
                 WHERE playlist_id = ?1 AND position >= ?2 AND position < ?3",
                params![playlist_id, to_position as i64, from_position as i64],
            )?;
        }

        tx.execute(
            "UPDATE song_playlist_map SET position = ?1
             WHERE playlist_id = ?2 AND song_id = ?3",
            params![to_position as i64, playlist_id, song_id],
        )?;

        tx.commit()?;
        debug!(
            "moved song {} from {} to {} in playlist {}",
            song_id, from_position, to_position, playlist_id
        );
        Ok(())
    }

    /// Retire une chanson d'une playlist en refermant le trou de positions
    pub fn remove_song_from_playlist(&self, playlist_id: i64, song_id: &str) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let position: Option<i64> = tx
            .query_row(
                "SELECT position FROM song_playlist_map
                 WHERE playlist_id = ?1 AND song_id = ?2",
                params![playlist_id, song_id],
                |row| row.get(0),
            )
            .optional()?;
        let Some(position) = position else {
            return Err(LibraryError::NotFound(format!(
                "song {} in playlist {}",
                song_id, playlist_id
            )));
        };

        tx.execute(
            "DELETE FROM song_playlist_map WHERE playlist_id = ?1 AND song_id = ?2",
            params![playlist_id, song_id],
        )?;
        tx.execute(
            "UPDATE song_playlist_map SET position = position - 1
             WHERE playlist_id = ?1 AND position > ?2",
            params![playlist_id, position],
        )?;

        tx.commit()?;
        Ok(())
    }
}
