//! Opérations sur les chansons, artistes et albums de la bibliothèque

use crate::db::{now_millis, Database};
use crate::error::Result;
use crate::models::{Album, Artist, BookmarkSortBy, Song, SongSortBy, SortOrder};
use rusqlite::{params, Row};
use tracing::debug;

fn song_from_row(row: &Row<'_>) -> rusqlite::Result<Song> {
    Ok(Song {
        id: row.get(0)?,
        title: row.get(1)?,
        artists_text: row.get(2)?,
        duration_text: row.get(3)?,
        thumbnail_url: row.get(4)?,
        like_date: row.get(5)?,
        total_play_time_ms: row.get(6)?,
    })
}

fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
        thumbnail_url: row.get(2)?,
        info: row.get(3)?,
        bookmarked_at: row.get(4)?,
    })
}

fn album_from_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        title: row.get(1)?,
        authors_text: row.get(2)?,
        year: row.get(3)?,
        thumbnail_url: row.get(4)?,
        bookmarked_at: row.get(5)?,
    })
}

const SONG_COLUMNS: &str =
    "id, title, artists_text, duration_text, thumbnail_url, like_date, total_play_time_ms";
const SONG_COLUMNS_QUALIFIED: &str = "song.id, song.title, song.artists_text, \
     song.duration_text, song.thumbnail_url, song.like_date, song.total_play_time_ms";
const ARTIST_COLUMNS: &str = "id, name, thumbnail_url, info, bookmarked_at";
const ALBUM_COLUMNS: &str = "id, title, authors_text, year, thumbnail_url, bookmarked_at";

impl Database {
    // ============ Chansons ============

    /// Insère ou met à jour une chanson
    ///
    /// Seules les métadonnées du catalogue sont écrasées : le like et le
    /// temps de lecture cumulé sont préservés.
    pub fn upsert_song(&self, song: &Song) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO song (id, title, artists_text, duration_text, thumbnail_url, like_date, total_play_time_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 artists_text = excluded.artists_text,
                 duration_text = excluded.duration_text,
                 thumbnail_url = excluded.thumbnail_url",
            params![
                song.id,
                song.title,
                song.artists_text,
                song.duration_text,
                song.thumbnail_url,
                song.like_date,
                song.total_play_time_ms,
            ],
        )?;
        Ok(())
    }

    /// Récupère une chanson par son identifiant
    pub fn song(&self, id: &str) -> Result<Option<Song>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM song WHERE id = ?1", SONG_COLUMNS))?;
        let mut rows = stmt.query_map(params![id], song_from_row)?;
        Ok(rows.next().transpose()?)
    }

    /// Bascule le like d'une chanson
    ///
    /// Retourne le nouvel état (liké ou non).
    pub fn toggle_like(&self, song_id: &str) -> Result<bool> {
        let conn = self.conn();
        let liked: Option<i64> = conn.query_row(
            "SELECT like_date FROM song WHERE id = ?1",
            params![song_id],
            |row| row.get(0),
        )?;

        let new_date = match liked {
            Some(_) => None,
            None => Some(now_millis()),
        };
        conn.execute(
            "UPDATE song SET like_date = ?1 WHERE id = ?2",
            params![new_date, song_id],
        )?;
        debug!("song {} liked: {}", song_id, new_date.is_some());
        Ok(new_date.is_some())
    }

    /// Liste les chansons de la bibliothèque selon un critère de tri
    pub fn songs(&self, sort_by: SongSortBy, order: SortOrder) -> Result<Vec<Song>> {
        let sort_column = match sort_by {
            SongSortBy::Title => "title COLLATE NOCASE",
            SongSortBy::PlayTime => "total_play_time_ms",
            SongSortBy::DateAdded => "ROWID",
        };
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM song ORDER BY {} {}",
            SONG_COLUMNS,
            sort_column,
            order.sql()
        ))?;
        let songs = stmt
            .query_map([], song_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(songs)
    }

    /// Liste les chansons likées, les plus récentes d'abord
    pub fn liked_songs(&self) -> Result<Vec<Song>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM song WHERE like_date IS NOT NULL ORDER BY like_date DESC",
            SONG_COLUMNS
        ))?;
        let songs = stmt
            .query_map([], song_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(songs)
    }

    // ============ Artistes ============

    /// Insère ou met à jour un artiste en préservant la date de favori
    pub fn upsert_artist(&self, artist: &Artist) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO artist (id, name, thumbnail_url, info, bookmarked_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 thumbnail_url = excluded.thumbnail_url,
                 info = excluded.info",
            params![
                artist.id,
                artist.name,
                artist.thumbnail_url,
                artist.info,
                artist.bookmarked_at,
            ],
        )?;
        Ok(())
    }

    /// Récupère un artiste par son identifiant
    pub fn artist(&self, id: &str) -> Result<Option<Artist>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM artist WHERE id = ?1", ARTIST_COLUMNS))?;
        let mut rows = stmt.query_map(params![id], artist_from_row)?;
        Ok(rows.next().transpose()?)
    }

    /// Bascule le favori d'un artiste
    pub fn toggle_artist_bookmark(&self, artist_id: &str) -> Result<bool> {
        let conn = self.conn();
        let bookmarked: Option<i64> = conn.query_row(
            "SELECT bookmarked_at FROM artist WHERE id = ?1",
            params![artist_id],
            |row| row.get(0),
        )?;

        let new_date = match bookmarked {
            Some(_) => None,
            None => Some(now_millis()),
        };
        conn.execute(
            "UPDATE artist SET bookmarked_at = ?1 WHERE id = ?2",
            params![new_date, artist_id],
        )?;
        Ok(new_date.is_some())
    }

    /// Liste les artistes en favori
    pub fn bookmarked_artists(&self, sort_by: BookmarkSortBy, order: SortOrder) -> Result<Vec<Artist>> {
        let sort_column = match sort_by {
            BookmarkSortBy::Name => "name COLLATE NOCASE",
            BookmarkSortBy::DateBookmarked => "bookmarked_at",
        };
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM artist WHERE bookmarked_at IS NOT NULL ORDER BY {} {}",
            ARTIST_COLUMNS,
            sort_column,
            order.sql()
        ))?;
        let artists = stmt
            .query_map([], artist_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(artists)
    }

    /// Associe une chanson à un artiste
    pub fn link_song_artist(&self, song_id: &str, artist_id: &str) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT OR IGNORE INTO song_artist_map (song_id, artist_id) VALUES (?1, ?2)",
            params![song_id, artist_id],
        )?;
        Ok(())
    }

    /// Liste les chansons connues d'un artiste, par temps de lecture décroissant
    pub fn artist_songs(&self, artist_id: &str) -> Result<Vec<Song>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM song
             JOIN song_artist_map ON song.id = song_artist_map.song_id
             WHERE song_artist_map.artist_id = ?1
             ORDER BY total_play_time_ms DESC",
            SONG_COLUMNS_QUALIFIED
        ))?;
        let songs = stmt
            .query_map(params![artist_id], song_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(songs)
    }

    // ============ Albums ============

    /// Insère ou met à jour un album en préservant la date de favori
    pub fn upsert_album(&self, album: &Album) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO album (id, title, authors_text, year, thumbnail_url, bookmarked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 authors_text = excluded.authors_text,
                 year = excluded.year,
                 thumbnail_url = excluded.thumbnail_url",
            params![
                album.id,
                album.title,
                album.authors_text,
                album.year,
                album.thumbnail_url,
                album.bookmarked_at,
            ],
        )?;
        Ok(())
    }

    /// Récupère un album par son identifiant
    pub fn album(&self, id: &str) -> Result<Option<Album>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {} FROM album WHERE id = ?1", ALBUM_COLUMNS))?;
        let mut rows = stmt.query_map(params![id], album_from_row)?;
        Ok(rows.next().transpose()?)
    }

    /// Bascule le favori d'un album
    pub fn toggle_album_bookmark(&self, album_id: &str) -> Result<bool> {
        let conn = self.conn();
        let bookmarked: Option<i64> = conn.query_row(
            "SELECT bookmarked_at FROM album WHERE id = ?1",
            params![album_id],
            |row| row.get(0),
        )?;

        let new_date = match bookmarked {
            Some(_) => None,
            None => Some(now_millis()),
        };
        conn.execute(
            "UPDATE album SET bookmarked_at = ?1 WHERE id = ?2",
            params![new_date, album_id],
        )?;
        Ok(new_date.is_some())
    }

    /// Liste les albums en favori
    pub fn bookmarked_albums(&self, sort_by: BookmarkSortBy, order: SortOrder) -> Result<Vec<Album>> {
        let sort_column = match sort_by {
            BookmarkSortBy::Name => "title COLLATE NOCASE",
            BookmarkSortBy::DateBookmarked => "bookmarked_at",
        };
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM album WHERE bookmarked_at IS NOT NULL ORDER BY {} {}",
            ALBUM_COLUMNS,
            sort_column,
            order.sql()
        ))?;
        let albums = stmt
            .query_map([], album_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(albums)
    }

    /// Associe une chanson à un album, avec sa position dans l'album
    pub fn link_song_album(&self, song_id: &str, album_id: &str, position: Option<i64>) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO song_album_map (song_id, album_id, position) VALUES (?1, ?2, ?3)
             ON CONFLICT(song_id, album_id) DO UPDATE SET position = excluded.position",
            params![song_id, album_id, position],
        )?;
        Ok(())
    }

    /// Liste les chansons d'un album dans l'ordre des pistes
    pub fn album_songs(&self, album_id: &str) -> Result<Vec<Song>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM song
             JOIN song_album_map ON song.id = song_album_map.song_id
             WHERE song_album_map.album_id = ?1
             ORDER BY song_album_map.position",
            SONG_COLUMNS_QUALIFIED
        ))?;
        let songs = stmt
            .query_map(params![album_id], song_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_song(id: &str, title: &str) -> Song {
        Song {
            id: id.to_string(),
            title: title.to_string(),
            artists_text: Some("Miles Davis".to_string()),
            duration_text: Some("9:22".to_string()),
            thumbnail_url: None,
            like_date: None,
            total_play_time_ms: 0,
        }
    }

    #[test]
    fn test_upsert_preserves_like_and_play_time() {
        let db = Database::in_memory().unwrap();
        let song = sample_song("a", "So What");
        db.upsert_song(&song).unwrap();

        assert!(db.toggle_like("a").unwrap());
        db.register_play("a", 5000).unwrap();

        // Une mise à jour des métadonnées ne touche pas aux colonnes locales
        let mut updated = sample_song("a", "So What (Remastered)");
        updated.like_date = None;
        updated.total_play_time_ms = 0;
        db.upsert_song(&updated).unwrap();

        let stored = db.song("a").unwrap().unwrap();
        assert_eq!(stored.title, "So What (Remastered)");
        assert!(stored.is_liked());
        assert_eq!(stored.total_play_time_ms, 5000);
    }

    #[test]
    fn test_toggle_like_roundtrip() {
        let db = Database::in_memory().unwrap();
        db.upsert_song(&sample_song("a", "So What")).unwrap();

        assert!(db.toggle_like("a").unwrap());
        assert_eq!(db.liked_songs().unwrap().len(), 1);
        assert!(!db.toggle_like("a").unwrap());
        assert!(db.liked_songs().unwrap().is_empty());
    }

    #[test]
    fn test_songs_sorted_by_title() {
        let db = Database::in_memory().unwrap();
        db.upsert_song(&sample_song("b", "blue in green")).unwrap();
        db.upsert_song(&sample_song("a", "All Blues")).unwrap();

        let songs = db.songs(SongSortBy::Title, SortOrder::Ascending).unwrap();
        assert_eq!(songs[0].title, "All Blues");
        assert_eq!(songs[1].title, "blue in green");
    }

    #[test]
    fn test_artist_bookmark_and_songs() {
        let db = Database::in_memory().unwrap();
        db.upsert_song(&sample_song("a", "So What")).unwrap();
        db.upsert_artist(&Artist {
            id: "UC1".to_string(),
            name: "Miles Davis".to_string(),
            thumbnail_url: None,
            info: None,
            bookmarked_at: None,
        })
        .unwrap();
        db.link_song_artist("a", "UC1").unwrap();

        assert!(db.toggle_artist_bookmark("UC1").unwrap());
        let artists = db
            .bookmarked_artists(BookmarkSortBy::Name, SortOrder::Ascending)
            .unwrap();
        assert_eq!(artists.len(), 1);

        let songs = db.artist_songs("UC1").unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, "a");
    }

    #[test]
    fn test_album_songs_in_track_order() {
        let db = Database::in_memory().unwrap();
        db.upsert_song(&sample_song("s1", "So What")).unwrap();
        db.upsert_song(&sample_song("s2", "Freddie Freeloader")).unwrap();
        db.upsert_album(&Album {
            id: "MPRE1".to_string(),
            title: Some("Kind of Blue".to_string()),
            authors_text: None,
            year: Some("1959".to_string()),
            thumbnail_url: None,
            bookmarked_at: None,
        })
        .unwrap();

        db.link_song_album("s2", "MPRE1", Some(2)).unwrap();
        db.link_song_album("s1", "MPRE1", Some(1)).unwrap();

        let songs = db.album_songs("MPRE1").unwrap();
        assert_eq!(songs[0].id, "s1");
        assert_eq!(songs[1].id, "s2");
    }
}
