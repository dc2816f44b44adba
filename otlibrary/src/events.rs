//! Historique de lecture et paroles

use crate::db::{now_millis, Database};
use crate::error::Result;
use crate::models::{Event, Lyrics, Song};
use rusqlite::{params, OptionalExtension};

impl Database {
    // ============ Historique de lecture ============

    /// Enregistre une lecture et cumule le temps de jeu de la chanson
    pub fn register_play(&self, song_id: &str, play_time_ms: i64) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO event (song_id, timestamp, play_time_ms) VALUES (?1, ?2, ?3)",
            params![song_id, now_millis(), play_time_ms],
        )?;
        tx.execute(
            "UPDATE song SET total_play_time_ms = total_play_time_ms + ?1 WHERE id = ?2",
            params![play_time_ms, song_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    /// Liste les derniers événements de lecture, les plus récents d'abord
    pub fn recent_events(&self, limit: usize) -> Result<Vec<Event>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, song_id, timestamp, play_time_ms FROM event
             ORDER BY timestamp DESC, id DESC LIMIT ?1",
        )?;
        let events = stmt
            .query_map(params![limit as i64], |row| {
                Ok(Event {
                    id: row.get(0)?,
                    song_id: row.get(1)?,
                    timestamp: row.get(2)?,
                    play_time_ms: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }

    /// Chansons les plus jouées depuis un horodatage donné
    ///
    /// `since_millis` à `None` prend tout l'historique en compte.
    pub fn most_played_songs(&self, limit: usize, since_millis: Option<i64>) -> Result<Vec<Song>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT song.id, song.title, song.artists_text, song.duration_text,
                    song.thumbnail_url, song.like_date, song.total_play_time_ms
             FROM song
             JOIN event ON song.id = event.song_id
             WHERE event.timestamp >= ?1
             GROUP BY song.id
             ORDER BY SUM(event.play_time_ms) DESC
             LIMIT ?2",
        )?;
        let songs = stmt
            .query_map(params![since_millis.unwrap_or(0), limit as i64], |row| {
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

    /// Efface tout l'historique de lecture
    pub fn clear_events(&self) -> Result<()> {
        self.conn().execute("DELETE FROM event", [])?;
        Ok(())
    }

    // ============ Paroles ============

    /// Enregistre ou remplace les paroles d'une chanson
    pub fn set_lyrics(&self, lyrics: &Lyrics) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO lyrics (song_id, fixed, synced) VALUES (?1, ?2, ?3)
             ON CONFLICT(song_id) DO UPDATE SET
                 fixed = excluded.fixed,
                 synced = excluded.synced",
            params![lyrics.song_id, lyrics.fixed, lyrics.synced],
        )?;
        Ok(())
    }

    /// Récupère les paroles d'une chanson
    pub fn lyrics(&self, song_id: &str) -> Result<Option<Lyrics>> {
        let conn = self.conn();
        let lyrics = conn
            .query_row(
                "SELECT song_id, fixed, synced FROM lyrics WHERE song_id = ?1",
                params![song_id],
                |row| {
                    Ok(Lyrics {
                        song_id: row.get(0)?,
                        fixed: row.get(1)?,
                        synced: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_song(id: &str) -> Database {
        let db = Database::in_memory().unwrap();
        db.upsert_song(&Song {
            id: id.to_string(),
            title: format!("song {}", id),
            artists_text: None,
            duration_text: None,
            thumbnail_url: None,
            like_date: None,
            total_play_time_ms: 0,
        })
        .unwrap();
        db
    }

    #[test]
    fn test_register_play_accumulates_time() {
        let db = db_with_song("a");

        db.register_play("a", 1000).unwrap();
        db.register_play("a", 2500).unwrap();

        let song = db.song("a").unwrap().unwrap();
        assert_eq!(song.total_play_time_ms, 3500);
        assert_eq!(db.recent_events(10).unwrap().len(), 2);
    }

    #[test]
    fn test_most_played_ordering() {
        let db = db_with_song("a");
        db.upsert_song(&Song {
            id: "b".to_string(),
            title: "song b".to_string(),
            artists_text: None,
            duration_text: None,
            thumbnail_url: None,
            like_date: None,
            total_play_time_ms: 0,
        })
        .unwrap();

        db.register_play("a", 1000).unwrap();
        db.register_play("b", 5000).unwrap();
        db.register_play("a", 1000).unwrap();

        let top = db.most_played_songs(10, None).unwrap();
        assert_eq!(top[0].id, "b");
        assert_eq!(top[1].id, "a");

        let limited = db.most_played_songs(1, None).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_clear_events_keeps_totals() {
        let db = db_with_song("a");
        db.register_play("a", 1000).unwrap();

        db.clear_events().unwrap();
        assert!(db.recent_events(10).unwrap().is_empty());
        // Le cumul sur la chanson n'est pas remis à zéro
        assert_eq!(db.song("a").unwrap().unwrap().total_play_time_ms, 1000);
    }

    #[test]
    fn test_lyrics_roundtrip() {
        let db = db_with_song("a");
        assert!(db.lyrics("a").unwrap().is_none());

        db.set_lyrics(&Lyrics {
            song_id: "a".to_string(),
            fixed: Some("some words".to_string()),
            synced: None,
        })
        .unwrap();

        let lyrics = db.lyrics("a").unwrap().unwrap();
        assert_eq!(lyrics.fixed.as_deref(), Some("some words"));

        db.set_lyrics(&Lyrics {
            song_id: "a".to_string(),
            fixed: Some("some words".to_string()),
            synced: Some("[00:01.00] some words".to_string()),
        })
        .unwrap();
        assert!(db.lyrics("a").unwrap().unwrap().synced.is_some());
    }
}
