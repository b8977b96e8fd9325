//! Note database operations

use minimd_types::{Note, NoteId};
use rusqlite::{OptionalExtension, Row, params};

use super::super::Database;
use super::super::sqlite::{format_timestamp, parse_timestamp};
use crate::error::StoreResult;

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        created_at: parse_timestamp(row, 3)?,
        updated_at: parse_timestamp(row, 4)?,
    })
}

impl Database {
    /// All notes, most recently updated first. Equal stamps fall back to the
    /// higher id first so the order is stable between calls.
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare(
            "SELECT id, title, content, created_at, updated_at
             FROM notes
             ORDER BY updated_at DESC, id DESC",
        )?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(notes)
    }

    /// Get a note by ID
    pub fn get_note(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let conn = self.lock_conn();
        let note = conn
            .query_row(
                "SELECT id, title, content, created_at, updated_at FROM notes WHERE id = ?1",
                [id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    /// Insert a note. The id comes straight from the insert, never from a
    /// lookup by content: identical notes are legal and must stay distinct.
    pub fn create_note(&self, title: &str, content: &str) -> StoreResult<Note> {
        let (conn, now) = self.write_conn();
        let now_str = format_timestamp(&now);

        conn.execute(
            "INSERT INTO notes (title, content, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![title, content, &now_str],
        )?;

        let id = conn.last_insert_rowid();

        Ok(Note {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite title and content and re-stamp `updated_at`.
    ///
    /// Returns `Ok(None)` when no note has this id; nothing is written.
    pub fn update_note(&self, id: NoteId, title: &str, content: &str) -> StoreResult<Option<Note>> {
        let (conn, now) = self.write_conn();

        let note = conn
            .query_row(
                "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3
                 WHERE id = ?4
                 RETURNING id, title, content, created_at, updated_at",
                params![title, content, format_timestamp(&now), id],
                note_from_row,
            )
            .optional()?;

        Ok(note)
    }

    /// Delete a note. Returns whether a row was removed; deleting a missing
    /// note is not an error.
    pub fn delete_note(&self, id: NoteId) -> StoreResult<bool> {
        let conn = self.lock_conn();
        let rows = conn.execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}
