//! Sticky notes.

use serde::{Deserialize, Serialize};
use webmail_rpc::{Connection, Result};

use crate::items::Items;
use crate::types::{
    BatchResult, CreateResult, ItemError, KId, Page, SearchQuery, SetResult, UtcDateTime,
    Watermark,
};

/// Color of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteColor {
    /// White.
    White,
    /// Yellow.
    #[default]
    Yellow,
    /// Pink.
    Pink,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Value not known to this client.
    #[serde(other)]
    Unknown,
}

/// Position and size of a note on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePosition {
    /// Left edge.
    pub x_offset: u64,
    /// Top edge.
    pub y_offset: u64,
    /// Width.
    pub x_size: u64,
    /// Height.
    pub y_size: u64,
}

/// Note details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Note {
    /// Note id.
    pub id: KId,
    /// Folder holding the item.
    pub folder_id: KId,
    /// Item version.
    pub watermark: Watermark,
    /// Color.
    pub color: NoteColor,
    /// Note text.
    pub text: String,
    /// Window geometry.
    pub position: NotePosition,
    /// Read-only.
    pub create_date: UtcDateTime,
    /// Read-only.
    pub modify_date: UtcDateTime,
}

impl Note {
    /// Creates a note in `folder_id`.
    #[must_use]
    pub fn new(folder_id: KId, text: impl Into<String>) -> Self {
        Self {
            folder_id,
            text: text.into(),
            ..Self::default()
        }
    }
}

/// `Notes.*` methods.
#[derive(Debug, Clone, Copy)]
pub struct Notes<'a> {
    items: Items<'a>,
}

impl<'a> Notes<'a> {
    /// Creates the service on a connection.
    #[must_use]
    pub const fn new(conn: &'a Connection) -> Self {
        Self {
            items: Items::new(conn, "Notes", "notes"),
        }
    }

    /// Lists notes of the given folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get(&self, folder_ids: &[KId], query: &SearchQuery) -> Result<Page<Note>> {
        self.items.get(folder_ids, query).await
    }

    /// Fetches notes by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn get_by_id(&self, ids: &[KId]) -> Result<BatchResult<Note>> {
        self.items.get_by_id(ids).await
    }

    /// Removes notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn remove(&self, ids: &[KId]) -> Result<Vec<ItemError>> {
        self.items.remove(ids).await
    }

    /// Copies notes to `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn copy(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.items.copy(ids, folder).await
    }

    /// Creates notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn create(&self, notes: &[Note]) -> Result<BatchResult<CreateResult>> {
        self.items.create(notes).await
    }

    /// Updates notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn set(&self, notes: &[Note]) -> Result<BatchResult<SetResult>> {
        self.items.set(notes).await
    }

    /// Moves notes to `folder`.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn move_to(&self, ids: &[KId], folder: &KId) -> Result<BatchResult<CreateResult>> {
        self.items.move_to(ids, folder).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_position() {
        let note = Note {
            color: NoteColor::Blue,
            position: NotePosition {
                x_offset: 354,
                y_offset: 206,
                x_size: 623,
                y_size: 326,
            },
            ..Note::new(KId::new("notes"), "milk")
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["color"], "Blue");
        assert_eq!(
            value["position"],
            json!({"xOffset": 354, "yOffset": 206, "xSize": 623, "ySize": 326})
        );
    }
}
