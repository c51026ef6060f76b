//! Note domain types
//!
//! [`FormValues`] is what the user typed, [`NoteDraft`] is the normalized
//! record the validator produces from it, and [`Note`] is the record the
//! note store hands back once the draft has been persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Category tag assigned to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

impl NoteTag {
    /// Every tag, in the order a tag picker presents them
    pub const ALL: [NoteTag; 5] = [
        NoteTag::Todo,
        NoteTag::Work,
        NoteTag::Personal,
        NoteTag::Meeting,
        NoteTag::Shopping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteTag::Todo => "Todo",
            NoteTag::Work => "Work",
            NoteTag::Personal => "Personal",
            NoteTag::Meeting => "Meeting",
            NoteTag::Shopping => "Shopping",
        }
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not one of the five tag names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown note tag: {0:?}")]
pub struct TagParseError(pub String);

impl FromStr for NoteTag {
    type Err = TagParseError;

    /// Tag names are matched exactly; "todo" is not "Todo".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NoteTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| TagParseError(s.to_string()))
    }
}

/// A form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Content,
    Tag,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Title, Field::Content, Field::Tag];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Content => "content",
            Field::Tag => "tag",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raised when a string is not a form field name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field: {0:?}")]
pub struct FieldParseError(pub String);

impl FromStr for Field {
    type Err = FieldParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldParseError(s.to_string()))
    }
}

/// Raw field values as entered by the user
///
/// The tag is kept as the selected string so that values outside the fixed
/// set can still reach the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValues {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl FormValues {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag: tag.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
            Field::Tag => &self.tag,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Content => self.content = value,
            Field::Tag => self.tag = value,
        }
    }
}

impl Default for FormValues {
    /// Values a freshly mounted form starts with.
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::default().as_str().to_string(),
        }
    }
}

impl From<&NoteDraft> for FormValues {
    fn from(draft: &NoteDraft) -> Self {
        Self::new(draft.title.clone(), draft.content.clone(), draft.tag.as_str())
    }
}

/// A validated, not yet persisted note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag: NoteTag) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag,
        }
    }
}

/// A note as stored by the note service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Build the record a store assigns to a freshly created draft
    pub fn from_draft(draft: NoteDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            tag: draft.tag,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parse_is_exact() {
        assert_eq!("Shopping".parse::<NoteTag>(), Ok(NoteTag::Shopping));
        assert!("shopping".parse::<NoteTag>().is_err());
        assert!("".parse::<NoteTag>().is_err());
        assert_eq!(
            "Urgent".parse::<NoteTag>(),
            Err(TagParseError("Urgent".to_string()))
        );
    }

    #[test]
    fn test_tag_display_matches_parse() {
        for tag in NoteTag::ALL {
            assert_eq!(tag.to_string().parse::<NoteTag>(), Ok(tag));
        }
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("content".parse::<Field>(), Ok(Field::Content));
        let err = "colour".parse::<Field>().unwrap_err();
        assert_eq!(err, FieldParseError("colour".to_string()));
        assert_eq!(err.to_string(), "unknown field: \"colour\"");
    }

    #[test]
    fn test_form_values_default_to_empty_todo() {
        let values = FormValues::default();
        assert_eq!(values.title, "");
        assert_eq!(values.content, "");
        assert_eq!(values.tag, "Todo");
    }

    #[test]
    fn test_form_values_set_and_get() {
        let mut values = FormValues::default();
        values.set(Field::Title, "Groceries");
        values.set(Field::Tag, "Shopping");

        assert_eq!(values.get(Field::Title), "Groceries");
        assert_eq!(values.get(Field::Content), "");
        assert_eq!(values.get(Field::Tag), "Shopping");
    }

    #[test]
    fn test_note_from_draft_assigns_identity() {
        let draft = NoteDraft::new("Buy milk", "2% organic", NoteTag::Shopping);
        let first = Note::from_draft(draft.clone());
        let second = Note::from_draft(draft);

        assert_ne!(first.id, second.id);
        assert_eq!(first.title, "Buy milk");
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note::from_draft(NoteDraft::new("Standup", "Daily sync", NoteTag::Meeting));
        let json = serde_json::to_value(&note).unwrap();

        assert_eq!(json["tag"], "Meeting");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());

        let back: Note = serde_json::from_value(json).unwrap();
        assert_eq!(back, note);
    }
}
