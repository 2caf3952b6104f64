use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static NOTE_ID_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[0-9a-f]{8}(-[0-9a-f]{4}){3}-[0-9a-f]{12}$").expect("note id pattern")
});

static TTL_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[1-9][0-9]*[wdhm]$").expect("ttl pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid note identifier: {0:?}")]
pub struct InvalidNoteId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time to live: {0:?}")]
pub struct InvalidTtl(pub String);

/// Backend note identifier: 8-4-4-4-12 lowercase hex groups.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId(String);

impl NoteId {
    pub fn parse(raw: &str) -> Result<Self, InvalidNoteId> {
        if NOTE_ID_RX.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidNoteId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NoteId {
    type Error = InvalidNoteId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NoteId> for String {
    fn from(id: NoteId) -> Self {
        id.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtlUnit {
    Weeks,
    Days,
    Hours,
    Minutes,
}

/// Note expiration token such as `10d` or `3w`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct Ttl(String);

impl Ttl {
    pub fn parse(raw: &str) -> Result<Self, InvalidTtl> {
        if TTL_RX.is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidTtl(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn unit(&self) -> TtlUnit {
        // The pattern guarantees a trailing unit letter.
        match self.0.as_bytes().last() {
            Some(b'w') => TtlUnit::Weeks,
            Some(b'd') => TtlUnit::Days,
            Some(b'h') => TtlUnit::Hours,
            _ => TtlUnit::Minutes,
        }
    }

    /// Numeric part; `None` when it does not fit in a `u64`.
    pub fn amount(&self) -> Option<u64> {
        self.0[..self.0.len() - 1].parse().ok()
    }
}

impl TryFrom<String> for Ttl {
    type Error = InvalidTtl;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ttl> for String {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

/// A note as returned by the backend.
///
/// List results carry only `noteId` and `title`, so the remaining fields
/// default to empty.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    #[serde(rename = "noteId")]
    pub note_id: NoteId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
}

/// One entry of the backend `errors` list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub details: String,
}

impl ErrorDescriptor {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
        }
    }
}

/// Uniform response wrapper used by every backend endpoint.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Envelope<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDescriptor>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LoginParams {
    pub login: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateNoteParams {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Ttl>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_id_accepts_lowercase_uuid() {
        let id = NoteId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        assert_eq!(id.as_str(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    }

    #[test]
    fn test_note_id_rejects_uppercase_and_garbage() {
        assert!(NoteId::parse("3FA85F64-5717-4562-B3FC-2C963F66AFA6").is_err());
        assert!(NoteId::parse("not-a-uuid").is_err());
        assert!(NoteId::parse("3fa85f64-5717-4562-b3fc-2c963f66afa6/").is_err());
        assert!(NoteId::parse("").is_err());
    }

    #[test]
    fn test_ttl_pattern() {
        assert!(Ttl::parse("10d").is_ok());
        assert!(Ttl::parse("1w").is_ok());
        assert!(Ttl::parse("10x").is_err());
        assert!(Ttl::parse("0d").is_err());
        assert!(Ttl::parse("d").is_err());
        assert!(Ttl::parse(" 5h").is_err());
    }

    #[test]
    fn test_ttl_unit_and_amount() {
        let ttl = Ttl::parse("36h").expect("valid ttl");
        assert_eq!(ttl.unit(), TtlUnit::Hours);
        assert_eq!(ttl.amount(), Some(36));

        let huge = Ttl::parse("99999999999999999999999m").expect("valid ttl");
        assert_eq!(huge.unit(), TtlUnit::Minutes);
        assert_eq!(huge.amount(), None);
    }

    #[test]
    fn test_note_contract_deserialize() {
        // Contract based on the nordnotes backend NoteDto.
        let json = r#"{"noteId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "title": "Hello"}"#;
        let note: Note = serde_json::from_str(json).expect("note should parse");
        assert_eq!(note.title, "Hello");
        assert!(note.content.is_empty());
        assert!(note.ttl.is_none());
    }

    #[test]
    fn test_note_with_malformed_id_is_rejected() {
        let json = r#"{"noteId": "42", "title": "Hello"}"#;
        assert!(serde_json::from_str::<Note>(json).is_err());
    }

    #[test]
    fn test_create_note_params_omit_empty_ttl() {
        let params = CreateNoteParams {
            title: "t".to_string(),
            content: "c".to_string(),
            ttl: None,
        };
        let v = serde_json::to_value(params).expect("should serialize");
        assert_eq!(v["title"], "t");
        assert!(v.get("ttl").is_none());
    }

    #[test]
    fn test_envelope_errors_deserialize() {
        let json = r#"{"errors": [{"details": "Not found"}]}"#;
        let env: Envelope<Note> = serde_json::from_str(json).expect("envelope should parse");
        assert!(env.data.is_none());
        assert_eq!(env.errors, Some(vec![ErrorDescriptor::new("Not found")]));
    }
}
