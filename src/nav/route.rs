use crate::models::NoteId;
use regex::Regex;
use std::sync::LazyLock;

static NOTES_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#/notes(/)?$").expect("notes pattern"));

static NOTE_DETAILS_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^#/note/([0-9a-f]{8}(-[0-9a-f]{4}){3}-[0-9a-f]{12})(/)?$")
        .expect("note details pattern")
});

/// What a URL fragment points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// `""`, `#` or `#/`.
    Root,
    NoteList,
    NoteDetails(NoteId),
    /// Anything else; treated as the default landing.
    Fallback,
}

impl Route {
    pub fn parse(fragment: &str) -> Route {
        if fragment.is_empty() || fragment == "#" || fragment == "#/" {
            return Route::Root;
        }
        if NOTES_RX.is_match(fragment) {
            return Route::NoteList;
        }
        if let Some(id) = NOTE_DETAILS_RX
            .captures(fragment)
            .and_then(|caps| caps.get(1))
            .and_then(|m| NoteId::parse(m.as_str()).ok())
        {
            return Route::NoteDetails(id);
        }
        Route::Fallback
    }
}

pub const LOGIN_FRAGMENT: &str = "#/login";
pub const NOTE_LIST_FRAGMENT: &str = "#/notes";
pub const NOTE_CREATE_FRAGMENT: &str = "#/note";
pub const ERROR_FRAGMENT: &str = "#/error";

pub fn note_details_fragment(id: &NoteId) -> String {
    format!("#/note/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[test]
    fn test_root_fragments() {
        assert_eq!(Route::parse(""), Route::Root);
        assert_eq!(Route::parse("#"), Route::Root);
        assert_eq!(Route::parse("#/"), Route::Root);
    }

    #[test]
    fn test_note_list_fragments() {
        assert_eq!(Route::parse("#/notes"), Route::NoteList);
        assert_eq!(Route::parse("#/notes/"), Route::NoteList);
        assert_eq!(Route::parse("#/notes//"), Route::Fallback);
    }

    #[test]
    fn test_note_details_fragment() {
        let id = NoteId::parse(ID).expect("valid id");
        assert_eq!(Route::parse(&format!("#/note/{ID}")), Route::NoteDetails(id.clone()));
        assert_eq!(Route::parse(&format!("#/note/{ID}/")), Route::NoteDetails(id));
    }

    #[test]
    fn test_malformed_note_details_fall_back() {
        assert_eq!(Route::parse("#/note/not-a-uuid"), Route::Fallback);
        assert_eq!(Route::parse(&format!("#/note/{}", ID.to_uppercase())), Route::Fallback);
        assert_eq!(Route::parse(&format!("#/notes/{ID}")), Route::Fallback);
        assert_eq!(Route::parse("#/note"), Route::Fallback);
        assert_eq!(Route::parse("#/login"), Route::Fallback);
    }

    #[test]
    fn test_details_fragment_round_trips() {
        let id = NoteId::parse(ID).expect("valid id");
        let fragment = note_details_fragment(&id);
        assert_eq!(Route::parse(&fragment), Route::NoteDetails(id));
    }
}
