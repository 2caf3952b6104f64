use crate::lifecycle::Component;
use crate::models::Note;
use serde::{Deserialize, Serialize};

/// Identifier of a top-level view; doubles as the history state id.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum ViewId {
    #[serde(rename = "login-view")]
    #[strum(serialize = "login-view")]
    Login,

    #[serde(rename = "note-details-view")]
    #[strum(serialize = "note-details-view")]
    NoteDetails,

    #[serde(rename = "note-list-view")]
    #[strum(serialize = "note-list-view")]
    NoteList,

    #[serde(rename = "note-view")]
    #[strum(serialize = "note-view")]
    NoteCreate,

    #[serde(rename = "unrecoverable-error-view")]
    #[strum(serialize = "unrecoverable-error-view")]
    UnrecoverableError,
}

/// Input handed to a view when it is shown.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Empty,
    /// Reload list content before showing.
    Refresh,
    Note(Note),
    Message(String),
}

/// A mutually exclusive top-level screen.
///
/// Only the navigator calls `show`/`hide`; both are idempotent with respect
/// to visibility.
pub trait View: Component + Send + Sync {
    fn id(&self) -> ViewId;

    fn show(&mut self, payload: Payload);

    fn hide(&mut self);

    fn is_visible(&self) -> bool;
}
