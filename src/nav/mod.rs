//! Navigation state machine.
//!
//! The [`Navigator`] owns every top-level view and is the only place that
//! changes which one is visible. A transition hides all visible views, shows
//! the destination and records one history entry. Destinations that need
//! backend data first produce a [`PendingResolution`]; the caller awaits it
//! and hands the [`Resolution`] back to [`Navigator::settle`].

mod handle;
mod ledger;
mod route;

pub use handle::NavHandle;
pub use ledger::{BrowserHistory, HistoryMode, MemoryLedger, NavigationEntry, NavigationLedger};
pub use route::Route;

use crate::api::{ApiOutcome, Backend};
use crate::errors::Failure;
use crate::lifecycle::{Component, LifecycleError, Slot};
use crate::models::{Note, NoteId, Token};
use crate::session::SessionStore;
use crate::views::{Payload, View, ViewId};
use route::{
    note_details_fragment, ERROR_FRAGMENT, LOGIN_FRAGMENT, NOTE_CREATE_FRAGMENT,
    NOTE_LIST_FRAGMENT,
};
use std::sync::Arc;

/// A navigation target that may be deferred behind login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    NoteList { refresh: bool },
    NoteCreate,
    NoteDetails(NoteId),
}

/// Where to go once the login view is left, carried only while it is active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingIntent {
    pub previous: Destination,
    pub next: Destination,
}

/// A note lookup issued for one navigation generation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingResolution {
    note_id: NoteId,
    generation: u64,
    mode: HistoryMode,
}

impl PendingResolution {
    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Issues the single backend fetch for this lookup.
    pub async fn run(self, backend: &dyn Backend) -> Resolution {
        let outcome = backend.note(&self.note_id).await;
        Resolution {
            pending: self,
            outcome,
        }
    }
}

/// A completed lookup, ready to be settled.
#[derive(Clone, Debug)]
pub struct Resolution {
    pending: PendingResolution,
    outcome: ApiOutcome<Note>,
}

pub struct Navigator {
    views: Vec<Box<dyn View>>,
    ledger: Box<dyn NavigationLedger>,
    session: Arc<dyn SessionStore>,
    backend: Arc<dyn Backend>,
    current: Option<ViewId>,
    generation: u64,
    pending: Option<PendingIntent>,
}

impl Navigator {
    pub fn new(
        views: Vec<Box<dyn View>>,
        ledger: Box<dyn NavigationLedger>,
        session: Arc<dyn SessionStore>,
        backend: Arc<dyn Backend>,
    ) -> Self {
        Self {
            views,
            ledger,
            session,
            backend,
            current: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn current(&self) -> Option<ViewId> {
        self.current
    }

    pub fn backend(&self) -> Arc<dyn Backend> {
        self.backend.clone()
    }

    pub fn pending_intent(&self) -> Option<&PendingIntent> {
        self.pending.as_ref()
    }

    pub fn visible_views(&self) -> Vec<ViewId> {
        self.views
            .iter()
            .filter(|v| v.is_visible())
            .map(|v| v.id())
            .collect()
    }

    fn is_terminal(&self) -> bool {
        self.current == Some(ViewId::UnrecoverableError)
    }

    // ---- lifecycle of the owned views ----

    pub fn create_views(&mut self) -> Result<(), LifecycleError> {
        self.views.iter_mut().try_for_each(|v| v.create())
    }

    pub fn build_views(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.views.iter_mut().try_for_each(|v| v.build(slot))
    }

    pub fn init_views(&mut self) -> Result<(), LifecycleError> {
        self.views.iter_mut().try_for_each(|v| v.init())?;
        self.hide_views();
        Ok(())
    }

    // ---- transitions ----

    fn hide_views(&mut self) {
        for view in self.views.iter_mut().filter(|v| v.is_visible()) {
            view.hide();
        }
        self.current = None;
    }

    fn transition(&mut self, id: ViewId, payload: Payload, fragment: String, mode: HistoryMode) {
        self.hide_views();
        self.generation += 1;
        if id != ViewId::Login {
            self.pending = None;
        }

        match self.views.iter_mut().find(|v| v.id() == id) {
            Some(view) => {
                view.show(payload);
                self.current = Some(id);
            }
            None => tracing::error!(view = %id, "no such view registered"),
        }

        let entry = NavigationEntry { id, fragment, mode };
        tracing::debug!(view = %entry.id, fragment = %entry.fragment, ?mode, "navigated");
        self.ledger.record(&entry);
    }

    fn begin_resolution(&mut self, note_id: NoteId, mode: HistoryMode) -> PendingResolution {
        self.hide_views();
        self.generation += 1;
        self.pending = None;
        tracing::debug!(note = %note_id, generation = self.generation, "resolving note");
        PendingResolution {
            note_id,
            generation: self.generation,
            mode,
        }
    }

    fn enter(&mut self, destination: Destination, mode: HistoryMode) -> Option<PendingResolution> {
        match destination {
            Destination::NoteList { refresh } => {
                let payload = if refresh { Payload::Refresh } else { Payload::Empty };
                self.transition(ViewId::NoteList, payload, NOTE_LIST_FRAGMENT.to_string(), mode);
                None
            }
            Destination::NoteCreate => {
                self.transition(
                    ViewId::NoteCreate,
                    Payload::Empty,
                    NOTE_CREATE_FRAGMENT.to_string(),
                    mode,
                );
                None
            }
            Destination::NoteDetails(id) => Some(self.begin_resolution(id, mode)),
        }
    }

    /// Explicit navigation request from application logic.
    ///
    /// Ignored while the error view is showing.
    pub fn go(&mut self, destination: Destination, mode: HistoryMode) -> Option<PendingResolution> {
        if self.is_terminal() {
            tracing::debug!(?destination, "ignoring navigation from the error view");
            return None;
        }
        self.enter(destination, mode)
    }

    pub fn show_note_list(&mut self, refresh: bool, mode: HistoryMode) {
        self.go(Destination::NoteList { refresh }, mode);
    }

    pub fn show_note_create(&mut self, mode: HistoryMode) {
        self.go(Destination::NoteCreate, mode);
    }

    pub fn show_note_details(&mut self, note: Note, mode: HistoryMode) {
        if self.is_terminal() {
            tracing::debug!(note = %note.note_id, "ignoring navigation from the error view");
            return;
        }
        let fragment = note_details_fragment(&note.note_id);
        self.transition(ViewId::NoteDetails, Payload::Note(note), fragment, mode);
    }

    pub fn show_login(&mut self, intent: PendingIntent, mode: HistoryMode) {
        if self.is_terminal() {
            tracing::debug!("ignoring login request from the error view");
            return;
        }
        self.transition(ViewId::Login, Payload::Empty, LOGIN_FRAGMENT.to_string(), mode);
        self.pending = Some(intent);
    }

    pub fn show_error(&mut self, message: String, mode: HistoryMode) {
        self.transition(
            ViewId::UnrecoverableError,
            Payload::Message(message),
            ERROR_FRAGMENT.to_string(),
            mode,
        );
    }

    /// Routes a failed backend call to the error view.
    pub fn fail(&mut self, failure: Failure) {
        failure.log("navigation");
        self.show_error(failure.message(), HistoryMode::Push);
    }

    /// Runs `next` when a session exists, otherwise asks for login first.
    pub fn gated(&mut self, next: Destination, previous: Destination) -> Option<PendingResolution> {
        if self.session.is_authorized() {
            return self.go(next, HistoryMode::Push);
        }
        self.show_login(PendingIntent { previous, next }, HistoryMode::Push);
        None
    }

    /// Persists the session, then resumes the deferred action.
    pub fn complete_login(&mut self, token: &Token) -> Option<PendingResolution> {
        self.session.set_authorized(&token.token);
        tracing::info!("login succeeded");
        match self.pending.take() {
            Some(intent) => self.go(intent.next, HistoryMode::Push),
            None => {
                tracing::debug!("login completed without a pending intent");
                None
            }
        }
    }

    pub fn cancel_login(&mut self) -> Option<PendingResolution> {
        match self.pending.take() {
            Some(intent) => self.go(intent.previous, HistoryMode::Push),
            None => None,
        }
    }

    /// Resolves a URL fragment (startup and every `hashchange`).
    ///
    /// This is a fresh navigation cycle, so it also leaves the error view.
    pub fn route(&mut self, fragment: &str, mode: HistoryMode) -> Option<PendingResolution> {
        match Route::parse(fragment) {
            Route::Root | Route::Fallback => {
                self.enter(Destination::NoteList { refresh: false }, HistoryMode::Replace)
            }
            Route::NoteList => self.enter(Destination::NoteList { refresh: false }, mode),
            Route::NoteDetails(id) => self.enter(Destination::NoteDetails(id), mode),
        }
    }

    /// Applies a finished lookup unless a newer navigation superseded it.
    pub fn settle(&mut self, resolution: Resolution) {
        let Resolution { pending, outcome } = resolution;
        if pending.generation != self.generation {
            tracing::debug!(
                note = %pending.note_id,
                issued = pending.generation,
                current = self.generation,
                "dropping stale note lookup"
            );
            return;
        }

        match outcome.into_result() {
            Ok(note) => {
                let fragment = note_details_fragment(&note.note_id);
                self.transition(ViewId::NoteDetails, Payload::Note(note), fragment, pending.mode);
            }
            Err(failure) => self.fail(failure),
        }
    }
}
