use crate::views::ViewId;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Title passed along with every history entry.
pub const HISTORY_TITLE: &str = "nordnotes";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryMode {
    Push,
    Replace,
}

/// One recorded transition.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NavigationEntry {
    pub id: ViewId,
    pub fragment: String,
    pub mode: HistoryMode,
}

/// Where transitions are recorded (browser history, or memory when headless).
pub trait NavigationLedger: Send + Sync {
    fn push(&mut self, entry: &NavigationEntry);

    fn replace(&mut self, entry: &NavigationEntry);

    fn record(&mut self, entry: &NavigationEntry) {
        match entry.mode {
            HistoryMode::Push => self.push(entry),
            HistoryMode::Replace => self.replace(entry),
        }
    }
}

/// `window.history` backed ledger.
///
/// Back/forward traversal surfaces as `hashchange` events, which the shell
/// feeds back into URL resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    fn state_object(entry: &NavigationEntry) -> wasm_bindgen::JsValue {
        let state = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&state, &"id".into(), &entry.id.as_ref().into());
        state.into()
    }
}

impl NavigationLedger for BrowserHistory {
    fn push(&mut self, entry: &NavigationEntry) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.push_state_with_url(
            &Self::state_object(entry),
            HISTORY_TITLE,
            Some(&entry.fragment),
        ) {
            tracing::warn!("history.pushState failed: {e:?}");
        }
    }

    fn replace(&mut self, entry: &NavigationEntry) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        if let Err(e) = history.replace_state_with_url(
            &Self::state_object(entry),
            HISTORY_TITLE,
            Some(&entry.fragment),
        ) {
            tracing::warn!("history.replaceState failed: {e:?}");
        }
    }
}

#[derive(Debug, Default)]
struct MemoryStack {
    entries: Vec<NavigationEntry>,
    cursor: usize,
    pushes: usize,
    replaces: usize,
}

/// In-memory ledger with back/forward traversal.
///
/// Clones share the same stack.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    stack: Arc<Mutex<MemoryStack>>,
}

impl MemoryLedger {
    fn with_stack<R>(&self, f: impl FnOnce(&mut MemoryStack) -> R) -> R {
        let mut guard = match self.stack.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut guard)
    }

    pub fn entries(&self) -> Vec<NavigationEntry> {
        self.with_stack(|s| s.entries.clone())
    }

    pub fn current(&self) -> Option<NavigationEntry> {
        self.with_stack(|s| s.entries.get(s.cursor).cloned())
    }

    /// Number of `push` and `replace` calls so far.
    pub fn counts(&self) -> (usize, usize) {
        self.with_stack(|s| (s.pushes, s.replaces))
    }

    /// Steps back and returns the fragment now current.
    pub fn back(&self) -> Option<String> {
        self.with_stack(|s| {
            if s.cursor == 0 {
                return None;
            }
            s.cursor -= 1;
            s.entries.get(s.cursor).map(|e| e.fragment.clone())
        })
    }

    pub fn forward(&self) -> Option<String> {
        self.with_stack(|s| {
            if s.cursor + 1 >= s.entries.len() {
                return None;
            }
            s.cursor += 1;
            s.entries.get(s.cursor).map(|e| e.fragment.clone())
        })
    }
}

impl NavigationLedger for MemoryLedger {
    fn push(&mut self, entry: &NavigationEntry) {
        self.with_stack(|s| {
            s.pushes += 1;
            if !s.entries.is_empty() {
                s.entries.truncate(s.cursor + 1);
            }
            s.entries.push(entry.clone());
            s.cursor = s.entries.len() - 1;
        });
    }

    fn replace(&mut self, entry: &NavigationEntry) {
        self.with_stack(|s| {
            s.replaces += 1;
            match s.entries.get_mut(s.cursor) {
                Some(current) => *current = entry.clone(),
                None => {
                    s.entries.push(entry.clone());
                    s.cursor = s.entries.len() - 1;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: ViewId, fragment: &str, mode: HistoryMode) -> NavigationEntry {
        NavigationEntry {
            id,
            fragment: fragment.to_string(),
            mode,
        }
    }

    #[test]
    fn test_replace_on_empty_ledger_creates_entry() {
        let mut ledger = MemoryLedger::default();
        ledger.record(&entry(ViewId::NoteList, "#/notes", HistoryMode::Replace));
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.counts(), (0, 1));
    }

    #[test]
    fn test_push_truncates_forward_entries() {
        let mut ledger = MemoryLedger::default();
        ledger.record(&entry(ViewId::NoteList, "#/notes", HistoryMode::Replace));
        ledger.record(&entry(ViewId::NoteCreate, "#/note", HistoryMode::Push));
        ledger.record(&entry(ViewId::Login, "#/login", HistoryMode::Push));

        assert_eq!(ledger.back().as_deref(), Some("#/note"));
        assert_eq!(ledger.back().as_deref(), Some("#/notes"));
        assert_eq!(ledger.back(), None);
        assert_eq!(ledger.forward().as_deref(), Some("#/note"));

        ledger.record(&entry(ViewId::UnrecoverableError, "#/error", HistoryMode::Push));
        let fragments: Vec<String> = ledger.entries().into_iter().map(|e| e.fragment).collect();
        assert_eq!(fragments, vec!["#/notes", "#/note", "#/error"]);
        assert_eq!(ledger.forward(), None);
    }

    #[test]
    fn test_clones_share_stack() {
        let ledger = MemoryLedger::default();
        let mut writer = ledger.clone();
        writer.record(&entry(ViewId::NoteList, "#/notes", HistoryMode::Push));
        assert_eq!(ledger.current().map(|e| e.id), Some(ViewId::NoteList));
    }

    #[test]
    fn test_entry_serializes_with_history_id() {
        let v = serde_json::to_value(entry(ViewId::Login, "#/login", HistoryMode::Push))
            .expect("should serialize");
        assert_eq!(v["id"], "login-view");
        assert_eq!(v["mode"], "push");
    }
}
