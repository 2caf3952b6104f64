use super::{Destination, HistoryMode, Navigator, PendingResolution};
use crate::api::Backend;
use crate::errors::Failure;
use crate::models::Token;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;

/// Copyable handle to the installed [`Navigator`].
///
/// Views capture it in event handlers; every call borrows the navigator
/// briefly and spawns the lookup, if any, on the browser event loop.
/// The backend is stored apart so views can reach it while the navigator is
/// borrowed (for example from inside `show`).
#[derive(Clone, Copy)]
pub struct NavHandle {
    navigator: StoredValue<Option<Navigator>>,
    backend: StoredValue<Option<Arc<dyn Backend>>>,
}

impl NavHandle {
    pub fn new() -> Self {
        Self {
            navigator: StoredValue::new(None),
            backend: StoredValue::new(None),
        }
    }

    pub fn install(&self, navigator: Navigator) {
        self.backend.set_value(Some(navigator.backend()));
        self.navigator.set_value(Some(navigator));
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Navigator) -> R) -> Option<R> {
        let mut out = None;
        self.navigator.update_value(|slot| {
            if let Some(navigator) = slot.as_mut() {
                out = Some(f(navigator));
            }
        });
        if out.is_none() {
            tracing::warn!("navigation requested before the navigator was installed");
        }
        out
    }

    pub fn backend(&self) -> Option<Arc<dyn Backend>> {
        self.backend.get_value()
    }

    pub fn go(self, destination: Destination) {
        let pending = self.with(|n| n.go(destination, HistoryMode::Push)).flatten();
        self.resolve(pending);
    }

    pub fn gated(self, next: Destination, previous: Destination) {
        let pending = self.with(|n| n.gated(next, previous)).flatten();
        self.resolve(pending);
    }

    pub fn route(self, fragment: &str, mode: HistoryMode) {
        let pending = self.with(|n| n.route(fragment, mode)).flatten();
        self.resolve(pending);
    }

    pub fn complete_login(self, token: Token) {
        let pending = self.with(|n| n.complete_login(&token)).flatten();
        self.resolve(pending);
    }

    pub fn cancel_login(self) {
        let pending = self.with(|n| n.cancel_login()).flatten();
        self.resolve(pending);
    }

    pub fn fail(self, failure: Failure) {
        self.with(|n| n.fail(failure));
    }

    fn resolve(self, pending: Option<PendingResolution>) {
        let Some(pending) = pending else {
            return;
        };
        let Some(backend) = self.backend() else {
            return;
        };

        spawn_local(async move {
            let resolution = pending.run(&*backend).await;
            self.with(|n| n.settle(resolution));
        });
    }
}

impl Default for NavHandle {
    fn default() -> Self {
        Self::new()
    }
}
