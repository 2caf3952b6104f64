//! Concrete visual units: the shell, its chrome and the five views.

mod chrome;
mod create;
mod details;
mod error;
mod list;
mod login;

use crate::api::{ApiClient, Backend};
use crate::config::EnvConfig;
use crate::lifecycle::{Component, Lifecycle, LifecycleError, Phase, Slot};
use crate::nav::{BrowserHistory, HistoryMode, NavHandle, Navigator};
use crate::session::{LocalSession, SessionStore};
use crate::views::{View, ViewId};
use chrome::{Footer, Header};
use create::NoteCreateView;
use details::NoteDetailsView;
use error::UnrecoverableErrorView;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::{request_animation_frame, window_event_listener, WindowListenerHandle};
use list::NoteListView;
use login::LoginView;
use std::sync::Arc;

/// Identity, lifecycle guard and visibility flag shared by every view.
pub(crate) struct ViewFrame {
    id: ViewId,
    lifecycle: Lifecycle,
    visible: RwSignal<bool>,
}

impl ViewFrame {
    pub(crate) fn new(id: ViewId) -> Self {
        Self {
            id,
            lifecycle: Lifecycle::new(id.into()),
            visible: RwSignal::new(false),
        }
    }

    pub(crate) fn enter(&mut self, phase: Phase) -> Result<(), LifecycleError> {
        self.lifecycle.enter(phase)
    }

    pub(crate) fn id(&self) -> ViewId {
        self.id
    }

    pub(crate) fn show(&self) {
        self.visible.set(true);
    }

    pub(crate) fn hide(&self) {
        self.visible.set(false);
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible.get_untracked()
    }

    /// The view's root element; hidden unless the navigator shows it.
    pub(crate) fn render(&self, body: Vec<AnyView>) -> impl IntoView {
        let visible = self.visible;
        view! {
            <section
                id=self.id.to_string()
                class="mx-auto w-full max-w-2xl px-4 py-6"
                class:hidden=move || !visible.get()
            >
                {body}
            </section>
        }
    }
}

pub(crate) fn current_hash() -> String {
    window().location().hash().unwrap_or_default()
}

/// Root unit: header, the navigator's views, footer.
pub struct Shell {
    lifecycle: Lifecycle,
    header: Header,
    footer: Footer,
    nav: NavHandle,
    hashchange: StoredValue<Option<WindowListenerHandle>>,
}

impl Shell {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            lifecycle: Lifecycle::new("shell"),
            header: Header::new(),
            footer: Footer::new(),
            nav,
            hashchange: StoredValue::new(None),
        }
    }
}

impl Component for Shell {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)?;
        self.header.create()?;
        self.nav.with(|n| n.create_views()).transpose()?;
        self.footer.create()
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;
        self.header.build(slot)?;

        let mut main = Slot::default();
        self.nav.with(|n| n.build_views(&mut main)).transpose()?;
        slot.attach(view! { <main class="flex-1">{main.into_nodes()}</main> });

        self.footer.build(slot)
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)?;
        self.header.init()?;
        self.nav.with(|n| n.init_views()).transpose()?;
        self.footer.init()?;

        let nav = self.nav;
        nav.route(&current_hash(), HistoryMode::Replace);

        let listener = window_event_listener(ev::hashchange, move |_ev: web_sys::HashChangeEvent| {
            nav.route(&current_hash(), HistoryMode::Push);
        });
        self.hashchange.set_value(Some(listener));
        Ok(())
    }
}

fn assemble(shell: &mut Shell, slot: &mut Slot) -> Result<(), LifecycleError> {
    shell.create()?;
    shell.build(slot)
}

#[component]
pub fn App() -> impl IntoView {
    let config = EnvConfig::from_window();
    tracing::info!(api_url = %config.api_url, keep_session = config.keep_session, "starting");

    let local = LocalSession::new(
        config.authorized_storage_key.clone(),
        config.token_storage_key.clone(),
    );
    if !config.keep_session {
        local.clear();
    }
    let session: Arc<dyn SessionStore> = Arc::new(local);
    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(config.api_url.clone(), session.clone()));

    let nav = NavHandle::new();
    let views: Vec<Box<dyn View>> = vec![
        Box::new(LoginView::new(nav)),
        Box::new(NoteDetailsView::new(nav)),
        Box::new(NoteListView::new(nav)),
        Box::new(NoteCreateView::new(nav)),
        Box::new(UnrecoverableErrorView::new()),
    ];
    nav.install(Navigator::new(views, Box::new(BrowserHistory), session, backend));

    let mut shell = Shell::new(nav);
    let mut slot = Slot::default();
    if let Err(e) = assemble(&mut shell, &mut slot) {
        tracing::error!("failed to assemble the shell: {e}");
    }

    // Wiring and the first route need the rendered tree.
    request_animation_frame(move || {
        if let Err(e) = shell.init() {
            tracing::error!("failed to initialize the shell: {e}");
        }
    });

    view! {
        <div class="flex min-h-screen flex-col bg-background text-foreground">
            {slot.into_nodes()}
        </div>
    }
}
