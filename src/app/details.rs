use super::ViewFrame;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::lifecycle::{mount, Component, Lifecycle, LifecycleError, Phase, Slot};
use crate::markdown;
use crate::models::{Note, TtlUnit};
use crate::nav::{Destination, NavHandle};
use crate::views::{Payload, View, ViewId};
use leptos::prelude::*;

fn expiry_label(note: &Note) -> Option<String> {
    let ttl = note.ttl.as_ref()?;
    let amount = ttl.amount()?;
    let unit = match (ttl.unit(), amount) {
        (TtlUnit::Minutes, 1) => "minute",
        (TtlUnit::Minutes, _) => "minutes",
        (TtlUnit::Hours, 1) => "hour",
        (TtlUnit::Hours, _) => "hours",
        (TtlUnit::Days, 1) => "day",
        (TtlUnit::Days, _) => "days",
        (TtlUnit::Weeks, 1) => "week",
        (TtlUnit::Weeks, _) => "weeks",
    };
    Some(format!("Expires {amount} {unit} after creation"))
}

/// Body of the details view; a fresh one is mounted for every note shown.
struct NoteDetails {
    lifecycle: Lifecycle,
    nav: NavHandle,
    note: Note,
}

impl NoteDetails {
    fn new(note: Note, nav: NavHandle) -> Self {
        Self {
            lifecycle: Lifecycle::new("note-details"),
            nav,
            note,
        }
    }
}

impl Component for NoteDetails {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;
        let nav = self.nav;
        let html = markdown::render(&self.note.content);
        let expiry = expiry_label(&self.note);
        let title = self.note.title.clone();

        slot.attach(view! {
            <article class="flex flex-col gap-4">
                <div class="flex items-start justify-between gap-4">
                    <h1 class="text-xl font-semibold break-words">{title}</h1>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| nav.go(Destination::NoteList { refresh: false })
                    >
                        "Back"
                    </Button>
                </div>
                {expiry.map(|label| view! { <p class="text-xs text-muted-foreground">{label}</p> })}
                <div class="prose prose-sm max-w-none" inner_html=html></div>
            </article>
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)
    }
}

pub struct NoteDetailsView {
    frame: ViewFrame,
    nav: NavHandle,
    body: Option<NoteDetails>,
    // Nodes of the latest body, taken once by the rendered section.
    nodes: RwSignal<Option<Vec<AnyView>>, LocalStorage>,
}

impl NoteDetailsView {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            frame: ViewFrame::new(ViewId::NoteDetails),
            nav,
            body: None,
            nodes: RwSignal::new_local(None),
        }
    }

    fn replace_body(&mut self, note: Note) -> Result<(), LifecycleError> {
        let mut body = NoteDetails::new(note, self.nav);
        let mut slot = Slot::default();
        mount(&mut body, &mut slot)?;
        self.body = Some(body);
        self.nodes.set(Some(slot.into_nodes()));
        Ok(())
    }
}

impl Component for NoteDetailsView {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Built)?;
        let nodes = self.nodes;
        let body = move || {
            nodes.track();
            nodes.try_update_untracked(Option::take).flatten()
        };
        slot.attach(self.frame.render(vec![body.into_any()]));
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Initialized)
    }
}

impl View for NoteDetailsView {
    fn id(&self) -> ViewId {
        self.frame.id()
    }

    fn show(&mut self, payload: Payload) {
        match payload {
            Payload::Note(note) => {
                if let Err(e) = self.replace_body(note) {
                    tracing::error!(error = %e, "note details body failed to mount");
                }
            }
            other => tracing::debug!(?other, "details view shown without a note"),
        }
        self.frame.show();
    }

    fn hide(&mut self) {
        self.frame.hide();
    }

    fn is_visible(&self) -> bool {
        self.frame.is_visible()
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::NoteId;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn note(id: &str, title: &str) -> Note {
        Note {
            note_id: NoteId::parse(id).expect("valid id"),
            title: title.to_string(),
            content: format!("# {title}"),
            ttl: None,
        }
    }

    #[wasm_bindgen_test]
    fn test_each_show_mounts_a_fresh_body() {
        let mut view = NoteDetailsView::new(NavHandle::new());
        mount(&mut view, &mut Slot::default()).expect("mount");
        assert!(view.body.is_none());

        view.show(Payload::Note(note("3fa85f64-5717-4562-b3fc-2c963f66afa6", "first")));
        let first = view.body.as_ref().expect("body after first show");
        assert_eq!(first.note.title, "first");
        assert!(first.lifecycle.is_initialized());

        view.hide();
        view.show(Payload::Note(note("0b7e7d3a-9c1f-4f25-8a8e-3d2f1c0b9a77", "second")));
        let second = view.body.as_ref().expect("body after second show");
        assert_eq!(second.note.title, "second");
        assert!(second.lifecycle.is_initialized());
        assert_eq!(view.nodes.with_untracked(|n| n.as_ref().map(Vec::len)), Some(1));
        assert!(view.is_visible());
    }

    #[wasm_bindgen_test]
    fn test_show_without_note_keeps_previous_body() {
        let mut view = NoteDetailsView::new(NavHandle::new());
        mount(&mut view, &mut Slot::default()).expect("mount");

        view.show(Payload::Note(note("3fa85f64-5717-4562-b3fc-2c963f66afa6", "kept")));
        view.hide();
        view.show(Payload::Empty);
        assert_eq!(view.body.as_ref().map(|b| b.note.title.as_str()), Some("kept"));
        assert!(view.is_visible());
    }
}
