use super::ViewFrame;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, CardItem, CardList, Spinner};
use crate::lifecycle::{Component, Lifecycle, LifecycleError, Phase, Slot};
use crate::models::Note;
use crate::nav::{Destination, NavHandle};
use crate::views::{Payload, View, ViewId};
use leptos::prelude::*;
use leptos::task::spawn_local;

const BACK_TO_LIST: Destination = Destination::NoteList { refresh: false };

/// Hands out load ids; only the most recently issued one is current.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RequestGuard {
    latest: u64,
}

impl RequestGuard {
    fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn is_current(&self, id: u64) -> bool {
        self.latest == id
    }
}

/// Reactive state of the list, shared by its event handlers.
#[derive(Clone, Copy)]
struct ListState {
    nav: NavHandle,
    notes: RwSignal<Vec<Note>>,
    loading: RwSignal<bool>,
    // Only the latest load may write `notes`.
    requests: StoredValue<RequestGuard>,
}

impl ListState {
    fn load(self) {
        let Some(backend) = self.nav.backend() else {
            return;
        };
        let Some(issued) = self.requests.try_update_value(RequestGuard::issue) else {
            return;
        };
        self.loading.set(true);

        spawn_local(async move {
            let outcome = backend.notes().await;
            if !self.requests.with_value(|r| r.is_current(issued)) {
                tracing::debug!(issued, "dropping superseded note list");
                return;
            }
            self.loading.set(false);
            match outcome.into_result() {
                Ok(notes) => {
                    tracing::debug!(count = notes.len(), "notes loaded");
                    self.notes.set(notes);
                }
                Err(failure) => self.nav.fail(failure),
            }
        });
    }
}

#[component]
fn NoteListItem(note: Note, nav: NavHandle) -> impl IntoView {
    let id = note.note_id.clone();
    let on_open = move |_| nav.gated(Destination::NoteDetails(id.clone()), BACK_TO_LIST);

    view! {
        <CardItem>
            <button
                class="w-full truncate text-left text-sm hover:underline hover:cursor-pointer"
                on:click=on_open
            >
                {note.title}
            </button>
        </CardItem>
    }
}

pub struct NoteList {
    lifecycle: Lifecycle,
    state: ListState,
}

impl NoteList {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            lifecycle: Lifecycle::new("note-list"),
            state: ListState {
                nav,
                notes: RwSignal::new(Vec::new()),
                loading: RwSignal::new(false),
                requests: StoredValue::new(RequestGuard::default()),
            },
        }
    }

    pub fn refresh(&self) {
        self.state.load();
    }
}

impl Component for NoteList {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;
        let ListState {
            nav, notes, loading, ..
        } = self.state;

        let on_create = move |_| nav.gated(Destination::NoteCreate, BACK_TO_LIST);

        slot.attach(view! {
            <div class="flex flex-col gap-4">
                <div class="flex items-center justify-between">
                    <h1 class="text-lg font-semibold">"Notes"</h1>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_create>
                        "New note"
                    </Button>
                </div>

                <Show when=move || loading.get() fallback=|| ().into_view()>
                    <div class="flex justify-center py-4">
                        <Spinner />
                    </div>
                </Show>

                <Show
                    when=move || !notes.with(|n| n.is_empty())
                    fallback=move || view! {
                        <p class="text-sm text-muted-foreground" class:hidden=move || loading.get()>
                            "No notes yet."
                        </p>
                    }
                >
                    <CardList>
                        <For
                            each=move || notes.get()
                            key=|note| note.note_id.clone()
                            children=move |note| view! { <NoteListItem note=note nav=nav /> }
                        />
                    </CardList>
                </Show>
            </div>
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)?;
        self.state.load();
        Ok(())
    }
}

pub struct NoteListView {
    frame: ViewFrame,
    list: NoteList,
}

impl NoteListView {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            frame: ViewFrame::new(ViewId::NoteList),
            list: NoteList::new(nav),
        }
    }
}

impl Component for NoteListView {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Created)?;
        self.list.create()
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Built)?;
        let mut body = Slot::default();
        self.list.build(&mut body)?;
        slot.attach(self.frame.render(body.into_nodes()));
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Initialized)?;
        self.list.init()
    }
}

impl View for NoteListView {
    fn id(&self) -> ViewId {
        self.frame.id()
    }

    fn show(&mut self, payload: Payload) {
        if payload == Payload::Refresh {
            self.list.refresh();
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
