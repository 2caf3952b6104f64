use super::ViewFrame;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardTitle, FieldMessage,
    Input, Label, Spinner, Textarea,
};
use crate::forms::{attempt_create, CreateAttempt, NoteField, NoteInput};
use crate::lifecycle::{Component, Lifecycle, LifecycleError, Phase, Slot};
use crate::nav::{Destination, NavHandle};
use crate::views::{Payload, View, ViewId};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub struct NoteForm {
    lifecycle: Lifecycle,
    nav: NavHandle,
    title: RwSignal<String>,
    content: RwSignal<String>,
    ttl: RwSignal<String>,
    invalid: RwSignal<Option<NoteField>>,
    busy: RwSignal<bool>,
}

impl NoteForm {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            lifecycle: Lifecycle::new("note-form"),
            nav,
            title: RwSignal::new(String::new()),
            content: RwSignal::new(String::new()),
            ttl: RwSignal::new(String::new()),
            invalid: RwSignal::new(None),
            busy: RwSignal::new(false),
        }
    }
}

impl Component for NoteForm {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;

        let nav = self.nav;
        let (title, content, ttl) = (self.title, self.content, self.ttl);
        let (invalid, busy) = (self.invalid, self.busy);

        let reset = move || {
            title.set(String::new());
            content.set(String::new());
            ttl.set(String::new());
            invalid.set(None);
        };

        let on_submit = move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if busy.get_untracked() {
                return;
            }
            let Some(backend) = nav.backend() else {
                return;
            };

            invalid.set(None);
            let input = NoteInput {
                title: title.get_untracked(),
                content: content.get_untracked(),
                ttl: ttl.get_untracked(),
            };

            busy.set(true);
            spawn_local(async move {
                let attempt = attempt_create(&*backend, &input).await;
                busy.set(false);
                match attempt {
                    CreateAttempt::Invalid(field) => invalid.set(Some(field)),
                    CreateAttempt::Created(_) => {
                        reset();
                        nav.go(Destination::NoteList { refresh: true });
                    }
                    CreateAttempt::Failed(failure) => nav.fail(failure),
                }
            });
        };

        let on_cancel = move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            reset();
            nav.go(Destination::NoteList { refresh: false });
        };

        let field_invalid = move |field: NoteField| Signal::derive(move || invalid.get() == Some(field));

        slot.attach(view! {
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"New note"</CardTitle>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="note-title" class="text-xs">"Title"</Label>
                            <Input
                                id="note-title"
                                bind_value=title
                                invalid=field_invalid(NoteField::Title)
                                class="h-8 text-sm"
                            />
                            <FieldMessage when=field_invalid(NoteField::Title)>"Title is required."</FieldMessage>
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="note-content" class="text-xs">"Content"</Label>
                            <Textarea
                                id="note-content"
                                placeholder="Markdown is supported."
                                bind_value=content
                                invalid=field_invalid(NoteField::Content)
                                class="text-sm"
                            />
                            <FieldMessage when=field_invalid(NoteField::Content)>"Content is required."</FieldMessage>
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="note-ttl" class="text-xs">"Expires after"</Label>
                            <Input
                                id="note-ttl"
                                placeholder="e.g. 30m, 12h, 7d, 2w (optional)"
                                bind_value=ttl
                                invalid=field_invalid(NoteField::Ttl)
                                class="h-8 text-sm"
                            />
                            <FieldMessage when=field_invalid(NoteField::Ttl)>
                                "Use a positive number followed by m, h, d or w."
                            </FieldMessage>
                        </div>

                        <div class="flex gap-2">
                            <Button size=ButtonSize::Sm attr:disabled=move || busy.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || busy.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    "Create"
                                </span>
                            </Button>
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Sm
                                on:click=on_cancel
                            >
                                "Cancel"
                            </Button>
                        </div>
                    </form>
                </CardContent>
            </Card>
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)
    }
}

pub struct NoteCreateView {
    frame: ViewFrame,
    form: NoteForm,
}

impl NoteCreateView {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            frame: ViewFrame::new(ViewId::NoteCreate),
            form: NoteForm::new(nav),
        }
    }
}

impl Component for NoteCreateView {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Created)?;
        self.form.create()
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Built)?;
        let mut body = Slot::default();
        self.form.build(&mut body)?;
        slot.attach(self.frame.render(body.into_nodes()));
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Initialized)?;
        self.form.init()
    }
}

impl View for NoteCreateView {
    fn id(&self) -> ViewId {
        self.frame.id()
    }

    fn show(&mut self, _payload: Payload) {
        self.frame.show();
    }

    fn hide(&mut self) {
        self.frame.hide();
    }

    fn is_visible(&self) -> bool {
        self.frame.is_visible()
    }
}
