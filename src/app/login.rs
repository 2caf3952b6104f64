use super::ViewFrame;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription,
    CardHeader, CardTitle, FieldMessage, Input, Label, Spinner,
};
use crate::errors::Failure;
use crate::forms::{attempt_login, LoginAttempt, LoginField, LoginInput};
use crate::lifecycle::{Component, Lifecycle, LifecycleError, Phase, Slot};
use crate::nav::NavHandle;
use crate::views::{Payload, View, ViewId};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::request_animation_frame;

/// Credentials form; hands the outcome to the navigator.
pub struct LoginForm {
    lifecycle: Lifecycle,
    nav: NavHandle,
    login: RwSignal<String>,
    password: RwSignal<String>,
    invalid: RwSignal<Option<LoginField>>,
    errors: RwSignal<Option<String>>,
    busy: RwSignal<bool>,
    login_ref: NodeRef<html::Input>,
}

impl LoginForm {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            lifecycle: Lifecycle::new("login-form"),
            nav,
            login: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            invalid: RwSignal::new(None),
            errors: RwSignal::new(None),
            busy: RwSignal::new(false),
            login_ref: NodeRef::new(),
        }
    }

    fn clear(&self) {
        self.login.set(String::new());
        self.password.set(String::new());
        self.invalid.set(None);
        self.errors.set(None);
    }

    fn focus(&self) {
        let login_ref = self.login_ref;
        request_animation_frame(move || {
            if let Some(input) = login_ref.get_untracked() {
                let _ = input.focus();
            }
        });
    }
}

impl Component for LoginForm {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;

        let nav = self.nav;
        let (login, password) = (self.login, self.password);
        let (invalid, errors, busy) = (self.invalid, self.errors, self.busy);
        let login_ref = self.login_ref;

        let reset = move || {
            login.set(String::new());
            password.set(String::new());
            invalid.set(None);
            errors.set(None);
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
            errors.set(None);
            let input = LoginInput {
                login: login.get_untracked(),
                password: password.get_untracked(),
            };

            busy.set(true);
            spawn_local(async move {
                let attempt = attempt_login(&*backend, &input).await;
                busy.set(false);
                match attempt {
                    LoginAttempt::Invalid(field) => invalid.set(Some(field)),
                    LoginAttempt::Accepted(token) => {
                        reset();
                        nav.complete_login(token);
                    }
                    LoginAttempt::Rejected(message) => {
                        reset();
                        errors.set(Some(message));
                    }
                    LoginAttempt::Failed(cause) => nav.fail(Failure::Transport(cause)),
                }
            });
        };

        // Buttons inside the form submit by default.
        let on_cancel = move |ev: web_sys::MouseEvent| {
            ev.prevent_default();
            reset();
            nav.cancel_login();
        };

        let login_invalid = Signal::derive(move || invalid.get() == Some(LoginField::Login));
        let password_invalid = Signal::derive(move || invalid.get() == Some(LoginField::Password));

        slot.attach(view! {
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Log in"</CardTitle>
                    <CardDescription class="text-xs">"Creating and reading notes requires a session."</CardDescription>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="login" class="text-xs">"Login"</Label>
                            <Input
                                id="login"
                                bind_value=login
                                invalid=login_invalid
                                node_ref=login_ref
                                class="h-8 text-sm"
                            />
                            <FieldMessage when=login_invalid>"Login is required."</FieldMessage>
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password" class="text-xs">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                bind_value=password
                                invalid=password_invalid
                                class="h-8 text-sm"
                            />
                            <FieldMessage when=password_invalid>"Password is required."</FieldMessage>
                        </div>

                        <Show when=move || errors.get().is_some() fallback=|| ().into_view()>
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">
                                    {move || errors.get().unwrap_or_default()}
                                </AlertDescription>
                            </Alert>
                        </Show>

                        <div class="flex gap-2">
                            <Button size=ButtonSize::Sm attr:disabled=move || busy.get()>
                                <span class="inline-flex items-center gap-2">
                                    <Show when=move || busy.get() fallback=|| ().into_view()>
                                        <Spinner />
                                    </Show>
                                    "Log in"
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

pub struct LoginView {
    frame: ViewFrame,
    form: LoginForm,
}

impl LoginView {
    pub fn new(nav: NavHandle) -> Self {
        Self {
            frame: ViewFrame::new(ViewId::Login),
            form: LoginForm::new(nav),
        }
    }
}

impl Component for LoginView {
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

impl View for LoginView {
    fn id(&self) -> ViewId {
        self.frame.id()
    }

    fn show(&mut self, _payload: Payload) {
        self.form.clear();
        self.frame.show();
        self.form.focus();
    }

    fn hide(&mut self) {
        self.frame.hide();
    }

    fn is_visible(&self) -> bool {
        self.frame.is_visible()
    }
}
