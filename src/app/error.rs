use super::ViewFrame;
use crate::components::ui::{Alert, AlertDescription, AlertTitle};
use crate::lifecycle::{Component, LifecycleError, Phase, Slot};
use crate::views::{Payload, View, ViewId};
use leptos::prelude::*;

/// Terminal screen for failed backend calls.
///
/// The navigator ignores explicit navigation from here; following the link
/// starts a fresh URL resolution.
pub struct UnrecoverableErrorView {
    frame: ViewFrame,
    message: RwSignal<String>,
}

impl UnrecoverableErrorView {
    pub fn new() -> Self {
        Self {
            frame: ViewFrame::new(ViewId::UnrecoverableError),
            message: RwSignal::new(String::new()),
        }
    }
}

impl Default for UnrecoverableErrorView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for UnrecoverableErrorView {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Built)?;
        let message = self.message;
        let body = view! {
            <Alert class="border-destructive/30">
                <AlertTitle class="text-destructive">"Something went wrong"</AlertTitle>
                <AlertDescription class="text-destructive text-xs break-words">
                    {move || message.get()}
                </AlertDescription>
            </Alert>
            <a href="#/" class="mt-4 inline-block text-xs text-primary underline underline-offset-4">
                "Start over"
            </a>
        };
        slot.attach(self.frame.render(vec![body.into_any()]));
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.frame.enter(Phase::Initialized)
    }
}

impl View for UnrecoverableErrorView {
    fn id(&self) -> ViewId {
        self.frame.id()
    }

    fn show(&mut self, payload: Payload) {
        match payload {
            Payload::Message(message) => self.message.set(message),
            other => tracing::debug!(?other, "error view shown without a message"),
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
