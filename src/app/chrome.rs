use crate::lifecycle::{Component, Lifecycle, LifecycleError, Phase, Slot};
use leptos::prelude::*;

pub struct TopTitle {
    lifecycle: Lifecycle,
}

impl TopTitle {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new("top-title"),
        }
    }
}

impl Default for TopTitle {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TopTitle {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;
        slot.attach(view! {
            <a href="#/" class="text-sm font-semibold tracking-tight text-foreground">
                "nordnotes"
            </a>
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)
    }
}

/// Page header; owns the top title.
pub struct Header {
    lifecycle: Lifecycle,
    title: TopTitle,
}

impl Header {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new("header"),
            title: TopTitle::new(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)?;
        self.title.create()
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;
        let mut container = Slot::default();
        self.title.build(&mut container)?;
        slot.attach(view! {
            <header class="border-b">
                <div class="mx-auto flex h-12 w-full max-w-2xl items-center px-4">
                    {container.into_nodes()}
                </div>
            </header>
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)?;
        self.title.init()
    }
}

pub struct Footer {
    lifecycle: Lifecycle,
}

impl Footer {
    pub fn new() -> Self {
        Self {
            lifecycle: Lifecycle::new("footer"),
        }
    }
}

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Footer {
    fn create(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Created)
    }

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Built)?;
        slot.attach(view! {
            <footer class="border-t py-4 text-center text-xs text-muted-foreground">
                "nordnotes · notes that expire"
            </footer>
        });
        Ok(())
    }

    fn init(&mut self) -> Result<(), LifecycleError> {
        self.lifecycle.enter(Phase::Initialized)
    }
}
