//! Three-phase lifecycle shared by every visual unit.
//!
//! A unit goes through `create` (instantiate children), `build` (render its
//! subtree into the parent's [`Slot`]) and `init` (wire behavior, first data
//! load), each exactly once and in that order. Composite units drive their
//! children through the same phases from inside their own.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    #[default]
    New,
    Created,
    Built,
    Initialized,
}

impl Phase {
    fn successor(self) -> Option<Phase> {
        match self {
            Phase::New => Some(Phase::Created),
            Phase::Created => Some(Phase::Built),
            Phase::Built => Some(Phase::Initialized),
            Phase::Initialized => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("{unit}: cannot enter {requested:?} from {current:?}")]
    OutOfOrder {
        unit: &'static str,
        requested: Phase,
        current: Phase,
    },
}

/// Phase guard embedded by each unit.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    unit: &'static str,
    phase: Phase,
}

impl Lifecycle {
    pub const fn new(unit: &'static str) -> Self {
        Self {
            unit,
            phase: Phase::New,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase == Phase::Initialized
    }

    /// Moves to `next`, which must directly follow the current phase.
    pub fn enter(&mut self, next: Phase) -> Result<(), LifecycleError> {
        if self.phase.successor() != Some(next) {
            return Err(LifecycleError::OutOfOrder {
                unit: self.unit,
                requested: next,
                current: self.phase,
            });
        }
        self.phase = next;
        Ok(())
    }
}

/// Container a parent hands to a child during `build`.
#[derive(Default)]
pub struct Slot {
    nodes: Vec<AnyView>,
}

impl Slot {
    pub fn attach(&mut self, node: impl IntoAny) {
        self.nodes.push(node.into_any());
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_nodes(self) -> Vec<AnyView> {
        self.nodes
    }
}

pub trait Component {
    fn create(&mut self) -> Result<(), LifecycleError>;

    fn build(&mut self, slot: &mut Slot) -> Result<(), LifecycleError>;

    fn init(&mut self) -> Result<(), LifecycleError>;
}

/// Runs all three phases on a freshly constructed unit.
pub fn mount(unit: &mut dyn Component, slot: &mut Slot) -> Result<(), LifecycleError> {
    unit.create()?;
    unit.build(slot)?;
    unit.init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_in_order() {
        let mut l = Lifecycle::new("unit");
        assert_eq!(l.phase(), Phase::New);
        l.enter(Phase::Created).expect("create");
        l.enter(Phase::Built).expect("build");
        l.enter(Phase::Initialized).expect("init");
        assert!(l.is_initialized());
    }

    #[test]
    fn test_build_before_create_is_rejected() {
        let mut l = Lifecycle::new("unit");
        assert_eq!(
            l.enter(Phase::Built),
            Err(LifecycleError::OutOfOrder {
                unit: "unit",
                requested: Phase::Built,
                current: Phase::New,
            })
        );
        // A rejected transition leaves the phase untouched.
        assert_eq!(l.phase(), Phase::New);
    }

    #[test]
    fn test_init_before_build_is_rejected() {
        let mut l = Lifecycle::new("unit");
        l.enter(Phase::Created).expect("create");
        assert!(l.enter(Phase::Initialized).is_err());
    }

    #[test]
    fn test_phase_runs_once() {
        let mut l = Lifecycle::new("unit");
        l.enter(Phase::Created).expect("create");
        assert!(l.enter(Phase::Created).is_err());

        l.enter(Phase::Built).expect("build");
        l.enter(Phase::Initialized).expect("init");
        assert!(l.enter(Phase::Initialized).is_err());
    }

    struct Parent {
        lifecycle: Lifecycle,
        child: Option<Child>,
        log: Vec<&'static str>,
    }

    struct Child {
        lifecycle: Lifecycle,
    }

    impl Component for Parent {
        fn create(&mut self) -> Result<(), LifecycleError> {
            self.lifecycle.enter(Phase::Created)?;
            let mut child = Child {
                lifecycle: Lifecycle::new("child"),
            };
            child.lifecycle.enter(Phase::Created)?;
            self.child = Some(child);
            self.log.push("parent.create");
            Ok(())
        }

        fn build(&mut self, _slot: &mut Slot) -> Result<(), LifecycleError> {
            self.lifecycle.enter(Phase::Built)?;
            if let Some(child) = self.child.as_mut() {
                child.lifecycle.enter(Phase::Built)?;
            }
            self.log.push("parent.build");
            Ok(())
        }

        fn init(&mut self) -> Result<(), LifecycleError> {
            self.lifecycle.enter(Phase::Initialized)?;
            if let Some(child) = self.child.as_mut() {
                child.lifecycle.enter(Phase::Initialized)?;
            }
            self.log.push("parent.init");
            Ok(())
        }
    }

    #[test]
    fn test_mount_drives_composite() {
        let mut parent = Parent {
            lifecycle: Lifecycle::new("parent"),
            child: None,
            log: vec![],
        };
        let mut slot = Slot::default();
        mount(&mut parent, &mut slot).expect("mount");

        assert_eq!(parent.log, vec!["parent.create", "parent.build", "parent.init"]);
        assert!(parent.child.as_ref().is_some_and(|c| c.lifecycle.is_initialized()));
        assert!(slot.is_empty());

        // Mounting twice is a lifecycle violation.
        assert!(mount(&mut parent, &mut slot).is_err());
    }
}
