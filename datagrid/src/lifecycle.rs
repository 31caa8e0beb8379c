//! Two-phase initialization of a grid.
//!
//! `Constructed → AttachedPendingRender → Ready → Disconnected`, with
//! re-connection going back to `AttachedPendingRender`. The first render is
//! the only transition into `Ready`; attribute change hooks fire only there.

/// Lifecycle state of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    /// Options merged, nothing attached.
    #[default]
    Constructed,
    /// Plugins connected, waiting for the first render.
    AttachedPendingRender,
    /// First render done; change hooks are live.
    Ready,
    /// Detached; plugin instances kept for re-connection.
    Disconnected,
}

/// Tracks the lifecycle state and validates transitions.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: LifecycleState,
    /// Plugins are instantiated once per grid, on the first connect.
    plugins_created: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    /// Whether `<name>Changed` hooks should run.
    pub fn fires_change_hooks(&self) -> bool {
        self.is_ready()
    }

    pub fn plugins_created(&self) -> bool {
        self.plugins_created
    }

    pub fn mark_plugins_created(&mut self) {
        self.plugins_created = true;
    }

    /// Constructed/Disconnected → AttachedPendingRender.
    pub fn attach(&mut self) -> bool {
        match self.state {
            LifecycleState::Constructed | LifecycleState::Disconnected => {
                self.state = LifecycleState::AttachedPendingRender;
                true
            }
            other => {
                log::debug!("attach ignored in state {other:?}");
                false
            }
        }
    }

    /// AttachedPendingRender → Ready.
    pub fn complete_first_render(&mut self) -> bool {
        if self.state == LifecycleState::AttachedPendingRender {
            self.state = LifecycleState::Ready;
            true
        } else {
            log::debug!("first render ignored in state {:?}", self.state);
            false
        }
    }

    /// Any attached state → Disconnected.
    pub fn detach(&mut self) -> bool {
        match self.state {
            LifecycleState::AttachedPendingRender | LifecycleState::Ready => {
                self.state = LifecycleState::Disconnected;
                true
            }
            other => {
                log::debug!("detach ignored in state {other:?}");
                false
            }
        }
    }
}
