//! Visibility and GPU-init bookkeeping for a view whose GPU resources only
//! exist while it is shown.
//!
//! Initialising the GPU is asynchronous on the web, so a view may be hidden
//! (or hidden and shown again) before an init completes. Every show starts a
//! new epoch; an init finishing under a stale epoch must be dropped.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// No animation loop and no GPU state.
    Stopped,
    /// GPU init requested, loop not started yet.
    Initializing,
    Running,
}

#[derive(Clone, Debug)]
pub struct ViewLifecycle {
    visible: bool,
    state: LoopState,
    epoch: u64,
}

impl ViewLifecycle {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            state: LoopState::Stopped,
            epoch: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Mark the view shown. Returns the epoch a new GPU init must report
    /// back with, or `None` when one is already pending or running.
    pub fn show(&mut self) -> Option<u64> {
        self.visible = true;
        match self.state {
            LoopState::Stopped => {
                self.epoch += 1;
                self.state = LoopState::Initializing;
                Some(self.epoch)
            }
            LoopState::Initializing | LoopState::Running => None,
        }
    }

    /// Mark the view hidden. Returns true when a running loop must be cancelled.
    pub fn hide(&mut self) -> bool {
        self.visible = false;
        let was_running = self.state == LoopState::Running;
        self.state = LoopState::Stopped;
        self.epoch += 1;
        was_running
    }

    /// GPU init for `epoch` completed; true when the loop should start now.
    pub fn init_finished(&mut self, epoch: u64) -> bool {
        if self.state == LoopState::Initializing && epoch == self.epoch {
            self.state = LoopState::Running;
            true
        } else {
            false
        }
    }

    /// GPU init for `epoch` failed; a later show may try again.
    pub fn init_failed(&mut self, epoch: u64) {
        if self.state == LoopState::Initializing && epoch == self.epoch {
            self.state = LoopState::Stopped;
        }
    }
}

impl Default for ViewLifecycle {
    fn default() -> Self {
        Self::hidden()
    }
}
