use std::cell::Cell;
use std::rc::Rc;

use crate::domain::RunState;

/// Shared handle onto a queue's run flag.
///
/// Actions and event handlers cannot borrow the queue while it is driving,
/// so they arm and disarm it through a clone of this handle instead.
/// Cancellation is observed before the next item, never mid-action.
#[derive(Debug, Clone, Default)]
pub struct RunControl {
    state: Rc<Cell<RunState>>,
}

impl RunControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&self) {
        self.state.set(RunState::Running);
    }

    pub fn cancel(&self) {
        self.state.set(RunState::Idle);
    }

    pub fn state(&self) -> RunState {
        self.state.get()
    }

    pub fn is_armed(&self) -> bool {
        self.state.get().is_armed()
    }

    pub(crate) fn finish(&self, state: RunState) {
        debug_assert!(!state.is_armed());
        self.state.set(state);
    }
}
