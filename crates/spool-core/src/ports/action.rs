//! Action port - what the queue runs per item, and what it notifies.

use crate::domain::Item;

/// The per-item action.
///
/// Returns `true` when the item was handled and may leave the queue,
/// `false` to stop the run with the item still at the head.
///
/// Any `FnMut(&Item) -> bool` is an action, so stateful handlers can be
/// plain closures or structs.
pub trait Action {
    fn execute(&mut self, item: &Item) -> bool;
}

impl<F> Action for F
where
    F: FnMut(&Item) -> bool,
{
    fn execute(&mut self, item: &Item) -> bool {
        self(item)
    }
}

/// A zero-argument listener for run events (started, failed, succeeded).
pub trait EventHandler {
    fn notify(&mut self);
}

impl<F> EventHandler for F
where
    F: FnMut(),
{
    fn notify(&mut self) {
        self()
    }
}
