//! The persistent queue engine.

use std::collections::VecDeque;

use super::config::QueueConfig;
use super::control::RunControl;
use crate::domain::{DriveReport, Item, QueueStatus, RunState};
use crate::impls::TracingConsole;
use crate::mirror::DurableMirror;
use crate::ports::{Action, EventHandler, LineSink, StorageBackend};

/// A FIFO of items mirrored to durable storage, processed on demand.
///
/// Design:
/// - The in-memory queue is authoritative; every mutation rewrites the
///   durable record before returning (except `clear`, see `QueueConfig`).
/// - `run()` only arms the queue. Work happens in `drive()`, which the host
///   calls from its own tick.
/// - Storage failures never reach the caller. They are logged and printed on
///   the console, and the queue keeps working from memory.
pub struct PersistentQueue<S: StorageBackend> {
    items: VecDeque<Item>,
    control: RunControl,
    mirror: DurableMirror<S>,
    action: Option<Box<dyn Action>>,
    start_handlers: Vec<Box<dyn EventHandler>>,
    failed_handlers: Vec<Box<dyn EventHandler>>,
    success_handlers: Vec<Box<dyn EventHandler>>,
    console: Box<dyn LineSink>,
    persist_on_clear: bool,
}

impl<S: StorageBackend> PersistentQueue<S> {
    /// Mount `storage` and load the record under the default name.
    pub fn new(storage: S) -> Self {
        Self::open(storage, QueueConfig::default(), Box::new(TracingConsole))
    }

    /// Mount, then load whatever an earlier run left behind.
    ///
    /// `config` must already be validated.
    pub(crate) fn open(storage: S, config: QueueConfig, console: Box<dyn LineSink>) -> Self {
        let mut queue = Self {
            items: VecDeque::new(),
            control: RunControl::new(),
            mirror: DurableMirror::new(storage, config.storage_name),
            action: None,
            start_handlers: Vec::new(),
            failed_handlers: Vec::new(),
            success_handlers: Vec::new(),
            console,
            persist_on_clear: config.persist_on_clear,
        };

        if let Err(e) = queue.mirror.mount() {
            queue.diagnostic(&format!("storage mount failed: {e}"));
        }
        queue.items = queue.mirror.load().into();
        tracing::debug!(storage = %queue.mirror.name(), len = queue.items.len(), "queue loaded");
        queue
    }

    // ------------------------------------------------------------------
    // queue manipulation
    // ------------------------------------------------------------------

    /// Append `item` at the tail and persist.
    pub fn push(&mut self, item: Item) {
        self.items.push_back(item);
        self.persist();
    }

    /// Remove the most recently pushed item (the tail, not the head) and
    /// persist.
    pub fn pop(&mut self) -> Option<Item> {
        let popped = self.items.pop_back();
        self.persist();
        popped
    }

    /// Empty the in-memory queue. The record is only rewritten when
    /// `persist_on_clear` is set; otherwise call `save()`.
    pub fn clear(&mut self) {
        self.items.clear();
        if self.persist_on_clear {
            self.persist();
        }
    }

    /// Rewrite the durable record from memory.
    pub fn save(&mut self) {
        self.persist();
    }

    /// Replace the in-memory queue with the durable record.
    pub fn reload(&mut self) {
        self.items = self.mirror.load().into();
    }

    // ------------------------------------------------------------------
    // run control
    // ------------------------------------------------------------------

    /// Arm the queue; the next `drive()` processes it.
    pub fn run(&mut self) {
        self.control.run();
    }

    /// Disarm the queue. A drive in progress stops before its next item.
    pub fn cancel(&mut self) {
        self.control.cancel();
    }

    /// A handle for arming/cancelling from inside actions and handlers.
    pub fn control(&self) -> RunControl {
        self.control.clone()
    }

    /// Process the queue if armed.
    ///
    /// Runs head-first until the queue is empty, the action fails, or the
    /// queue is cancelled. Each handled item is removed and persisted before
    /// the next one starts, so a reset never re-runs it. A failed item stays
    /// at the head for the next `run()`.
    pub fn drive(&mut self) -> DriveReport {
        if !self.control.is_armed() {
            return DriveReport::Idle;
        }

        fire(&mut self.start_handlers);

        let mut processed = 0;
        while let Some(head) = self.items.front() {
            if !self.control.is_armed() {
                tracing::debug!(storage = %self.mirror.name(), processed, "run cancelled");
                return DriveReport::Cancelled { processed };
            }

            let handled = match self.action.as_mut() {
                Some(action) => action.execute(head),
                None => {
                    tracing::warn!(storage = %self.mirror.name(), "no action set, stopping run");
                    false
                }
            };

            if !handled {
                let item = head.clone();
                tracing::info!(storage = %self.mirror.name(), %item, processed, "item failed, run stopped");
                fire(&mut self.failed_handlers);
                self.control.finish(RunState::Failed);
                return DriveReport::Failed { processed, item };
            }

            self.items.pop_front();
            processed += 1;
            self.persist();
        }

        tracing::info!(storage = %self.mirror.name(), processed, "queue drained");
        fire(&mut self.success_handlers);
        self.control.finish(RunState::Succeeded);
        DriveReport::Completed { processed }
    }

    // ------------------------------------------------------------------
    // actions and events
    // ------------------------------------------------------------------

    /// Replace the per-item action.
    pub fn set_action(&mut self, action: impl Action + 'static) {
        self.action = Some(Box::new(action));
    }

    /// Run the action on `item` directly. The queue is not touched.
    pub fn run_action(&mut self, item: &Item) -> bool {
        match self.action.as_mut() {
            Some(action) => action.execute(item),
            None => {
                tracing::warn!(%item, "run_action called without an action");
                false
            }
        }
    }

    pub fn on_start(&mut self, handler: impl EventHandler + 'static) {
        self.start_handlers.push(Box::new(handler));
    }

    pub fn on_failed(&mut self, handler: impl EventHandler + 'static) {
        self.failed_handlers.push(Box::new(handler));
    }

    pub fn on_success(&mut self, handler: impl EventHandler + 'static) {
        self.success_handlers.push(Box::new(handler));
    }

    pub(crate) fn set_boxed_action(&mut self, action: Box<dyn Action>) {
        self.action = Some(action);
    }

    pub(crate) fn on_start_boxed(&mut self, handler: Box<dyn EventHandler>) {
        self.start_handlers.push(handler);
    }

    pub(crate) fn on_failed_boxed(&mut self, handler: Box<dyn EventHandler>) {
        self.failed_handlers.push(handler);
    }

    pub(crate) fn on_success_boxed(&mut self, handler: Box<dyn EventHandler>) {
        self.success_handlers.push(handler);
    }

    // ------------------------------------------------------------------
    // inspection
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn front(&self) -> Option<&Item> {
        self.items.front()
    }

    pub fn state(&self) -> RunState {
        self.control.state()
    }

    pub fn is_armed(&self) -> bool {
        self.control.is_armed()
    }

    pub fn storage_name(&self) -> &str {
        self.mirror.name()
    }

    pub fn storage(&self) -> &S {
        self.mirror.backend()
    }

    pub fn status(&self) -> QueueStatus {
        QueueStatus {
            storage_name: self.mirror.name().to_string(),
            state: self.state(),
            len: self.items.len(),
            items: self.items.iter().cloned().collect(),
        }
    }

    /// Print every item, head first, on the queue's console.
    pub fn dump_to_console(&mut self) {
        for item in &self.items {
            self.console.print_line(item.as_str());
        }
    }

    /// Print every item, head first, on `sink`.
    pub fn dump_to(&self, sink: &mut dyn LineSink) {
        for item in &self.items {
            sink.print_line(item.as_str());
        }
    }

    /// Unmount the backend and hand it back.
    pub fn into_storage(mut self) -> S {
        self.mirror.unmount();
        self.mirror.into_backend()
    }

    fn persist(&mut self) {
        if let Err(e) = self.mirror.save(&self.items) {
            self.diagnostic(&format!("queue save failed: {e}"));
        }
    }

    fn diagnostic(&mut self, message: &str) {
        tracing::warn!(storage = %self.mirror.name(), "{message}");
        self.console.print_line(&format!("[WARN] {message}"));
    }
}

fn fire(handlers: &mut [Box<dyn EventHandler>]) {
    for handler in handlers.iter_mut() {
        handler.notify();
    }
}
