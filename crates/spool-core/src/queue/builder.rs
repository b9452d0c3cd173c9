//! QueueBuilder - configure and wire a `PersistentQueue`.

use super::config::QueueConfig;
use super::engine::PersistentQueue;
use crate::error::SpoolError;
use crate::impls::TracingConsole;
use crate::ports::{Action, EventHandler, LineSink, StorageBackend};

/// Builds a `PersistentQueue`.
///
/// # Example
/// ```
/// use spool_core::domain::Item;
/// use spool_core::impls::MemoryStorage;
/// use spool_core::queue::QueueBuilder;
///
/// let mut queue = QueueBuilder::new(MemoryStorage::new())
///     .storage_name("requests")
///     .action(|item: &Item| !item.as_str().is_empty())
///     .build()
///     .unwrap();
/// queue.push(Item::new("GET /ping").unwrap());
/// queue.run();
/// queue.drive();
/// assert!(queue.is_empty());
/// ```
///
/// `build()` validates the configuration before touching storage, then
/// mounts the backend and loads the existing record.
pub struct QueueBuilder<S> {
    storage: S,
    config: QueueConfig,
    console: Option<Box<dyn LineSink>>,
    action: Option<Box<dyn Action>>,
    start_handlers: Vec<Box<dyn EventHandler>>,
    failed_handlers: Vec<Box<dyn EventHandler>>,
    success_handlers: Vec<Box<dyn EventHandler>>,
}

impl<S: StorageBackend> QueueBuilder<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: QueueConfig::default(),
            console: None,
            action: None,
            start_handlers: Vec::new(),
            failed_handlers: Vec::new(),
            success_handlers: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: QueueConfig) -> Self {
        self.config = config;
        self
    }

    pub fn storage_name(mut self, name: impl Into<String>) -> Self {
        self.config.storage_name = name.into();
        self
    }

    pub fn persist_on_clear(mut self, persist: bool) -> Self {
        self.config.persist_on_clear = persist;
        self
    }

    /// Sink for dumps and diagnostics. Defaults to `TracingConsole`.
    pub fn console(mut self, console: impl LineSink + 'static) -> Self {
        self.console = Some(Box::new(console));
        self
    }

    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    pub fn on_start(mut self, handler: impl EventHandler + 'static) -> Self {
        self.start_handlers.push(Box::new(handler));
        self
    }

    pub fn on_failed(mut self, handler: impl EventHandler + 'static) -> Self {
        self.failed_handlers.push(Box::new(handler));
        self
    }

    pub fn on_success(mut self, handler: impl EventHandler + 'static) -> Self {
        self.success_handlers.push(Box::new(handler));
        self
    }

    pub fn build(self) -> Result<PersistentQueue<S>, SpoolError> {
        self.config.validate()?;

        let console = self
            .console
            .unwrap_or_else(|| Box::new(TracingConsole));
        let mut queue = PersistentQueue::open(self.storage, self.config, console);

        if let Some(action) = self.action {
            queue.set_boxed_action(action);
        }
        for handler in self.start_handlers {
            queue.on_start_boxed(handler);
        }
        for handler in self.failed_handlers {
            queue.on_failed_boxed(handler);
        }
        for handler in self.success_handlers {
            queue.on_success_boxed(handler);
        }
        Ok(queue)
    }
}
