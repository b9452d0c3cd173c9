//! Console implementations.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ports::LineSink;

/// Routes console lines into `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl LineSink for TracingConsole {
    fn print_line(&mut self, line: &str) {
        tracing::info!(target: "spool::console", "{line}");
    }
}

/// Prints console lines to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl LineSink for StdoutConsole {
    fn print_line(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Captures console lines; clones share the captured buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.borrow_mut())
    }
}

impl LineSink for MemoryConsole {
    fn print_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_console_clones_share_lines() {
        let console = MemoryConsole::new();
        let mut writer = console.clone();
        writer.print_line("one");
        writer.print_line("two");
        assert_eq!(console.lines(), vec!["one", "two"]);
        assert_eq!(console.take(), vec!["one", "two"]);
        assert!(console.lines().is_empty());
    }
}
