//! User-facing output.
//!
//! Components that talk to the user take a `&dyn Output` instead of printing,
//! so tests can inspect what was said without capturing stdout.

use std::cell::RefCell;
use std::io::IsTerminal;

const BOLD: &str = "\x1b[1m";
const BLUE: &str = "\x1b[94m";
const CYAN: &str = "\x1b[96m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const END: &str = "\x1b[0m";

/// Severity of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Header,
    Info,
    Success,
    Error,
    Hint,
    Plain,
}

/// Sink for messages meant for the user.
pub trait Output {
    fn emit(&self, level: Level, text: &str);

    fn header(&self, text: &str) {
        self.emit(Level::Header, text);
    }

    fn info(&self, text: &str) {
        self.emit(Level::Info, text);
    }

    fn success(&self, text: &str) {
        self.emit(Level::Success, text);
    }

    fn error(&self, text: &str) {
        self.emit(Level::Error, text);
    }

    /// Secondary guidance, e.g. how to answer a prompt
    fn hint(&self, text: &str) {
        self.emit(Level::Hint, text);
    }

    fn line(&self, text: &str) {
        self.emit(Level::Plain, text);
    }
}

/// Prints to stdout, coloured when stdout is a terminal
#[derive(Debug, Clone, Copy)]
pub struct ConsoleOutput {
    color: bool,
}

impl ConsoleOutput {
    pub fn new() -> Self {
        Self {
            color: std::io::stdout().is_terminal(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn render(&self, level: Level, text: &str) -> String {
        let (prefix, color) = match level {
            Level::Header => ("", Some(CYAN)),
            Level::Info => ("ℹ️  ", Some(BLUE)),
            Level::Success => ("✅ ", Some(GREEN)),
            Level::Error => ("❌ ", Some(RED)),
            Level::Hint => ("", Some(YELLOW)),
            Level::Plain => ("", None),
        };
        let body = match (self.color, color) {
            (true, Some(c)) if level == Level::Header => format!("{BOLD}{c}{prefix}{text}{END}"),
            (true, Some(c)) => format!("{c}{prefix}{text}{END}"),
            _ => format!("{prefix}{text}"),
        };
        if level == Level::Header {
            format!("\n{}\n", body)
        } else {
            body
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for ConsoleOutput {
    fn emit(&self, level: Level, text: &str) {
        println!("{}", self.render(level, text));
    }
}

/// Records messages in memory
#[derive(Debug, Default)]
pub struct MemoryOutput {
    messages: RefCell<Vec<(Level, String)>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.borrow().clone()
    }

    /// Messages at `level`, in order
    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// True if any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.borrow().iter().any(|(_, m)| m.contains(needle))
    }
}

impl Output for MemoryOutput {
    fn emit(&self, level: Level, text: &str) {
        self.messages.borrow_mut().push((level, text.to_string()));
    }
}
