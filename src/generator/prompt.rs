//! Prompt primitives for the interactive generator.

use crate::output::Output;
use anyhow::{anyhow, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::BufRead;

/// Where answers come from
pub trait LineSource {
    /// Show `prompt` and read one line without its terminator.
    /// `Ok(None)` means the input is closed.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Terminal input with line editing
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Any buffered reader, e.g. piped stdin or a test script. Prompts are not echoed.
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// Checks an answer; `Err` carries the message shown before asking again
pub type Validator<'v> = &'v dyn Fn(&str) -> Result<(), String>;

/// Asks questions through a [`LineSource`] and reports problems through an [`Output`]
pub struct Prompter<'a> {
    source: &'a mut dyn LineSource,
    out: &'a dyn Output,
}

impl<'a> Prompter<'a> {
    pub fn new(source: &'a mut dyn LineSource, out: &'a dyn Output) -> Self {
        Self { source, out }
    }

    fn next_line(&mut self, prompt: &str) -> Result<String> {
        self.source
            .read_line(prompt)?
            .ok_or_else(|| anyhow!("input closed"))
    }

    /// Single-line answer. Empty input takes `default` when one is given.
    pub fn input(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validator: Option<Validator<'_>>,
    ) -> Result<String> {
        let prompt = match default {
            Some(d) => format!("{} [{}]: ", prompt, d),
            None => format!("{}: ", prompt),
        };

        loop {
            let mut value = self.next_line(&prompt)?.trim().to_string();
            if value.is_empty() {
                if let Some(d) = default {
                    value = d.to_string();
                }
            }

            if let Some(check) = validator {
                if let Err(msg) = check(&value) {
                    self.out.error(&msg);
                    continue;
                }
            }
            return Ok(value);
        }
    }

    fn list_options(&self, options: &[&str]) {
        for (i, option) in options.iter().enumerate() {
            self.out.line(&format!("  {}. {}", i + 1, option));
        }
    }

    /// One option, returned as a zero-based index
    pub fn choice(&mut self, prompt: &str, options: &[&str]) -> Result<usize> {
        self.out.line("");
        self.out.line(prompt);
        self.list_options(options);

        let ask = format!("Choose [1-{}]: ", options.len());
        loop {
            let line = self.next_line(&ask)?;
            if let Ok(n) = line.trim().parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(n - 1);
                }
            }
            self.out.error(&format!(
                "Please enter a number between 1 and {}",
                options.len()
            ));
        }
    }

    /// Zero or more options as zero-based indices, in the order given, without repeats
    pub fn multichoice(&mut self, prompt: &str, options: &[&str]) -> Result<Vec<usize>> {
        self.out.line("");
        self.out.line(prompt);
        self.out
            .hint("(Enter numbers separated by commas, e.g., 1,3,4)");
        self.list_options(options);

        loop {
            let line = self.next_line("Select: ")?;
            let line = line.trim();
            if line.is_empty() {
                return Ok(Vec::new());
            }
            if let Some(picked) = parse_selection(line, options.len()) {
                return Ok(picked);
            }
            self.out
                .error("Please enter valid numbers separated by commas");
        }
    }
}

fn parse_selection(line: &str, count: usize) -> Option<Vec<usize>> {
    let mut picked = Vec::new();
    for part in line.split(',') {
        let n: usize = part.trim().parse().ok()?;
        if n == 0 || n > count {
            return None;
        }
        if !picked.contains(&(n - 1)) {
            picked.push(n - 1);
        }
    }
    Some(picked)
}
