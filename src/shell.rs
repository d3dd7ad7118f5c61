// src/shell.rs

use crate::error::{DiaryError, Result};
use crate::models::Entry;
use crossterm::{
    cursor::MoveTo,
    terminal::{Clear, ClearType},
};
use std::io::{self, BufRead, Write};

const MENU_RULE: &str = "========================================";
const SCREEN_WIDTH: usize = 50;

/// Line that ends a diary entry, compared ignoring case.
pub const END_MARKER: &str = "fim";

/// Console front end: reads user lines from `input` and draws on `output`.
///
/// Holds no diary state; the flows in `commands` decide what to ask and show.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Shell { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Reads one line without its line ending. `None` once input is closed.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf).map_err(DiaryError::Input)? == 0 {
            return Ok(None);
        }
        if buf.ends_with('\n') {
            buf.pop();
            if buf.ends_with('\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }

    // Every write to the console goes through here and is flushed.
    fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut W) -> io::Result<()>,
    {
        render(&mut self.output)
            .and_then(|()| self.output.flush())
            .map_err(DiaryError::Output)
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.draw(|out| write!(out, "{}", text))?;
        self.read_line()
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        self.draw(|out| crossterm::execute!(out, Clear(ClearType::All), MoveTo(0, 0)))
    }

    pub fn message(&mut self, text: &str) -> Result<()> {
        self.draw(|out| writeln!(out, "{}", text))
    }

    pub fn render_menu(&mut self) -> Result<()> {
        self.draw(|out| {
            writeln!(out)?;
            writeln!(out, "{}", MENU_RULE)?;
            writeln!(out, "{:^40}", "DIARY v2.0")?;
            writeln!(out, "{}", MENU_RULE)?;
            writeln!(out, "1. Write in the diary")?;
            writeln!(out, "2. Read previous entries")?;
            writeln!(out, "3. Search by term")?;
            writeln!(out, "4. Exit")?;
            writeln!(out, "{}", MENU_RULE)?;
            writeln!(out)
        })
    }

    /// Reads the chosen menu option, trimmed. `None` once input is closed.
    pub fn read_menu_choice(&mut self) -> Result<Option<String>> {
        let choice = self.prompt("Choose an option: ")?;
        Ok(choice.map(|c| c.trim().to_string()))
    }

    /// Collects lines until one equals [`END_MARKER`] (any case) or input ends.
    ///
    /// Returns the lines joined with `\n`, or `None` if nothing was typed
    /// before the marker.
    pub fn collect_entry_text(&mut self) -> Result<Option<String>> {
        self.draw(|out| {
            writeln!(
                out,
                "Write your entry (type '{}' on a new line to finish):\n",
                END_MARKER
            )
        })?;

        let mut lines = Vec::new();
        while let Some(line) = self.read_line()? {
            if line.eq_ignore_ascii_case(END_MARKER) {
                break;
            }
            lines.push(line);
        }

        if lines.is_empty() {
            Ok(None)
        } else {
            Ok(Some(lines.join("\n")))
        }
    }

    /// Reads a search term, trimmed and lower-cased. `None` if it is blank.
    pub fn collect_search_term(&mut self) -> Result<Option<String>> {
        let term = self
            .prompt("Enter the term to search for: ")?
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty());
        Ok(term)
    }

    pub fn render_heading(&mut self, title: &str) -> Result<()> {
        self.draw(|out| {
            writeln!(out, "{:^width$}", title, width = SCREEN_WIDTH)?;
            writeln!(out, "{}", "=".repeat(SCREEN_WIDTH))
        })
    }

    /// Prints one dated block per entry in the given order, or `when_empty`.
    pub fn render_entries(&mut self, entries: &[Entry], when_empty: &str) -> Result<()> {
        if entries.is_empty() {
            return self.message(when_empty);
        }
        self.draw(|out| {
            for entry in entries {
                writeln!(out, "\n📅 {}", entry.timestamp)?;
                writeln!(out, "{}", "-".repeat(SCREEN_WIDTH))?;
                writeln!(out, "{}", entry.content)?;
                writeln!(out, "{}", "=".repeat(SCREEN_WIDTH))?;
            }
            Ok(())
        })
    }

    pub fn pause(&mut self) -> Result<()> {
        self.draw(|out| write!(out, "\nPress Enter to continue..."))?;
        self.read_line()?;
        Ok(())
    }
}
