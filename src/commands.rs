// src/commands.rs

use crate::db::Store;
use crate::error::Result;
use crate::shell::Shell;
use log::debug;
use std::io::{BufRead, Write};

/// Write flow: collects a multi-line entry and stores it unless it is empty.
pub fn handle_write<R: BufRead, W: Write>(store: &Store, shell: &mut Shell<R, W>) -> Result<()> {
    shell.clear_screen()?;
    match shell.collect_entry_text()? {
        Some(content) => {
            store.insert(&content)?;
            shell.message("\n✅ Entry saved successfully!")?;
        }
        None => {
            debug!("empty entry, nothing stored");
            shell.message("\n⚠️ No content was entered.")?;
        }
    }
    shell.pause()
}

/// Read flow: shows every entry, newest first.
pub fn handle_read<R: BufRead, W: Write>(store: &Store, shell: &mut Shell<R, W>) -> Result<()> {
    shell.clear_screen()?;
    let entries = store.list_all()?;
    if let Some(newest) = entries.first() {
        debug!("listing {} entries, newest is #{}", entries.len(), newest.id);
        shell.render_heading("DIARY ENTRIES")?;
    }
    shell.render_entries(&entries, "No entries found in the diary.")?;
    shell.pause()
}

/// Search flow: a blank term is reported and never reaches the store.
pub fn handle_search<R: BufRead, W: Write>(store: &Store, shell: &mut Shell<R, W>) -> Result<()> {
    shell.clear_screen()?;
    let term = match shell.collect_search_term()? {
        Some(term) => term,
        None => {
            shell.message("No search term was given.")?;
            return shell.pause();
        }
    };

    let results = store.search(&term)?;

    shell.clear_screen()?;
    shell.render_heading(&format!("RESULTS FOR: '{}'", term))?;
    shell.render_entries(&results, "\nNo entries found with the given term.")?;
    shell.pause()
}
