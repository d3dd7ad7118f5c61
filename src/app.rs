// src/app.rs

use crate::commands;
use crate::db::Store;
use crate::error::Result;
use crate::shell::Shell;
use log::{debug, error, info};
use std::io::{BufRead, Write};
use std::path::Path;

/// Where the menu loop is. Every state but `Exiting` leads back to `MenuShown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    MenuShown,
    Writing,
    Reading,
    Searching,
    Exiting,
}

impl State {
    /// Maps a menu option to the state it selects.
    fn from_choice(choice: &str) -> Option<State> {
        match choice {
            "1" => Some(State::Writing),
            "2" => Some(State::Reading),
            "3" => Some(State::Searching),
            "4" => Some(State::Exiting),
            _ => None,
        }
    }
}

/// Opens the diary at `db_path`, runs the menu on `shell`, then closes the store.
///
/// The store is closed on every path out of the loop, errors included. If both
/// the loop and the close fail, the loop's error is returned and the close
/// failure is logged.
pub fn run_session<R: BufRead, W: Write>(db_path: &Path, mut shell: Shell<R, W>) -> Result<()> {
    let store = Store::open(db_path)?;
    info!("diary database ready at {}", db_path.display());

    let outcome = run(&store, &mut shell);

    if let Err(e) = store.close() {
        if outcome.is_ok() {
            return Err(e);
        }
        error!("failed to close diary database: {}", e);
    }
    info!("diary closed");
    outcome
}

/// Runs the menu until the user exits or input is closed.
///
/// The caller owns `store` and closes it after this returns, whatever the outcome.
pub fn run<R: BufRead, W: Write>(store: &Store, shell: &mut Shell<R, W>) -> Result<()> {
    let mut state = State::MenuShown;
    loop {
        state = match state {
            State::MenuShown => next_from_menu(shell)?,
            State::Writing => {
                commands::handle_write(store, shell)?;
                State::MenuShown
            }
            State::Reading => {
                commands::handle_read(store, shell)?;
                State::MenuShown
            }
            State::Searching => {
                commands::handle_search(store, shell)?;
                State::MenuShown
            }
            State::Exiting => return Ok(()),
        };
    }
}

fn next_from_menu<R: BufRead, W: Write>(shell: &mut Shell<R, W>) -> Result<State> {
    shell.clear_screen()?;
    shell.render_menu()?;

    let choice = match shell.read_menu_choice()? {
        Some(choice) => choice,
        None => {
            debug!("input closed at the menu, exiting");
            return Ok(State::Exiting);
        }
    };

    match State::from_choice(&choice) {
        Some(State::Exiting) => {
            shell.message("\nThank you for using the diary. See you soon!")?;
            Ok(State::Exiting)
        }
        Some(next) => Ok(next),
        None => {
            shell.message("\nInvalid option. Please try again.")?;
            shell.pause()?;
            Ok(State::MenuShown)
        }
    }
}
