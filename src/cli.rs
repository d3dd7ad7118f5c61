// src/cli.rs

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "diary - A personal journal for the command line",
    long_about = "diary keeps timestamped text entries in a local SQLite file (~/.config/diary/diary.db). Run it without arguments to open the interactive menu: write new entries, read them newest first, or search them by term."
)]
pub struct Cli {}
