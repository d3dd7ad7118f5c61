// src/main.rs

mod app;
mod cli;
mod commands;
mod db;
mod error;
mod models;
mod shell;

use clap::Parser;
use cli::Cli;
use error::Result;
use log::error;
use shell::Shell;
use std::io;
use std::process;

fn main() {
    Cli::parse();

    // Default to warnings only so logs stay out of the menu; RUST_LOG overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let db_path = db::get_db_path()?;
    let shell = Shell::new(io::stdin().lock(), io::stdout().lock());
    app::run_session(&db_path, shell)
}
