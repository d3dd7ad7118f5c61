// src/error.rs

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiaryError {
    #[error("Failed to read console input: {0}")]
    Input(#[source] io::Error),

    #[error("Failed to write to the console: {0}")]
    Output(#[source] io::Error),

    #[error("Could not create database directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Database Error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Home directory not found")]
    HomeDirNotFound,
}

pub type Result<T> = std::result::Result<T, DiaryError>;
