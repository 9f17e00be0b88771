use std::path::PathBuf;
use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Recording Error: {0}")]
    RecordingError(#[from] RecordingError),
    #[error("Dataset Error: {0}")]
    DatasetError(#[from] DatasetError),
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// Live capture error type
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Failed to create output directory {1}: {0}")]
    CreateDirError(std::io::Error, PathBuf),
    #[error("Failed to write episode to {1}: {0}")]
    WriteError(std::io::Error, PathBuf),
    #[error("Failed to encode episode rows for {1}: {0}")]
    EncodeError(csv::Error, PathBuf),
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Missing input: {0}")]
    MissingInputFile(PathBuf),
    #[error("No source files with prefix '{1}' in {0}")]
    NoSourceFiles(PathBuf, String),
    #[error("Failed to read {1}: {0}")]
    ReadError(std::io::Error, PathBuf),
    #[error("Failed to write {1}: {0}")]
    WriteError(std::io::Error, PathBuf),
    #[error("Failed to parse {1}: {0}")]
    CsvError(csv::Error, PathBuf),
    #[error("{0} is missing required column '{1}'")]
    MissingColumn(PathBuf, &'static str),
}
