// src/utils/error.rs
#![allow(dead_code)]
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Malformed dataset module: {0}")]
    MalformedDataset(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
