//! Rule Document Sink
//!
//! Encodes rule documents in the arbiter's JSON layout and persists them.

mod codec;
mod file;

pub use codec::{from_json, to_json};
pub use file::FileSink;

use rule_engine::RuleError;
use thiserror::Error;

/// Sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Refusing to write malformed rule document: {0}")]
    InvalidDocument(#[from] RuleError),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("I/O error on {path}: {message}")]
    IoError { path: String, message: String },
}
