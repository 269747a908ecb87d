use std::path::PathBuf;

use gcicon_core::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read ROM {path}: {source}")]
    ReadRom {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("failed to create {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error writing PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

impl CliError {
    /// Process exit code; a ROM without an icon gets its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Decode(DecodeError::NoIconPresent) => 2,
            _ => 1,
        }
    }
}
