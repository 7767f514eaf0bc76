//! Error type for scenario loading

use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Underlying cause of error is JSON related
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The scenario's program could not be built
    #[error("invalid program: {0}")]
    ProgramError(#[from] crate::Error),

    /// Both an inline program and a source file were given
    #[error("scenario gives both `program` and `source`")]
    ConflictingProgram,

    /// Neither an inline program nor a source file was given
    #[error("scenario gives neither `program` nor `source`")]
    MissingProgram,

    /// Memory of the requested size cannot be allocated
    #[error("cannot allocate {0} bytes of memory")]
    MemorySize(usize),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::IoError(e) => e,
            _ => io::Error::new(io::ErrorKind::InvalidData, err.to_string()),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
