//! Structured error types for the storage engine and the REPL front-end.
use std::io;
use thiserror::Error;

/// Errors raised by the pager while mapping page numbers to page buffers.
///
/// Every variant here is fatal: the pager has no recovery path, so the
/// caller prints the `Display` message and terminates the process.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("Db file is not a whole number of pages. Corrupt file.")]
    CorruptFileLength,
    #[error("Tried to fetch page number out of bounds. {page_num} > {max_pages}")]
    PageOutOfBounds { page_num: u32, max_pages: u32 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors raised while turning REPL input into a `Statement`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    SyntaxError,
    #[error("String is too long.")]
    StringTooLong,
    #[error("ID must be positive.")]
    InvalidId,
    #[error("Unrecognized command '{0}'.")]
    UnrecognizedCommand(String),
}

/// Errors raised while executing an already-prepared statement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("Error: Duplicate key.")]
    DuplicateKey,
}
