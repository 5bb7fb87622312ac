//! Errors surfaced to callers of [`crate::library::GameLibrary`].

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::{core::store::StoreError, persist::PersistError, types::GameId};

/// Result alias returning [`LibraryError`] failures.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Failures of the collection operations.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The backing file is absent and the operation requires it.
    #[error("backing file `{}` not found", .path.display())]
    FileMissing {
        /// Location that was looked up.
        path: PathBuf,
    },
    /// A game with the same title is already tracked.
    #[error("a game titled `{title}` already exists")]
    DuplicateEntry {
        /// Offending title.
        title: String,
    },
    /// No game has this id.
    #[error("no game with id {0}")]
    NotFound(GameId),
    /// Titles must contain something other than whitespace.
    #[error("game title must not be empty")]
    InvalidTitle,
    /// Two records claimed the same id.
    #[error("game id {0} is already assigned")]
    IdConflict(GameId),
    /// A stored value could not be converted.
    #[error("malformed backing file, line {line}: invalid {field}: {message}")]
    Parse {
        /// 1-based line on which the row starts.
        line: usize,
        /// Column name.
        field: &'static str,
        /// What was wrong with the value.
        message: String,
    },
    /// Reading or writing the backing file failed.
    #[error("i/o error on `{}`", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl From<StoreError> for LibraryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateTitle(title) => Self::DuplicateEntry { title },
            StoreError::MissingGame(id) => Self::NotFound(id),
            StoreError::IdTaken(id) => Self::IdConflict(id),
        }
    }
}

impl From<PersistError> for LibraryError {
    fn from(value: PersistError) -> Self {
        match value {
            PersistError::Missing { path } => Self::FileMissing { path },
            PersistError::Io { path, source } => Self::Io { path, source },
            PersistError::Parse {
                line,
                field,
                message,
            } => Self::Parse {
                line,
                field,
                message,
            },
        }
    }
}
