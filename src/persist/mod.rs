//! Persistence abstraction and the CSV backing file.

/// CSV codec and file-backed [`GameSink`].
pub mod csv_file;

use std::{io, path::Path, path::PathBuf};

use thiserror::Error;

use crate::{game::Game, types::GameId};

/// Failures reading or writing the backing file.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The backing file does not exist.
    #[error("backing file `{}` not found", .path.display())]
    Missing {
        /// Location that was looked up.
        path: PathBuf,
    },
    /// Any other I/O failure.
    #[error("i/o error on `{}`", .path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A row with a valid id carried a value that could not be converted.
    #[error("line {line}: invalid {field}: {message}")]
    Parse {
        /// 1-based line on which the offending row starts.
        line: usize,
        /// Column name.
        field: &'static str,
        /// What was wrong with the value.
        message: String,
    },
}

impl PersistError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::Missing {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable home of the collection.
pub trait GameSink {
    /// Where the records live, for diagnostics.
    fn location(&self) -> &Path;

    /// Reads every well-formed record in stored order.
    fn load(&self) -> PersistResult<Vec<Game>>;

    /// Appends one record.
    fn append(&mut self, game: &Game) -> PersistResult<()>;

    /// Replaces the stored contents with `games`.
    fn rewrite(&mut self, games: &[Game]) -> PersistResult<()>;

    /// Derives the next free id from the stored records: one past the highest
    /// id, or 1 when nothing usable is stored.
    fn scan_next_id(&self) -> PersistResult<GameId> {
        let games = match self.load() {
            Ok(games) => games,
            Err(PersistError::Missing { .. }) => return Ok(1),
            Err(err) => return Err(err),
        };
        Ok(games
            .iter()
            .map(Game::id)
            .max()
            .map_or(1, |max| max.saturating_add(1)))
    }
}
