//! File-backed collection store.
//!
//! [`GameLibrary`] owns the in-memory [`GameStore`] and a [`GameSink`], and
//! mirrors every mutation to the sink before committing it in memory. Callers
//! only ever receive [`GameSnapshot`] copies.

use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
    config::LibraryConfig,
    core::store::GameStore,
    error::{LibraryError, LibraryResult},
    game::{Game, GameDraft, GamePatch, GameSnapshot},
    persist::{GameSink, PersistError, csv_file::CsvGameFile},
    stats::LibraryStats,
    types::{GameId, Status, StatusFilter},
};

/// Source of "today" for date stamping.
pub type Clock = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Collection of tracked games synchronized with a backing file.
pub struct GameLibrary {
    store: GameStore,
    sink: Box<dyn GameSink>,
    clock: Clock,
}

impl GameLibrary {
    /// Opens the CSV file named by `config`.
    ///
    /// A missing file is not an error here: the library starts empty and the
    /// file is created by the first [`GameLibrary::add`].
    pub fn open(config: LibraryConfig) -> LibraryResult<Self> {
        let sink = CsvGameFile::new(config.path).with_atomic_rewrite(config.atomic_rewrite);
        Self::with_sink(Box::new(sink))
    }

    /// Opens a library over any sink, with the same missing-file handling as
    /// [`GameLibrary::open`].
    pub fn with_sink(sink: Box<dyn GameSink>) -> LibraryResult<Self> {
        let mut library = Self {
            store: GameStore::new(),
            sink,
            clock: local_today,
        };
        match library.reload() {
            Ok(_) => {}
            Err(LibraryError::FileMissing { path }) => {
                warn!(
                    path = %path.display(),
                    "backing file not found; starting with an empty library"
                );
            }
            Err(err) => return Err(err),
        }
        Ok(library)
    }

    /// Replaces the date source used for `date_added` and `completion_date`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Re-reads the backing file and replaces the in-memory set.
    ///
    /// Unlike [`GameLibrary::open`], a missing file fails with
    /// [`LibraryError::FileMissing`]. On any error the current state is kept.
    pub fn reload(&mut self) -> LibraryResult<usize> {
        let games = self.sink.load()?;
        let (store, rejected) = GameStore::from_games(games);
        for err in &rejected {
            warn!(path = %self.path().display(), error = %err, "skipping conflicting row");
        }
        self.store = store;
        info!(
            path = %self.path().display(),
            count = self.store.len(),
            next_id = self.store.next_id(),
            "loaded game library"
        );
        Ok(self.store.len())
    }

    /// Adds a game; `status` and `genre` fall back to their defaults.
    pub fn add(
        &mut self,
        title: &str,
        platform: &str,
        status: Option<Status>,
        genre: Option<&str>,
    ) -> LibraryResult<GameSnapshot> {
        let mut draft = GameDraft::new(title, platform);
        if let Some(status) = status {
            draft = draft.with_status(status);
        }
        if let Some(genre) = genre {
            draft = draft.with_genre(genre);
        }
        self.add_draft(draft)
    }

    /// Adds a game described by `draft`.
    ///
    /// The title must be non-blank and must not match an existing title
    /// exactly. Nothing is written when either check fails. The row is appended
    /// to the backing file before the game becomes visible in memory.
    pub fn add_draft(&mut self, draft: GameDraft) -> LibraryResult<GameSnapshot> {
        if draft.title.trim().is_empty() {
            return Err(LibraryError::InvalidTitle);
        }
        let id = self.next_id()?;
        self.store.check_title(&draft.title)?;

        let game = Game::create(id, draft, (self.clock)());
        self.sink.append(&game)?;
        let snapshot = game.snapshot();
        self.store.insert(game)?;
        debug!(id, title = %snapshot.title, "added game");
        Ok(snapshot)
    }

    /// Applies `patch` to the game with `id` and regenerates the backing file.
    ///
    /// The file is rebuilt from its current rows with this game's row
    /// substituted (or appended when the file no longer has it). If the write
    /// fails the in-memory record is left as it was.
    pub fn update(&mut self, id: GameId, patch: GamePatch) -> LibraryResult<GameSnapshot> {
        let mut game = self
            .store
            .get_cloned(id)
            .ok_or(LibraryError::NotFound(id))?;
        game.update(&patch, (self.clock)());

        let rows = match self.sink.load() {
            Ok(rows) => rows,
            Err(PersistError::Missing { path }) => {
                warn!(
                    path = %path.display(),
                    "backing file vanished; regenerating it from memory"
                );
                self.store.iter().cloned().collect()
            }
            Err(err) => return Err(err.into()),
        };
        self.sink.rewrite(&substitute(rows, &game))?;

        let snapshot = game.snapshot();
        self.store.replace(game)?;
        debug!(id, ?patch, "updated game");
        Ok(snapshot)
    }

    /// All games, or those whose status passes `filter`, in insertion order.
    pub fn get_all(&self, filter: impl Into<StatusFilter>) -> Vec<GameSnapshot> {
        let filter: StatusFilter = filter.into();
        match filter {
            StatusFilter::All => self.store.iter().map(Game::snapshot).collect(),
            StatusFilter::Only(status) => self.store.by_status(status).map(Game::snapshot).collect(),
        }
    }

    /// Games titled exactly `name`, or every game when no name is given.
    pub fn get_by_name(&self, name: Option<&str>) -> Vec<GameSnapshot> {
        match name.filter(|n| !n.is_empty()) {
            Some(name) => self.store.by_title(name).map(Game::snapshot).into_iter().collect(),
            None => self.get_all(StatusFilter::All),
        }
    }

    /// The game with `id`.
    pub fn get_by_id(&self, id: GameId) -> LibraryResult<GameSnapshot> {
        self.store
            .get(id)
            .map(Game::snapshot)
            .ok_or(LibraryError::NotFound(id))
    }

    /// Summary figures over every game.
    pub fn stats(&self) -> LibraryStats {
        LibraryStats::from_snapshots(&self.get_all(StatusFilter::All))
    }

    /// Id the next [`GameLibrary::add`] would assign.
    ///
    /// Derived from the backing file's rows so out-of-band edits are honoured,
    /// but never below the in-memory high-water mark.
    pub fn next_id(&self) -> LibraryResult<GameId> {
        let from_file = self.sink.scan_next_id()?;
        Ok(from_file.max(self.store.next_id()))
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when no games are tracked.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        self.sink.location()
    }
}

fn substitute(mut rows: Vec<Game>, updated: &Game) -> Vec<Game> {
    let mut found = false;
    for row in rows.iter_mut().filter(|row| row.id() == updated.id()) {
        *row = updated.clone();
        found = true;
    }
    if !found {
        rows.push(updated.clone());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).expect("date")
    }

    fn game(id: GameId, title: &str) -> Game {
        Game::create(id, GameDraft::new(title, "PC"), day(1))
    }

    #[test]
    fn substitute_replaces_matching_row() {
        let mut updated = game(2, "B");
        updated.update(
            &GamePatch {
                rating: Some(3),
                ..GamePatch::default()
            },
            day(2),
        );
        let rows = substitute(vec![game(1, "A"), game(2, "B"), game(3, "C")], &updated);
        let ids: Vec<_> = rows.iter().map(Game::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(rows[1].rating(), Some(3));
    }

    #[test]
    fn substitute_appends_missing_row() {
        let rows = substitute(vec![game(1, "A")], &game(5, "E"));
        let ids: Vec<_> = rows.iter().map(Game::id).collect();
        assert_eq!(ids, vec![1, 5]);
    }
}
