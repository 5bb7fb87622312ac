use thiserror::Error;

use crate::{
    game::Game,
    types::{GameId, Status},
};

use super::indices::{PositionIndex, TitleIndex};

/// In-memory store rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Title already present (exact, case-sensitive match).
    #[error("a game titled `{0}` already exists")]
    DuplicateTitle(String),
    /// Id already present.
    #[error("game id {0} is already taken")]
    IdTaken(GameId),
    /// No record with this id.
    #[error("no game with id {0}")]
    MissingGame(GameId),
}

/// Ordered set of games with id and title indices. Performs no I/O.
#[derive(Debug, Default)]
pub struct GameStore {
    games: Vec<Game>,
    pos: PositionIndex,
    by_title: TitleIndex,
    next_game_id: GameId,
}

impl GameStore {
    /// Empty store whose first id is 1.
    pub fn new() -> Self {
        Self {
            next_game_id: 1,
            ..Self::default()
        }
    }

    /// Builds a store from records in file order.
    ///
    /// Records that would break id or title uniqueness are left out and their
    /// errors returned alongside the store.
    pub fn from_games(games: impl IntoIterator<Item = Game>) -> (Self, Vec<StoreError>) {
        let mut store = Self::new();
        let mut rejected = Vec::new();
        for game in games {
            if let Err(err) = store.insert(game) {
                rejected.push(err);
            }
        }
        (store, rejected)
    }

    /// Appends `game`, enforcing id and title uniqueness.
    pub fn insert(&mut self, game: Game) -> Result<(), StoreError> {
        if self.pos.contains_key(&game.id()) {
            return Err(StoreError::IdTaken(game.id()));
        }
        self.check_title(game.title())?;

        let id = game.id();
        self.next_game_id = self.next_game_id.max(id.saturating_add(1));
        self.by_title.insert(game.title().to_string(), id);
        self.pos.insert(id, self.games.len());
        self.games.push(game);
        Ok(())
    }

    /// Fails when a game with exactly this title is present.
    pub fn check_title(&self, title: &str) -> Result<(), StoreError> {
        if self.by_title.contains_key(title) {
            return Err(StoreError::DuplicateTitle(title.to_string()));
        }
        Ok(())
    }

    /// Swaps in `game` for the record sharing its id. Titles are immutable, so
    /// the title index is untouched.
    pub fn replace(&mut self, game: Game) -> Result<(), StoreError> {
        let idx = *self
            .pos
            .get(&game.id())
            .ok_or(StoreError::MissingGame(game.id()))?;
        self.games[idx] = game;
        Ok(())
    }

    /// Borrows the record with `id`.
    pub fn get(&self, id: GameId) -> Option<&Game> {
        self.pos.get(&id).map(|idx| &self.games[*idx])
    }

    /// Clones the record with `id`.
    pub fn get_cloned(&self, id: GameId) -> Option<Game> {
        self.get(id).cloned()
    }

    /// Record with exactly this title.
    pub fn by_title(&self, title: &str) -> Option<&Game> {
        self.by_title.get(title).and_then(|id| self.get(*id))
    }

    /// Records with `status`, in insertion order.
    pub fn by_status(&self, status: Status) -> impl Iterator<Item = &Game> {
        self.games.iter().filter(move |g| g.status() == status)
    }

    /// All records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// One past the highest id ever inserted.
    pub fn next_id(&self) -> GameId {
        self.next_game_id
    }
}
