//! Game record, draft, patch, and snapshot types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_GENRE, GameId, Rating, Status};

/// Authoritative game record owned by the store.
///
/// Records are only created by the library's add path and only mutated through
/// [`Game::update`]; callers see [`GameSnapshot`] copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    title: String,
    platform: String,
    status: Status,
    rating: Option<Rating>,
    genre: String,
    review: Option<String>,
    date_added: NaiveDate,
    completion_date: Option<NaiveDate>,
}

impl Game {
    /// Materializes a fresh record from `draft`, added on `today`.
    ///
    /// The completion date starts absent whatever the initial status; only
    /// [`Game::update`] stamps it.
    pub(crate) fn create(id: GameId, draft: GameDraft, today: NaiveDate) -> Self {
        Self {
            id,
            title: draft.title,
            platform: draft.platform,
            status: draft.status,
            rating: None,
            genre: draft.genre,
            review: None,
            date_added: today,
            completion_date: None,
        }
    }

    /// Rebuilds a record from persisted fields without applying any lifecycle rules.
    pub(crate) fn restore(snapshot: GameSnapshot) -> Self {
        Self {
            id: snapshot.id,
            title: snapshot.title,
            platform: snapshot.platform,
            status: snapshot.status,
            rating: snapshot.rating,
            genre: snapshot.genre,
            review: snapshot.review,
            date_added: snapshot.date_added,
            completion_date: snapshot.completion_date,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Unique title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Platform text.
    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Current play status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Rating, if one was given.
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Genre text.
    pub fn genre(&self) -> &str {
        &self.genre
    }

    /// Review text, if any.
    pub fn review(&self) -> Option<&str> {
        self.review.as_deref()
    }

    /// Day the record was created.
    pub fn date_added(&self) -> NaiveDate {
        self.date_added
    }

    /// Day the game was marked completed.
    pub fn completion_date(&self) -> Option<NaiveDate> {
        self.completion_date
    }

    /// Applies every supplied field of `patch` in place.
    ///
    /// A supplied status recomputes the completion date: it is stamped with
    /// `today` when the game becomes completed and cleared for any other status.
    /// Re-supplying `Completed` keeps the original completion day.
    pub fn update(&mut self, patch: &GamePatch, today: NaiveDate) {
        if let Some(status) = patch.status {
            self.completion_date = match status {
                Status::Completed => match (self.status, self.completion_date) {
                    (Status::Completed, Some(day)) => Some(day),
                    _ => Some(today),
                },
                _ => None,
            };
            self.status = status;
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(review) = &patch.review {
            // An empty review is what an absent one reads back as.
            self.review = (!review.is_empty()).then(|| review.clone());
        }
    }

    /// Returns an independent copy of every field.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            id: self.id,
            title: self.title.clone(),
            platform: self.platform.clone(),
            status: self.status,
            rating: self.rating,
            genre: self.genre.clone(),
            review: self.review.clone(),
            date_added: self.date_added,
            completion_date: self.completion_date,
        }
    }
}

/// Plain copy of a [`Game`] handed to callers.
///
/// Dates serialize as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Stable identifier.
    pub id: GameId,
    /// Unique title.
    pub title: String,
    /// Platform text.
    pub platform: String,
    /// Play status.
    pub status: Status,
    /// Optional rating.
    pub rating: Option<Rating>,
    /// Genre text.
    pub genre: String,
    /// Optional review.
    pub review: Option<String>,
    /// Day the record was created.
    pub date_added: NaiveDate,
    /// Day the game was completed.
    pub completion_date: Option<NaiveDate>,
}

/// Insert payload used to create a new [`Game`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDraft {
    /// Title; must be non-empty and unique.
    pub title: String,
    /// Platform text.
    pub platform: String,
    /// Initial status.
    pub status: Status,
    /// Genre text.
    pub genre: String,
}

impl GameDraft {
    /// Draft with the default status and genre.
    pub fn new(title: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            status: Status::default(),
            genre: DEFAULT_GENRE.to_string(),
        }
    }

    /// Overrides the initial status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Overrides the genre.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }
}

/// Sparse patch where each `Some` field overwrites the record value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GamePatch {
    /// Optional replacement for status.
    pub status: Option<Status>,
    /// Optional replacement for rating; `Some(0)` is a real rating.
    pub rating: Option<Rating>,
    /// Optional replacement for genre.
    pub genre: Option<String>,
    /// Optional replacement for review; `Some("")` clears it.
    pub review: Option<String>,
}

impl GamePatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
