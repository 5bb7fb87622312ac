//! Shared primitive IDs and collection-related enums.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Store-assigned game identifier.
pub type GameId = u64;
/// User rating; zero is a real rating, absence is modelled with `Option`.
pub type Rating = u32;

/// Genre assigned when the caller does not pick one.
pub const DEFAULT_GENRE: &str = "Action";

/// Play status of a tracked game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// On the backlog.
    #[default]
    #[serde(rename = "Want to Play")]
    WantToPlay,
    /// Currently being played.
    Playing,
    /// Finished.
    Completed,
    /// Dropped before finishing.
    Abandoned,
}

impl Status {
    /// Every status in display order.
    pub const ALL: [Status; 4] = [
        Status::WantToPlay,
        Status::Playing,
        Status::Completed,
        Status::Abandoned,
    ];

    /// Canonical text used on disk and by the front-end.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::WantToPlay => "Want to Play",
            Status::Playing => "Playing",
            Status::Completed => "Completed",
            Status::Abandoned => "Abandoned",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when text does not name a known [`Status`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Status filter accepted by listing queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only games with exactly this status.
    Only(Status),
}

impl StatusFilter {
    /// Returns true when `status` passes the filter.
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl From<Status> for StatusFilter {
    fn from(value: Status) -> Self {
        StatusFilter::Only(value)
    }
}

impl From<Option<Status>> for StatusFilter {
    fn from(value: Option<Status>) -> Self {
        value.map_or(StatusFilter::All, StatusFilter::Only)
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    /// Parses `"All"` (or an empty string) as [`StatusFilter::All`], anything else as a status.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "All" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}
