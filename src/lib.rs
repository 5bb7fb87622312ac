//! Personal game collection tracking backed by a flat CSV file.
//!
//! # Examples
//!
//! ```
//! use gamelog::{
//!     config::LibraryConfig,
//!     error::LibraryError,
//!     game::GamePatch,
//!     library::GameLibrary,
//!     types::{Status, StatusFilter},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let mut library = GameLibrary::open(LibraryConfig::new(dir.path().join("games.csv")))?;
//!
//! let zelda = library.add("Zelda", "Switch", None, None)?;
//! assert_eq!(zelda.id, 1);
//! assert_eq!(zelda.status, Status::WantToPlay);
//! assert!(matches!(
//!     library.add("Zelda", "Switch", None, None),
//!     Err(LibraryError::DuplicateEntry { .. })
//! ));
//!
//! let done = library.update(
//!     zelda.id,
//!     GamePatch {
//!         status: Some(Status::Completed),
//!         rating: Some(5),
//!         ..GamePatch::default()
//!     },
//! )?;
//! assert!(done.completion_date.is_some());
//! assert_eq!(library.get_all(StatusFilter::Only(Status::Completed)).len(), 1);
//! # Ok(())
//! # }
//! ```
#![warn(missing_docs)]

/// Library configuration.
pub mod config;
/// Core in-memory store and index helpers.
pub mod core;
/// Caller-facing error taxonomy.
pub mod error;
/// Game record, draft, patch, and snapshot types.
pub mod game;
/// File-backed collection store.
pub mod library;
/// Persistence abstraction and CSV implementation.
pub mod persist;
/// Aggregate statistics over the collection.
pub mod stats;
/// Shared primitive types and enums.
pub mod types;

pub use config::LibraryConfig;
pub use error::{LibraryError, LibraryResult};
pub use game::{GameDraft, GamePatch, GameSnapshot};
pub use library::GameLibrary;
pub use types::{GameId, Rating, Status, StatusFilter};
