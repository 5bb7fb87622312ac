use hashbrown::HashMap;

use crate::types::GameId;

/// Exact title to id.
pub type TitleIndex = HashMap<String, GameId>;
/// Id to position in insertion order.
pub type PositionIndex = HashMap<GameId, usize>;
