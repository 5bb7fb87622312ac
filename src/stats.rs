//! Aggregate figures over a set of snapshots.

use hashbrown::HashMap;
use serde::Serialize;

use crate::{game::GameSnapshot, types::Status};

/// Collection summary shown on the statistics view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LibraryStats {
    /// Number of games.
    pub total: usize,
    /// Games with status `Completed`.
    pub completed: usize,
    /// Mean of present ratings to two decimals; `None` when nothing is rated.
    pub average_rating: Option<f64>,
    /// Games per platform, in first-seen order.
    pub per_platform: Vec<(String, usize)>,
    /// Games per genre, in first-seen order.
    pub per_genre: Vec<(String, usize)>,
}

impl LibraryStats {
    /// Computes the summary for `games`.
    pub fn from_snapshots(games: &[GameSnapshot]) -> Self {
        let ratings: Vec<f64> = games
            .iter()
            .filter_map(|g| g.rating)
            .map(f64::from)
            .collect();
        let average_rating = (!ratings.is_empty()).then(|| {
            let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
            (mean * 100.0).round() / 100.0
        });

        Self {
            total: games.len(),
            completed: games
                .iter()
                .filter(|g| g.status == Status::Completed)
                .count(),
            average_rating,
            per_platform: tally(games.iter().map(|g| g.platform.as_str())),
            per_genre: tally(games.iter().map(|g| g.genre.as_str())),
        }
    }
}

fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        let slot = *slots.entry(value).or_insert_with(|| {
            counts.push((value.to_string(), 0));
            counts.len() - 1
        });
        counts[slot].1 += 1;
    }
    counts
}
