//! Deterministic ordering of aggregated rows.
//!
//! Every ranking in the crate uses the same three-level order:
//! 1. score, highest first
//! 2. weight (how many ratings or movies back the score), highest first
//! 3. key, ascending
//!
//! Keys are unique within a ranking, so the order is total and does not
//! depend on the order rows were produced in.

use crate::aggregator::{GenreRanking, MovieRanking};
use std::cmp::Ordering;

/// A row that can be placed in a ranking.
pub trait Ranked {
    /// Unique name of the row, used as the last tie-breaker
    fn rank_key(&self) -> &str;

    fn rank_score(&self) -> f64;

    fn rank_weight(&self) -> usize;
}

impl Ranked for MovieRanking {
    fn rank_key(&self) -> &str {
        &self.name
    }

    fn rank_score(&self) -> f64 {
        self.mean_rating
    }

    fn rank_weight(&self) -> usize {
        self.rating_count
    }
}

impl Ranked for GenreRanking {
    fn rank_key(&self) -> &str {
        &self.genre
    }

    fn rank_score(&self) -> f64 {
        self.score
    }

    fn rank_weight(&self) -> usize {
        self.rated_movie_count
    }
}

/// Compare two rows: score desc, weight desc, key asc.
///
/// Scores come from validated ratings and are never NaN.
pub fn compare<T: Ranked>(a: &T, b: &T) -> Ordering {
    b.rank_score()
        .partial_cmp(&a.rank_score())
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.rank_weight().cmp(&a.rank_weight()))
        .then_with(|| a.rank_key().cmp(b.rank_key()))
}

/// Sort `rows` into ranking order and keep the first `limit`.
///
/// `None` keeps the full order and `Some(0)` yields an empty ranking.
pub fn rank<T: Ranked>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    rows.sort_by(compare);
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}
