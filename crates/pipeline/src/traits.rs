//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable filters to be
//! applied to a ranked list of movies.

use crate::aggregator::MovieRanking;
use crate::user_context::UserContext;

/// Core trait for filtering ranked candidates.
///
/// Filters take ownership of the candidates and return the ones they keep.
/// They must not reorder what they keep: the input is already ranked.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a ranked set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter, in ranking order
    /// * `context` - The user the candidates are for
    fn apply(&self, candidates: Vec<MovieRanking>, context: &UserContext) -> Vec<MovieRanking>;
}
