//! Filter to remove movies the user has already rated.
//!
//! There is no point in recommending a movie the user has seen, whatever
//! rating they gave it.

use crate::aggregator::MovieRanking;
use crate::traits::Filter;
use crate::user_context::UserContext;

/// Removes candidates that the user has already rated.
///
/// Uses the HashSet in UserContext.rated_movies for O(1) lookups. Ratings
/// for movies outside the movies file are in that set too.
pub struct AlreadyRatedFilter;

impl Filter for AlreadyRatedFilter {
    fn name(&self) -> &str {
        "AlreadyRatedFilter"
    }

    fn apply(&self, candidates: Vec<MovieRanking>, context: &UserContext) -> Vec<MovieRanking> {
        candidates
            .into_iter()
            .filter(|candidate| !context.has_rated(&candidate.name))
            .collect()
    }
}
