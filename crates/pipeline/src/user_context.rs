//! Per-user view of the DataStore.
//!
//! Gathers everything the recommender needs about one user in a single
//! pass: which movies they rated and how they rate each genre.

use crate::aggregator::mean;
use crate::ranker::{self, Ranked};
use data_loader::{DataStore, Genre, MovieName, UserId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// How much a user likes one genre, from their own ratings only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenrePreference {
    pub genre: Genre,
    pub mean_rating: f64,
    /// Number of movies in the genre the user rated
    pub rated_count: usize,
}

impl Ranked for GenrePreference {
    fn rank_key(&self) -> &str {
        &self.genre
    }

    fn rank_score(&self) -> f64 {
        self.mean_rating
    }

    fn rank_weight(&self) -> usize {
        self.rated_count
    }
}

/// Aggregated information about a user.
///
/// `rated_movies` and `rating_count` cover every rating the user gave,
/// including movies missing from the movies file. `genre_ratings` only
/// covers movies whose genre is known.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: UserId,
    pub rated_movies: HashSet<MovieName>,
    pub rating_count: usize,
    pub genre_ratings: HashMap<Genre, Vec<f64>>,
}

impl UserContext {
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn has_rated(&self, movie_name: &str) -> bool {
        self.rated_movies.contains(movie_name)
    }

    /// Per-genre mean and count of the user's ratings, unordered
    pub fn genre_preferences(&self) -> Vec<GenrePreference> {
        self.genre_ratings
            .iter()
            .filter_map(|(genre, ratings)| {
                Some(GenrePreference {
                    genre: genre.clone(),
                    mean_rating: mean(ratings)?,
                    rated_count: ratings.len(),
                })
            })
            .collect()
    }

    /// The user's preferred genre, `None` when no rating maps to a known
    /// genre
    pub fn top_genre(&self) -> Option<GenrePreference> {
        ranker::rank(self.genre_preferences(), Some(1)).into_iter().next()
    }
}

/// Build a UserContext from the DataStore.
///
/// An unknown user yields an empty context rather than an error.
pub fn build_user_context(store: &DataStore, user_id: &str) -> UserContext {
    let mut context = UserContext::new(user_id);

    let Some(ratings) = store.get_user_ratings(user_id) else {
        return context;
    };

    context.rating_count = ratings.len();
    for (movie_name, &value) in ratings {
        context.rated_movies.insert(movie_name.clone());

        // Unknown movies have no genre to attribute the rating to
        if let Some(movie) = store.get_movie(movie_name) {
            context
                .genre_ratings
                .entry(movie.genre.clone())
                .or_default()
                .push(value);
        }
    }

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::parser::{parse_movies_str, parse_ratings_str};

    fn create_test_store() -> DataStore {
        let mut store = DataStore::new();
        store.ingest_movies(parse_movies_str(
            "Action|m1|Alpha (2001)\n\
             Action|m2|Bravo (1999)\n\
             Drama|m3|Charlie (2010)\n\
             Drama|m4|Delta (2011)\n\
             Comedy|m6|Foxtrot (2007)\n",
        ));
        store.ingest_ratings(parse_ratings_str(
            "Alpha (2001)|5|u1\n\
             Bravo (1999)|4|u1\n\
             Charlie (2010)|5|u1\n\
             Ghost (2012)|5|u1\n\
             Alpha (2001)|4|u2\n\
             Charlie (2010)|5|u2\n\
             Delta (2011)|3|u2\n\
             Foxtrot (2007)|4|u2\n\
             Ghost (2012)|2|u4\n",
        ));
        store
    }

    #[test]
    fn test_build_user_context_basic() {
        let store = create_test_store();
        let context = build_user_context(&store, "u1");

        assert_eq!(context.user_id, "u1");
        assert_eq!(context.rating_count, 4);
        assert!(context.has_rated("Alpha (2001)"));
        assert!(context.has_rated("Ghost (2012)"));
        assert!(!context.has_rated("Delta (2011)"));
    }

    #[test]
    fn test_unknown_movies_count_but_have_no_genre() {
        let store = create_test_store();
        let context = build_user_context(&store, "u1");

        let genre_total: usize = context.genre_ratings.values().map(|v| v.len()).sum();
        assert_eq!(genre_total, 3);
        assert_eq!(context.rating_count, 4);
    }

    #[test]
    fn test_top_genre_by_mean() {
        let store = create_test_store();
        let top = build_user_context(&store, "u1").top_genre().unwrap();

        // Action: (5 + 4) / 2 = 4.5, Drama: 5.0
        assert_eq!(top.genre, "Drama");
        assert!((top.mean_rating - 5.0).abs() < 1e-6);
        assert_eq!(top.rated_count, 1);
    }

    #[test]
    fn test_top_genre_tie_breaks_on_count() {
        let store = create_test_store();
        let top = build_user_context(&store, "u2").top_genre().unwrap();

        // Action 4.0 (1), Drama 4.0 (2), Comedy 4.0 (1)
        assert_eq!(top.genre, "Drama");
        assert!((top.mean_rating - 4.0).abs() < 1e-6);
        assert_eq!(top.rated_count, 2);
    }

    #[test]
    fn test_no_preference_without_known_genres() {
        let store = create_test_store();

        let only_unknown = build_user_context(&store, "u4");
        assert_eq!(only_unknown.rating_count, 1);
        assert!(only_unknown.top_genre().is_none());

        let missing = build_user_context(&store, "nobody");
        assert_eq!(missing.rating_count, 0);
        assert!(missing.top_genre().is_none());
    }
}
