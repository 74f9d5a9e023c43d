//! # Recommender
//!
//! Recommends movies from the user's preferred genre:
//! 1. Build the user context
//! 2. Pick the user's top genre from their own ratings
//! 3. Rank every movie of that genre by global mean rating
//! 4. Drop movies the user already rated
//! 5. Keep the first k
//!
//! A user without a top genre gets an empty list, the same as a user who
//! has rated everything in their top genre. Call `user_top_genre` to tell
//! the two apart.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::AlreadyRatedFilter;
use crate::popularity::top_movies_in_genre;
use crate::user_context::{build_user_context, GenrePreference};
use data_loader::{DataStore, Genre, MovieName};
use serde::Serialize;
use tracing::{debug, instrument};

/// Number of recommendations returned when the caller does not ask for a
/// specific count
pub const DEFAULT_RECOMMENDATIONS: usize = 3;

/// A movie recommended to a user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: MovieName,
    pub mean_rating: f64,
    pub rating_count: usize,
    /// The user's top genre the movie was picked from
    pub genre: Genre,
}

/// Composes the ranking and filtering stages of a recommendation.
pub struct Recommender {
    filter_pipeline: FilterPipeline,
}

impl Recommender {
    /// Create a recommender that excludes movies the user already rated
    pub fn new() -> Self {
        Self {
            filter_pipeline: FilterPipeline::new().add_filter(AlreadyRatedFilter),
        }
    }

    /// Recommend up to `k` movies for `user_id`.
    ///
    /// The result keeps the relative order of the genre ranking.
    #[instrument(skip(self, store))]
    pub fn recommend(&self, store: &DataStore, user_id: &str, k: usize) -> Vec<Recommendation> {
        let context = build_user_context(store, user_id);

        let Some(top) = context.top_genre() else {
            debug!("User {} has no genre preference", user_id);
            return Vec::new();
        };

        let ranked = top_movies_in_genre(store, &top.genre, None);
        let unseen = self.filter_pipeline.apply(ranked, &context);

        let recommendations: Vec<Recommendation> = unseen
            .into_iter()
            .take(k)
            .map(|movie| Recommendation {
                name: movie.name,
                mean_rating: movie.mean_rating,
                rating_count: movie.rating_count,
                genre: top.genre.clone(),
            })
            .collect();

        debug!(
            "Recommending {} movies from {} to user {}",
            recommendations.len(),
            top.genre,
            user_id
        );
        recommendations
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}

/// The user's preferred genre, `None` if they have no rating for a movie of
/// known genre
pub fn user_top_genre(store: &DataStore, user_id: &str) -> Option<GenrePreference> {
    build_user_context(store, user_id).top_genre()
}

/// Recommend up to `k` movies for `user_id` with the default recommender
pub fn recommend(store: &DataStore, user_id: &str, k: usize) -> Vec<Recommendation> {
    Recommender::new().recommend(store, user_id, k)
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
             Action|m7|Golf (2003)\n\
             Action|m8|Hotel (2004)\n\
             Drama|m3|Charlie (2010)\n",
        ));
        store.ingest_ratings(parse_ratings_str(
            "Alpha (2001)|5|u1\n\
             Charlie (2010)|2|u1\n\
             Alpha (2001)|3|u2\n\
             Bravo (1999)|4|u2\n\
             Golf (2003)|5|u2\n\
             Hotel (2004)|3.5|u3\n\
             Hotel (2004)|3.5|u4\n",
        ));
        store
    }

    fn names(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_recommend_excludes_rated_movies() {
        let store = create_test_store();
        let recs = recommend(&store, "u1", 3);

        // Action ranking: Golf 5.0/1, Alpha 4.0/2, Bravo 4.0/1, Hotel 3.5/2
        assert_eq!(names(&recs), vec!["Golf (2003)", "Bravo (1999)", "Hotel (2004)"]);
        assert!(recs.iter().all(|r| r.genre == "Action"));
        assert!((recs[0].mean_rating - 5.0).abs() < 1e-6);
        assert_eq!(recs[2].rating_count, 2);
    }

    #[test]
    fn test_recommend_respects_k() {
        let store = create_test_store();

        assert_eq!(names(&recommend(&store, "u1", 1)), vec!["Golf (2003)"]);
        assert!(recommend(&store, "u1", 0).is_empty());
        assert_eq!(recommend(&store, "u1", 50).len(), 3);
    }

    #[test]
    fn test_recommend_follows_genre_ranking_order() {
        let store = create_test_store();
        let ranked: Vec<String> = top_movies_in_genre(&store, "Action", None)
            .into_iter()
            .map(|m| m.name)
            .collect();

        let recs = recommend(&store, "u2", 10);
        let positions: Vec<usize> = recs
            .iter()
            .map(|r| ranked.iter().position(|n| *n == r.name).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(names(&recs), vec!["Hotel (2004)"]);
    }

    #[test]
    fn test_no_top_genre_means_no_recommendations() {
        let store = create_test_store();

        assert!(user_top_genre(&store, "nobody").is_none());
        assert!(recommend(&store, "nobody", 3).is_empty());
    }
}
