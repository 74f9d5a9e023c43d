//! Popularity rankings: top movies, top movies in a genre, top genres.

use crate::aggregator::{self, GenreRanking, MovieRanking};
use crate::ranker::rank;
use data_loader::DataStore;

/// Rated movies ranked by mean rating
pub fn top_movies(store: &DataStore, limit: Option<usize>) -> Vec<MovieRanking> {
    rank(aggregator::all_movie_rankings(store), limit)
}

/// Rated movies of one genre ranked by mean rating
///
/// An unknown genre yields an empty ranking.
pub fn top_movies_in_genre(store: &DataStore, genre: &str, limit: Option<usize>) -> Vec<MovieRanking> {
    let Some(names) = store.movies_in_genre(genre) else {
        return Vec::new();
    };
    let rows = aggregator::movie_rankings(store, names.iter().map(String::as_str));
    rank(rows, limit)
}

/// Genres with at least one rated movie, ranked by genre score
pub fn top_genres(store: &DataStore, limit: Option<usize>) -> Vec<GenreRanking> {
    rank(aggregator::genre_rankings(store), limit)
}
