//! Rating aggregation over a DataStore.
//!
//! Computes per-movie means and per-genre composite scores. Movies and
//! genres without any rating have no score at all; they are left out of the
//! results rather than scored as zero.

use data_loader::{DataStore, Genre, MovieName};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Aggregated popularity of one movie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRanking {
    pub name: MovieName,
    pub mean_rating: f64,
    pub rating_count: usize,
}

/// Aggregated popularity of one genre.
///
/// `score` is the mean of the mean ratings of the genre's rated movies, so
/// every rated movie weighs the same regardless of its rating count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRanking {
    pub genre: Genre,
    pub score: f64,
    pub rated_movie_count: usize,
}

/// Arithmetic mean, or `None` for an empty slice.
///
/// The sum is correctly rounded, so the result does not depend on the order
/// of `values`. Two movies with the same ratings always get the same score.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(exact_sum(values) / values.len() as f64)
}

/// Correctly rounded sum of finite values (Shewchuk's exact partials).
pub fn exact_sum(values: &[f64]) -> f64 {
    // Non-overlapping partials, increasing in magnitude
    let mut partials: Vec<f64> = Vec::new();
    for &value in values {
        let mut x = value;
        let mut i = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[i] = lo;
                i += 1;
            }
            x = hi;
        }
        partials.truncate(i);
        partials.push(x);
    }

    let Some(mut hi) = partials.pop() else {
        return 0.0;
    };
    let mut lo = 0.0;
    while let Some(y) = partials.pop() {
        let x = hi;
        hi = x + y;
        lo = y - (hi - x);
        if lo != 0.0 {
            break;
        }
    }

    // Round half to even across the remaining partials
    if let Some(&next) = partials.last() {
        if (lo < 0.0 && next < 0.0) || (lo > 0.0 && next > 0.0) {
            let y = lo * 2.0;
            let x = hi + y;
            if y == x - hi {
                hi = x;
            }
        }
    }
    hi
}

/// Mean rating of a movie, `None` if it has no ratings
pub fn mean_rating(store: &DataStore, name: &str) -> Option<f64> {
    mean(store.get_movie_ratings(name))
}

/// Mean rating and rating count of a movie, `None` if it has no ratings
pub fn movie_stats(store: &DataStore, name: &str) -> Option<MovieRanking> {
    let ratings = store.get_movie_ratings(name);
    Some(MovieRanking {
        name: name.to_string(),
        mean_rating: mean(ratings)?,
        rating_count: ratings.len(),
    })
}

/// Aggregate the given movies, skipping unrated ones. Output order follows
/// the input.
pub fn movie_rankings<'a>(
    store: &DataStore,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<MovieRanking> {
    names
        .into_iter()
        .filter_map(|name| movie_stats(store, name))
        .collect()
}

/// Aggregate every rated movie in parallel. The output is unordered.
pub fn all_movie_rankings(store: &DataStore) -> Vec<MovieRanking> {
    let names: Vec<&MovieName> = store.rated_movies().collect();
    let rows: Vec<MovieRanking> = names
        .par_iter()
        .filter_map(|name| movie_stats(store, name))
        .collect();
    debug!("Aggregated {} rated movies", rows.len());
    rows
}

/// Composite score of a genre, `None` for unknown genres and genres with no
/// rated movie
pub fn genre_score(store: &DataStore, genre: &str) -> Option<GenreRanking> {
    let means: Vec<f64> = store
        .movies_in_genre(genre)?
        .iter()
        .filter_map(|name| mean_rating(store, name))
        .collect();

    Some(GenreRanking {
        genre: genre.to_string(),
        score: mean(&means)?,
        rated_movie_count: means.len(),
    })
}

/// Score every genre that has at least one rated movie. The output is
/// unordered.
pub fn genre_rankings(store: &DataStore) -> Vec<GenreRanking> {
    store
        .genres()
        .filter_map(|genre| genre_score(store, genre))
        .collect()
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
             Comedy|m5|Echo (2005)\n",
        ));
        store.ingest_ratings(parse_ratings_str(
            "Alpha (2001)|5|u1\n\
             Alpha (2001)|4|u2\n\
             Bravo (1999)|4|u1\n\
             Charlie (2010)|5|u1\n\
             Charlie (2010)|5|u2\n\
             Charlie (2010)|1|u3\n\
             Delta (2011)|0|u2\n",
        ));
        store
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[3.0]), Some(3.0));
        assert!((mean(&[5.0, 5.0, 1.0]).unwrap() - 11.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_sum_ignores_order() {
        assert_eq!(exact_sum(&[]), 0.0);
        assert_eq!(exact_sum(&[0.1, 0.2, 0.3]), 0.6);
        assert_eq!(exact_sum(&[0.3, 0.2, 0.1]), 0.6);
        assert_eq!(exact_sum(&[1e16, 1.0, -1e16]), 1.0);
        assert_eq!(exact_sum(&[0.1; 10]), 1.0);
    }

    #[test]
    fn test_mean_is_the_same_for_every_permutation() {
        let values = [0.1, 0.2, 0.3, 4.7, 0.7];
        let expected = mean(&values).unwrap();

        let mut permuted = values;
        for _ in 0..values.len() {
            permuted.rotate_left(1);
            assert_eq!(mean(&permuted), Some(expected));
            permuted.reverse();
            assert_eq!(mean(&permuted), Some(expected));
        }
    }

    #[test]
    fn test_mean_rating_distinguishes_zero_from_unrated() {
        let store = create_test_store();

        assert_eq!(mean_rating(&store, "Delta (2011)"), Some(0.0));
        assert_eq!(mean_rating(&store, "Echo (2005)"), None);
        assert_eq!(mean_rating(&store, "Nope (1900)"), None);
    }

    #[test]
    fn test_movie_stats() {
        let store = create_test_store();
        let stats = movie_stats(&store, "Alpha (2001)").unwrap();

        assert_eq!(stats.name, "Alpha (2001)");
        assert!((stats.mean_rating - 4.5).abs() < 1e-6);
        assert_eq!(stats.rating_count, 2);
    }

    #[test]
    fn test_movie_rankings_skip_unrated() {
        let store = create_test_store();
        let rows = movie_rankings(&store, ["Echo (2005)", "Bravo (1999)"]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Bravo (1999)");
    }

    #[test]
    fn test_all_movie_rankings() {
        let store = create_test_store();
        let rows = all_movie_rankings(&store);

        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|r| r.name != "Echo (2005)"));
    }

    #[test]
    fn test_genre_score() {
        let store = create_test_store();

        let action = genre_score(&store, "Action").unwrap();
        assert!((action.score - 4.25).abs() < 1e-6);
        assert_eq!(action.rated_movie_count, 2);

        // Mean of movie means, not of raw ratings: (11/3 + 0) / 2
        let drama = genre_score(&store, "Drama").unwrap();
        assert!((drama.score - 11.0 / 6.0).abs() < 1e-6);
        assert_eq!(drama.rated_movie_count, 2);
    }

    #[test]
    fn test_genre_without_rated_movies_has_no_score() {
        let store = create_test_store();

        assert!(genre_score(&store, "Comedy").is_none());
        assert!(genre_score(&store, "Western").is_none());
        assert_eq!(genre_rankings(&store).len(), 2);
    }
}
