//! DataStore building and indexing logic.
//!
//! Loading is split in two independent halves. Movies own the name and
//! genre indexes; ratings own the per-user map and the per-movie index
//! derived from it. Each half clears what it owns before folding new
//! records in, so a reload never leaves stale entries behind.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

impl DataStore {
    /// Load a movies file, replacing every previously loaded movie.
    ///
    /// Returns the number of valid rows accepted. A row that overwrites an
    /// earlier movie of the same name still counts.
    pub fn load_movies(&mut self, path: &Path) -> Result<usize> {
        let movies = parser::parse_movies(path)?;
        let accepted = self.ingest_movies(movies);
        info!("Loaded {} movie rows from {:?}", accepted, path);
        Ok(accepted)
    }

    /// Load a ratings file, replacing every previously loaded rating.
    ///
    /// Returns the number of unique (user, movie) pairs, including ratings
    /// for movies that are not in the movies file.
    pub fn load_ratings(&mut self, path: &Path) -> Result<usize> {
        let ratings = parser::parse_ratings(path)?;
        let pairs = self.ingest_ratings(ratings);
        info!("Loaded {} unique ratings from {:?}", pairs, path);
        Ok(pairs)
    }

    /// Load both files at once.
    ///
    /// The two files are read and parsed in parallel; movies are then
    /// ingested before ratings so the per-movie index is populated.
    /// Returns `(movie_rows, rating_pairs)`.
    pub fn load_from_files(&mut self, movies_path: &Path, ratings_path: &Path) -> Result<(usize, usize)> {
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_ratings(ratings_path),
        );
        let movies = movies?;
        let ratings = ratings?;

        let accepted = self.ingest_movies(movies);
        let pairs = self.ingest_ratings(ratings);
        info!(
            "Loaded {} movie rows from {:?} and {} unique ratings from {:?}",
            accepted, movies_path, pairs, ratings_path
        );
        Ok((accepted, pairs))
    }

    /// Replace the movie indexes with `movies`, last write wins on name.
    ///
    /// The genre index is rebuilt from the final name index, so a movie that
    /// was re-declared under another genre only appears under the last one.
    pub fn ingest_movies(&mut self, movies: impl IntoIterator<Item = Movie>) -> usize {
        self.movies_by_name.clear();

        let mut accepted = 0;
        for movie in movies {
            self.movies_by_name.insert(movie.name.clone(), movie);
            accepted += 1;
        }

        self.build_genre_index();
        accepted
    }

    /// Replace the rating indexes with `ratings`, last write wins per
    /// (user, movie).
    pub fn ingest_ratings(&mut self, ratings: impl IntoIterator<Item = RatingRecord>) -> usize {
        self.user_ratings.clear();

        for rating in ratings {
            self.user_ratings
                .entry(rating.user_id)
                .or_default()
                .insert(rating.movie_name, rating.value);
        }

        self.build_movie_ratings();
        self.user_ratings.values().map(|per_user| per_user.len()).sum()
    }

    /// Rebuild `movies_by_genre` from `movies_by_name`
    fn build_genre_index(&mut self) {
        let mut genre_index: HashMap<Genre, HashSet<MovieName>> = HashMap::new();
        for movie in self.movies_by_name.values() {
            genre_index
                .entry(movie.genre.clone())
                .or_default()
                .insert(movie.name.clone());
        }
        self.movies_by_genre = genre_index;
    }

    /// Rebuild `ratings_by_movie` from `user_ratings`, keeping only movies
    /// currently known by name
    fn build_movie_ratings(&mut self) {
        let mut movie_ratings: HashMap<MovieName, Vec<f64>> = HashMap::new();
        let mut unknown = 0usize;
        for per_user in self.user_ratings.values() {
            for (movie_name, &value) in per_user {
                if self.movies_by_name.contains_key(movie_name) {
                    movie_ratings.entry(movie_name.clone()).or_default().push(value);
                } else {
                    unknown += 1;
                }
            }
        }
        if unknown > 0 {
            debug!("{} ratings reference movies missing from the movies file", unknown);
        }
        self.ratings_by_movie = movie_ratings;
    }
}
