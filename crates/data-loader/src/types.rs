//! Core domain types for the movies and ratings datasets.
//!
//! This module defines the records produced by the parser and the
//! `DataStore`, the in-memory indexes every query reads from.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

// =============================================================================
// Type Aliases
// =============================================================================

/// Movie title, including the year by convention ("Alpha (2001)")
pub type MovieName = String;

/// Genre label as written in the movies file
pub type Genre = String;

/// Opaque user identifier as written in the ratings file
pub type UserId = String;

// =============================================================================
// Records
// =============================================================================

/// A movie from the movies file.
///
/// `name` is the unique key. A later record with the same name replaces
/// this one entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    pub genre: Genre,
    pub id: String,
    pub name: MovieName,
}

/// A single validated line of the ratings file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingRecord {
    pub movie_name: MovieName,
    pub user_id: UserId,
    /// Always within [0.0, 5.0]
    pub value: f64,
}

// =============================================================================
// DataStore - The In-Memory Indexes
// =============================================================================

/// Holds all loaded data and the lookup indexes derived from it.
///
/// Each load replaces its own indexes wholesale: `load_movies` owns
/// `movies_by_name` and `movies_by_genre`, `load_ratings` owns
/// `user_ratings` and `ratings_by_movie`. Nothing is patched incrementally.
///
/// Invariant: `ratings_by_movie[name]` holds exactly the values
/// `user_ratings[u][name]` for every user `u`, and only for names that were
/// in `movies_by_name` when ratings were last loaded.
#[derive(Debug, Default, Clone)]
pub struct DataStore {
    pub(crate) movies_by_name: HashMap<MovieName, Movie>,
    pub(crate) movies_by_genre: HashMap<Genre, HashSet<MovieName>>,
    pub(crate) ratings_by_movie: HashMap<MovieName, Vec<f64>>,
    pub(crate) user_ratings: HashMap<UserId, HashMap<MovieName, f64>>,
}

impl DataStore {
    /// Creates a new, empty DataStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by name
    pub fn get_movie(&self, name: &str) -> Option<&Movie> {
        self.movies_by_name.get(name)
    }

    /// Names of the movies in `genre`, or `None` for an unknown genre
    pub fn movies_in_genre(&self, genre: &str) -> Option<&HashSet<MovieName>> {
        self.movies_by_genre.get(genre)
    }

    /// Every genre that currently has at least one movie
    pub fn genres(&self) -> impl Iterator<Item = &Genre> {
        self.movies_by_genre.keys()
    }

    /// Rating values of a known movie
    ///
    /// Returns an empty slice for unrated or unknown movies.
    pub fn get_movie_ratings(&self, name: &str) -> &[f64] {
        self.ratings_by_movie
            .get(name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Names of the movies that have at least one rating
    pub fn rated_movies(&self) -> impl Iterator<Item = &MovieName> {
        self.ratings_by_movie.keys()
    }

    /// The user's deduplicated ratings, including movies that are not in the
    /// movies file
    pub fn get_user_ratings(&self, user_id: &str) -> Option<&HashMap<MovieName, f64>> {
        self.user_ratings.get(user_id)
    }

    pub fn has_movies(&self) -> bool {
        !self.movies_by_name.is_empty()
    }

    pub fn has_ratings(&self) -> bool {
        !self.user_ratings.is_empty()
    }

    /// Number of movies, users, and unique (user, movie) rating pairs
    pub fn counts(&self) -> (usize, usize, usize) {
        let pairs = self.user_ratings.values().map(|v| v.len()).sum();
        (self.movies_by_name.len(), self.user_ratings.len(), pairs)
    }

    /// Reset all four indexes at once
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}
