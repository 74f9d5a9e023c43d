//! # Recommendation Engine
//!
//! A session handle that owns one DataStore and answers every query
//! against it. The engine starts empty; each load replaces the part of the
//! store it owns and `clear` resets everything.
//!
//! Queries borrow the engine immutably and loads borrow it mutably, so a
//! load can never interleave with a query. Share an engine across threads
//! only behind a lock, or build a fresh engine and swap it in whole.

use crate::aggregator::{GenreRanking, MovieRanking};
use crate::popularity;
use crate::recommender::{Recommendation, Recommender};
use crate::user_context::{build_user_context, GenrePreference, UserContext};
use data_loader::{DataStore, Result};
use std::path::Path;

/// Owns the loaded data and exposes the query interface.
#[derive(Default)]
pub struct RecommendationEngine {
    store: DataStore,
    recommender: Recommender,
}

impl RecommendationEngine {
    /// Create an engine with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already populated store
    pub fn from_store(store: DataStore) -> Self {
        Self {
            store,
            recommender: Recommender::new(),
        }
    }

    /// Read access to the underlying indexes
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Load a movies file; returns the number of accepted rows
    pub fn load_movies(&mut self, path: &Path) -> Result<usize> {
        self.store.load_movies(path)
    }

    /// Load a ratings file; returns the number of unique (user, movie) pairs
    pub fn load_ratings(&mut self, path: &Path) -> Result<usize> {
        self.store.load_ratings(path)
    }

    /// Load both files, movies first
    pub fn load_from_files(&mut self, movies_path: &Path, ratings_path: &Path) -> Result<(usize, usize)> {
        self.store.load_from_files(movies_path, ratings_path)
    }

    /// True once both movies and ratings hold data
    pub fn is_ready(&self) -> bool {
        self.store.has_movies() && self.store.has_ratings()
    }

    pub fn top_movies(&self, limit: Option<usize>) -> Vec<MovieRanking> {
        popularity::top_movies(&self.store, limit)
    }

    pub fn top_movies_in_genre(&self, genre: &str, limit: Option<usize>) -> Vec<MovieRanking> {
        popularity::top_movies_in_genre(&self.store, genre, limit)
    }

    pub fn top_genres(&self, limit: Option<usize>) -> Vec<GenreRanking> {
        popularity::top_genres(&self.store, limit)
    }

    pub fn user_context(&self, user_id: &str) -> UserContext {
        build_user_context(&self.store, user_id)
    }

    pub fn user_top_genre(&self, user_id: &str) -> Option<GenrePreference> {
        self.user_context(user_id).top_genre()
    }

    pub fn recommend(&self, user_id: &str, k: usize) -> Vec<Recommendation> {
        self.recommender.recommend(&self.store, user_id, k)
    }

    /// Drop all loaded data
    pub fn clear(&mut self) {
        self.store.clear();
    }
}
