//! # Data Loader Crate
//!
//! This crate loads the movies and ratings files and indexes them in memory.
//!
//! ## Main Components
//!
//! - **types**: Domain records (Movie, RatingRecord) and the DataStore
//! - **parser**: Line-level parsing and the data-cleaning rules
//! - **index**: Loading files into a DataStore and deriving its indexes
//! - **error**: Error types for file access
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataStore;
//! use std::path::Path;
//!
//! let mut store = DataStore::new();
//! let movies = store.load_movies(Path::new("data/movies.txt"))?;
//! let pairs = store.load_ratings(Path::new("data/ratings.txt"))?;
//!
//! println!("{} movie rows, {} unique ratings", movies, pairs);
//! println!("Alpha was rated {} times", store.get_movie_ratings("Alpha (2001)").len());
//! ```
//!
//! Malformed lines never fail a load. Only a missing or unreadable file
//! produces a `DataLoadError`.

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use parser::{parse_movie_record, parse_rating_record};
pub use types::{
    // Type aliases
    Genre,
    MovieName,
    UserId,
    // Core types
    DataStore,
    Movie,
    RatingRecord,
};
