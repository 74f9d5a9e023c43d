//! Aggregation, ranking, and recommendation over a loaded DataStore.
//!
//! This crate provides:
//! - Aggregator for per-movie means and per-genre scores
//! - Ranker with the shared score/weight/key ordering
//! - UserContext and the Filter pipeline used by the recommender
//! - RecommendationEngine, the session handle the CLI talks to
//!
//! ## Architecture
//! Data flows one way:
//! 1. `data_loader` parses the files into a DataStore
//! 2. The aggregator turns raw ratings into scored rows
//! 3. The ranker orders rows deterministically
//! 4. The recommender ranks the user's top genre and filters out what they
//!    already rated
//!
//! Nothing here performs I/O except the engine's load methods, which
//! delegate to `data_loader`.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::RecommendationEngine;
//! use std::path::Path;
//!
//! let mut engine = RecommendationEngine::new();
//! engine.load_from_files(Path::new("movies.txt"), Path::new("ratings.txt"))?;
//!
//! let top = engine.top_movies(Some(10));
//! let recs = engine.recommend("u1", 3);
//! ```

pub mod aggregator;
pub mod ranker;
pub mod user_context;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod popularity;
pub mod recommender;
pub mod engine;

// Re-export main types
pub use aggregator::{GenreRanking, MovieRanking};
pub use engine::RecommendationEngine;
pub use filter_pipeline::FilterPipeline;
pub use ranker::{rank, Ranked};
pub use recommender::{Recommendation, Recommender, DEFAULT_RECOMMENDATIONS};
pub use traits::Filter;
pub use user_context::{build_user_context, GenrePreference, UserContext};
