//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::aggregator::MovieRanking;
use crate::traits::Filter;
use crate::user_context::UserContext;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new().add_filter(AlreadyRatedFilter);
///
/// let unseen = pipeline.apply(ranked, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Filters only ever remove candidates, so the output keeps the
    /// relative order of the input.
    pub fn apply(&self, candidates: Vec<MovieRanking>, context: &UserContext) -> Vec<MovieRanking> {
        let mut current = candidates;
        for filter in &self.filters {
            let before = current.len();
            current = filter.apply(current, context);
            debug!(
                "Filter {} kept {} of {} candidates",
                filter.name(),
                current.len(),
                before
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::AlreadyRatedFilter;

    fn candidates() -> Vec<MovieRanking> {
        ["Alpha (2001)", "Bravo (1999)", "Charlie (2010)"]
            .iter()
            .map(|name| MovieRanking {
                name: name.to_string(),
                mean_rating: 4.0,
                rating_count: 2,
            })
            .collect()
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let context = UserContext::new("u1");

        let filtered = pipeline.apply(candidates(), &context);
        assert_eq!(filtered, candidates());
    }

    #[test]
    fn test_single_filter() {
        let mut context = UserContext::new("u1");
        context.rated_movies.insert("Bravo (1999)".to_string());

        let pipeline = FilterPipeline::new().add_filter(AlreadyRatedFilter);
        assert_eq!(pipeline.filter_names(), vec!["AlreadyRatedFilter"]);

        let filtered = pipeline.apply(candidates(), &context);
        let names: Vec<&str> = filtered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha (2001)", "Charlie (2010)"]);
    }
}
