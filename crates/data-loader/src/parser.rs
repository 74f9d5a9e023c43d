//! Parser for the movies and ratings files.
//!
//! Both files are pipe-delimited, one record per line:
//! - movies:  genre|movie_id|movie_name
//! - ratings: movie_name|rating|user_id
//!
//! A `#` starts a comment that runs to the end of the line. Blank and
//! comment-only lines are ignored. Every other line either parses into a
//! record or is dropped; a bad line never fails the whole file.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::path::Path;

const DELIMITER: char = '|';

/// Lowest rating accepted, inclusive
pub const MIN_RATING: f64 = 0.0;
/// Highest rating accepted, inclusive
pub const MAX_RATING: f64 = 5.0;

/// Read a whole file as UTF-8 text.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| DataLoadError::from_io(path, e))
}

/// Drop everything from the first `#` onward and trim what is left.
///
/// Returns `None` when nothing but whitespace remains.
fn strip_comment(line: &str) -> Option<&str> {
    let content = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let content = content.trim();
    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

/// Split a candidate line into exactly three trimmed fields.
fn split_fields(line: &str) -> Option<[&str; 3]> {
    let mut parts = line.split(DELIMITER).map(str::trim);
    let fields = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    Some(fields)
}

/// Parse one line of the movies file.
///
/// Example: "Action|m1|Alpha (2001)  # comment" -> Movie { genre: "Action", .. }
///
/// All three fields must be non-empty after trimming.
pub fn parse_movie_record(line: &str) -> Option<Movie> {
    let [genre, id, name] = split_fields(strip_comment(line)?)?;
    if genre.is_empty() || id.is_empty() || name.is_empty() {
        return None;
    }
    Some(Movie {
        genre: genre.to_string(),
        id: id.to_string(),
        name: name.to_string(),
    })
}

/// Parse one line of the ratings file.
///
/// Example: "Alpha (2001)|4.5|u1" -> RatingRecord { value: 4.5, .. }
///
/// The rating must be a real number within [MIN_RATING, MAX_RATING]. NaN
/// fails the range check and is dropped like any other bad value.
pub fn parse_rating_record(line: &str) -> Option<RatingRecord> {
    let [movie_name, rating, user_id] = split_fields(strip_comment(line)?)?;
    let value: f64 = rating.parse().ok()?;
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return None;
    }
    Some(RatingRecord {
        movie_name: movie_name.to_string(),
        user_id: user_id.to_string(),
        value,
    })
}

/// Parse the contents of a movies file, keeping the valid records in file
/// order.
pub fn parse_movies_str(content: &str) -> Vec<Movie> {
    content.lines().filter_map(parse_movie_record).collect()
}

/// Parse the contents of a ratings file, keeping the valid records in file
/// order.
pub fn parse_ratings_str(content: &str) -> Vec<RatingRecord> {
    content.lines().filter_map(parse_rating_record).collect()
}

/// Parse a movies file from disk
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let content = read_file(path)?;
    Ok(parse_movies_str(&content))
}

/// Parse a ratings file from disk
pub fn parse_ratings(path: &Path) -> Result<Vec<RatingRecord>> {
    let content = read_file(path)?;
    Ok(parse_ratings_str(&content))
}
