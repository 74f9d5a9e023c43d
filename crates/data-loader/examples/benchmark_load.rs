use data_loader::DataStore;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let mut args = std::env::args().skip(1);
    let movies_path = PathBuf::from(args.next().unwrap_or_else(|| "data/movies.txt".to_string()));
    let ratings_path = PathBuf::from(args.next().unwrap_or_else(|| "data/ratings.txt".to_string()));

    println!("Loading {} and {}...\n", movies_path.display(), ratings_path.display());

    let start = Instant::now();
    let mut store = DataStore::new();
    let (movie_rows, rating_pairs) = store
        .load_from_files(&movies_path, &ratings_path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, users, _) = store.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movie rows accepted: {} ({} unique titles)", movie_rows, movies);
    println!("Unique ratings: {} from {} users", rating_pairs, users);
    println!("\nPerformance: {:.0} ratings/second",
             rating_pairs as f64 / elapsed.as_secs_f64());
}
