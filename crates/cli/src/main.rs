use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pipeline::{
    GenrePreference, GenreRanking, MovieRanking, Recommendation, RecommendationEngine,
    DEFAULT_RECOMMENDATIONS,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

/// ReelRecs - Movie ratings analytics and recommendations
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Rank movies and genres and recommend movies from pipe-delimited rating files", long_about = None)]
struct Cli {
    /// Movies file (genre|movie_id|movie_name)
    #[arg(short, long, global = true)]
    movies: Option<PathBuf>,

    /// Ratings file (movie_name|rating|user_id)
    #[arg(short, long, global = true)]
    ratings: Option<PathBuf>,

    /// Print results as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the given files and report how many rows were accepted
    Load,

    /// Top movies by average rating
    TopMovies {
        /// Number of movies to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Top movies of one genre by average rating
    TopInGenre {
        /// Genre name, matched exactly
        #[arg(long)]
        genre: String,

        /// Number of movies to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Top genres by the average of their movies' average ratings
    TopGenres {
        /// Number of genres to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Show a user's most preferred genre
    UserGenre {
        /// User ID as written in the ratings file
        #[arg(long)]
        user_id: String,
    },

    /// Recommend unseen movies from the user's top genre
    Recommend {
        /// User ID as written in the ratings file
        #[arg(long)]
        user_id: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_RECOMMENDATIONS)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut engine = RecommendationEngine::new();

    match cli.command {
        Commands::Load => handle_load(&mut engine, cli.movies.as_deref(), cli.ratings.as_deref(), cli.json),
        query => {
            let movies = cli
                .movies
                .as_deref()
                .context("--movies is required for this command")?;
            let ratings = cli
                .ratings
                .as_deref()
                .context("--ratings is required for this command")?;
            load_inputs(&mut engine, movies, ratings)?;
            handle_query(&engine, query, cli.json)
        }
    }
}

/// Load both input files before running a query
fn load_inputs(engine: &mut RecommendationEngine, movies: &Path, ratings: &Path) -> Result<()> {
    let start = Instant::now();
    engine
        .load_from_files(movies, ratings)
        .context("Failed to load input files")?;
    debug!("Loaded input files in {:?}", start.elapsed());

    if !engine.is_ready() {
        eprintln!(
            "{} No movies or no ratings were loaded; results will be empty.",
            "!".yellow()
        );
    }
    Ok(())
}

/// Run one of the analytics commands against a loaded engine
fn handle_query(engine: &RecommendationEngine, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Load => Ok(()),
        Commands::TopMovies { limit } => {
            let rows = engine.top_movies(Some(limit));
            emit(&rows, json, |rows| {
                print_ranked_movies(rows, &format!("Top {} Movies by Average Rating", limit))
            })
        }
        Commands::TopInGenre { genre, limit } => {
            let rows = engine.top_movies_in_genre(&genre, Some(limit));
            emit(&rows, json, |rows| {
                print_ranked_movies(rows, &format!("Top {} Movies in Genre '{}'", limit, genre))
            })
        }
        Commands::TopGenres { limit } => {
            let rows = engine.top_genres(Some(limit));
            emit(&rows, json, |rows| {
                print_ranked_genres(rows, &format!("Top {} Genres by Average of Movie Averages", limit))
            })
        }
        Commands::UserGenre { user_id } => {
            let top = engine.user_top_genre(&user_id);
            emit(&top, json, |top| print_user_genre(top.as_ref(), &user_id))
        }
        Commands::Recommend { user_id, limit } => {
            let rows = engine.recommend(&user_id, limit);
            emit(&rows, json, |rows| print_recommendations(rows, &user_id))
        }
    }
}

/// Handle the 'load' command
fn handle_load(
    engine: &mut RecommendationEngine,
    movies: Option<&Path>,
    ratings: Option<&Path>,
    json: bool,
) -> Result<()> {
    #[derive(Serialize)]
    struct LoadReport {
        movies: Option<usize>,
        ratings: Option<usize>,
    }

    if movies.is_none() && ratings.is_none() {
        anyhow::bail!("Nothing to load: pass --movies and/or --ratings");
    }

    let mut report = LoadReport {
        movies: None,
        ratings: None,
    };
    if let Some(path) = movies {
        let count = engine
            .load_movies(path)
            .with_context(|| format!("Failed to load movies from {}", path.display()))?;
        report.movies = Some(count);
    }
    if let Some(path) = ratings {
        let count = engine
            .load_ratings(path)
            .with_context(|| format!("Failed to load ratings from {}", path.display()))?;
        report.ratings = Some(count);
    }

    emit(&report, json, |report| {
        if let (Some(count), Some(path)) = (report.movies, movies) {
            println!("{} Loaded {} movies from '{}'.", "✓".green(), count, path.display());
        }
        if let (Some(count), Some(path)) = (report.ratings, ratings) {
            println!("{} Loaded {} ratings from '{}'.", "✓".green(), count, path.display());
        }
    })
}

/// Print `value` as JSON, or hand it to `print_table`
fn emit<T: Serialize>(value: &T, json: bool, print_table: impl FnOnce(&T)) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
        println!("{}", out);
    } else {
        print_table(value);
    }
    Ok(())
}

/// Cut `s` to at most `width` characters
fn fit(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

fn print_ranked_movies(rows: &[MovieRanking], header: &str) {
    println!("\n{}", header.bold().blue());
    if rows.is_empty() {
        println!("(no results)");
        return;
    }
    println!("{:>4}  {:<50} {:>6}  {:>9}", "Rank", "Movie", "Avg", "#Ratings");
    println!("{}", "-".repeat(76));
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:<50} {:>6.2}  {:>9}",
            (i + 1).to_string().green(),
            fit(&row.name, 50),
            row.mean_rating,
            row.rating_count
        );
    }
}

fn print_ranked_genres(rows: &[GenreRanking], header: &str) {
    println!("\n{}", header.bold().blue());
    if rows.is_empty() {
        println!("(no results)");
        return;
    }
    println!("{:>4}  {:<25} {:>10}  {:>13}", "Rank", "Genre", "Genre Avg", "Rated Movies");
    println!("{}", "-".repeat(58));
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:<25} {:>10.2}  {:>13}",
            (i + 1).to_string().green(),
            fit(&row.genre, 25),
            row.score,
            row.rated_movie_count
        );
    }
}

fn print_user_genre(top: Option<&GenrePreference>, user_id: &str) {
    match top {
        Some(top) => println!(
            "User '{}' top genre: {} (avg={:.2} over {} movie(s))",
            user_id,
            top.genre.bold(),
            top.mean_rating,
            top.rated_count
        ),
        None => println!("User '{}' has no ratings or no genre-mapped ratings.", user_id),
    }
}

fn print_recommendations(rows: &[Recommendation], user_id: &str) {
    println!("\n{}", format!("Recommendations for user {}:", user_id).bold().blue());
    if rows.is_empty() {
        println!("(no recommendations available)");
        return;
    }
    println!(
        "{:>4}  {:<50} {:>6}  {:>9}  {:<20}",
        "Rank", "Movie", "Avg", "#Ratings", "Genre"
    );
    println!("{}", "-".repeat(96));
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:<50} {:>6.2}  {:>9}  {:<20}",
            (i + 1).to_string().green(),
            fit(&row.name, 50),
            row.mean_rating,
            row.rating_count,
            fit(&row.genre, 20)
        );
    }
}
