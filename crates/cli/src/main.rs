use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::{DataProvider, JsonFileProvider, UserId, parse_genre_list};
use recommender::{
    EngineConfig, Recommendation, RecommendationEngine, SearchRequest, SearchResult, SortPolicy,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// ReelRecs - Hybrid Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Hybrid collaborative and content-based movie recommendations", long_about = None)]
struct Cli {
    /// Path to the movie catalog JSON file
    #[arg(long, global = true, default_value = "data/movies.json")]
    movies: PathBuf,

    /// Path to the interactions JSON file (reviews, favorites, watchlist)
    #[arg(long, global = true)]
    interactions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get movie recommendations for a user
    Recommend {
        /// User ID to get recommendations for
        #[arg(long)]
        user_id: UserId,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        top_n: usize,

        /// Weight of the collaborative signal, in [0, 1]
        #[arg(long, default_value = "0.6")]
        alpha: f64,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Keyword search over titles, descriptions and genres
    Search {
        /// Free-text query
        #[arg(long)]
        query: String,

        /// Number of results to return
        #[arg(long, default_value = "20")]
        top_n: usize,

        /// Earliest release year (alone: exact year)
        #[arg(long)]
        year_min: Option<u16>,

        /// Latest release year (alone: exact year)
        #[arg(long)]
        year_max: Option<u16>,

        /// Genres to match, e.g. "Action,Drama"
        #[arg(long)]
        genres: Option<String>,

        /// score-desc, score-asc, title-asc, title-desc, release-asc or release-desc
        #[arg(long, default_value = "score-desc")]
        sort: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Time recommendations for randomly drawn users
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Recommendations per request
        #[arg(long, default_value = "10")]
        top_n: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> Result<()> {
    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut provider = JsonFileProvider::new(&cli.movies);
    if let Some(path) = &cli.interactions {
        provider = provider.with_interactions(path);
    }
    info!(
        "Using catalog {} and interactions {}",
        provider.movies_path().display(),
        provider
            .interactions_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    );

    match cli.command {
        Commands::Recommend {
            user_id,
            top_n,
            alpha,
            format,
        } => {
            require_interactions(&provider)?;
            handle_recommend(provider, user_id, top_n, alpha, format)?
        }
        Commands::Search {
            query,
            top_n,
            year_min,
            year_max,
            genres,
            sort,
            format,
        } => {
            let request = SearchRequest::new(query)
                .with_top_n(top_n)
                .with_years(year_min, year_max)
                .with_genres(genres.as_deref().map(parse_genre_list).unwrap_or_default())
                .with_sort(SortPolicy::parse(&sort));
            handle_search(provider, &request, format)?
        }
        Commands::Benchmark { requests, top_n } => {
            require_interactions(&provider)?;
            handle_benchmark(provider, requests, top_n)?
        }
    }

    Ok(())
}

fn require_interactions(provider: &JsonFileProvider) -> Result<()> {
    if provider.interactions_path().is_none() {
        bail!("--interactions <PATH> is required for this command");
    }
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    provider: JsonFileProvider,
    user_id: UserId,
    top_n: usize,
    alpha: f64,
    format: OutputFormat,
) -> Result<()> {
    let engine = RecommendationEngine::new(provider, EngineConfig::default())?;
    let recommendations = engine
        .recommend(user_id, top_n, alpha)
        .with_context(|| format!("Failed to recommend movies for user {user_id}"))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&recommendations)?),
        OutputFormat::Table => print_recommendations(user_id, &recommendations),
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(
    provider: JsonFileProvider,
    request: &SearchRequest,
    format: OutputFormat,
) -> Result<()> {
    let engine = RecommendationEngine::new(provider, EngineConfig::default())?;
    let results = engine
        .search(request)
        .with_context(|| format!("Search for '{}' failed", request.query))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Table => print_search_results(request, &results),
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(provider: JsonFileProvider, requests: usize, top_n: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    let users: Vec<UserId> = provider
        .load_interactions()
        .context("Failed to load interactions")?
        .iter()
        .map(|i| i.user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if users.is_empty() {
        bail!("No users found in the interactions file");
    }

    let engine = RecommendationEngine::new(provider, EngineConfig::default())?;
    let alpha = engine.config().alpha;

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for _ in 0..requests {
        let user_id = users[rand::random_range(0..users.len())];
        let start = Instant::now();
        engine.recommend(user_id, top_n, alpha)?;
        timings.push(start.elapsed());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / timings.len() as u32;
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / total_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} distinct users)", requests, users.len());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn print_recommendations(user_id: UserId, recommendations: &[Recommendation]) {
    println!("{}", format!("Recommendations for user {user_id}:").bold().blue());
    if recommendations.is_empty() {
        println!("{}", "  (no recommendations)".dimmed());
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} (id {}) - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.movie_id,
            rec.score
        );
    }
}

fn print_search_results(request: &SearchRequest, results: &[SearchResult]) {
    println!(
        "{}",
        format!("Search results for '{}' ({}):", request.query, request.sort)
            .bold()
            .blue()
    );
    if results.is_empty() {
        println!("{}", "  (no matches)".dimmed());
    }
    for (i, result) in results.iter().enumerate() {
        let year = result
            .release_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "----".to_string());
        println!(
            "{}. {} ({}) [{}] - Score: {:.3}",
            (i + 1).to_string().green(),
            result.title,
            year,
            result.genres.join(", "),
            result.score
        );
    }
}
