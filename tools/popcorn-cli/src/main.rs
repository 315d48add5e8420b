//! Popcorn CLI
//!
//! Loads the catalog and similarity artifacts, then recommends movies
//! similar to a title and prints them with their poster URLs.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use popcorn::{
    CachedPosterResolver, DEFAULT_TOP_K, PosterCard, PosterConfig, PosterResolver, Recommender,
    StaticPosterResolver, TmdbPosterResolver, load_catalog, load_recommender, showcase,
};
use tracing::info;

const CATALOG_FILE: &str = "movies.json";
const SIMILARITY_FILE: &str = "similarity.npy";

/// Default artifact directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("popcorn")
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Recommend movies similar to one you like")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog artifact (JSON)
    #[arg(short, long, global = true, env = "POPCORN_CATALOG")]
    catalog: Option<PathBuf>,

    /// Similarity matrix artifact (.npy or JSON)
    #[arg(short, long, global = true, env = "POPCORN_SIMILARITY")]
    similarity: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to TITLE
    Recommend {
        /// Movie title (case-insensitive, exact)
        title: String,

        /// Number of recommendations
        #[arg(short, default_value_t = DEFAULT_TOP_K)]
        k: usize,

        /// Skip poster lookups
        #[arg(long)]
        no_posters: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// TMDB API read-access token
        #[arg(long, env = "TMDB_API_KEY", hide_env_values = true)]
        tmdb_api_key: Option<String>,

        /// Poster request timeout in seconds
        #[arg(
            long,
            env = "POPCORN_POSTER_TIMEOUT",
            default_value_t = 5,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout_secs: u64,
    },
    /// List catalog titles
    Titles {
        /// Only titles containing this text (case-insensitive)
        #[arg(short, long, default_value = "")]
        filter: String,

        /// Maximum number of titles
        #[arg(short, long, default_value_t = 50)]
        limit: usize,
    },
    /// Validate that the artifacts load and agree
    Check,
}

/// Resolved artifact locations
#[derive(Debug, Clone)]
struct ArtifactPaths {
    catalog: PathBuf,
    similarity: PathBuf,
}

impl ArtifactPaths {
    fn resolve(catalog: Option<PathBuf>, similarity: Option<PathBuf>) -> Self {
        let data_dir = default_data_dir();
        Self {
            catalog: catalog.unwrap_or_else(|| data_dir.join(CATALOG_FILE)),
            similarity: similarity.unwrap_or_else(|| data_dir.join(SIMILARITY_FILE)),
        }
    }

    fn load(&self) -> Result<Recommender> {
        load_recommender(&self.catalog, &self.similarity).with_context(|| {
            format!(
                "failed to load artifacts ({} + {})",
                self.catalog.display(),
                self.similarity.display()
            )
        })
    }
}

fn poster_resolver(
    no_posters: bool,
    api_key: Option<String>,
    timeout_secs: u64,
) -> Result<Box<dyn PosterResolver>> {
    let config = PosterConfig::new()
        .with_api_key(api_key)
        .with_timeout(Duration::from_secs(timeout_secs));

    if no_posters || config.api_key.is_none() {
        info!("poster lookups disabled");
        return Ok(Box::new(StaticPosterResolver::new(config.placeholder_url)));
    }

    let tmdb = TmdbPosterResolver::new(config).context("failed to create TMDB client")?;
    Ok(Box::new(CachedPosterResolver::new(tmdb)))
}

fn render_cards(title: &str, cards: &[PosterCard]) -> String {
    if cards.is_empty() {
        return "Could not fetch recommendations.".to_string();
    }

    let mut out = format!("Because you liked {title:?}:\n");
    for (rank, card) in cards.iter().enumerate() {
        out.push_str(&format!(
            "{:>2}. {} ({:.3})\n    {}\n",
            rank + 1,
            card.title,
            card.score,
            card.poster_url()
        ));
    }
    out
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = ArtifactPaths::resolve(cli.catalog, cli.similarity);

    match cli.command {
        Commands::Recommend {
            title,
            k,
            no_posters,
            json,
            tmdb_api_key,
            timeout_secs,
        } => {
            let engine = paths.load()?;
            let posters = poster_resolver(no_posters, tmdb_api_key, timeout_secs)?;
            let cards = showcase(&engine, &posters, &title, k);

            if json {
                println!("{}", serde_json::to_string_pretty(&cards)?);
            } else {
                println!("{}", render_cards(&title, &cards).trim_end());
            }
        }
        Commands::Titles { filter, limit } => {
            let catalog = load_catalog(&paths.catalog)
                .with_context(|| format!("failed to load {}", paths.catalog.display()))?;
            for (index, item) in catalog.search(&filter, limit) {
                println!("{index:>6}  {}", item.title);
            }
        }
        Commands::Check => {
            let engine = paths.load()?;
            println!(
                "ok: {} items, {}x{} similarity matrix, {} missing scores",
                engine.catalog().len(),
                engine.matrix().dim(),
                engine.matrix().dim(),
                engine.matrix().non_finite_count()
            );
        }
    }

    Ok(())
}
