use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use p4k_reviews::config::Settings;
use p4k_reviews::{db, parser, pipeline};

#[derive(Parser)]
#[command(name = "p4k_reviews", about = "Extract album reviews into normalized SQLite tables")]
struct Cli {
    /// SQLite database path (overrides P4K_DB_PATH)
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create tables
    Init,
    /// Load saved review pages (*.html) from a directory into the page table
    Import {
        dir: PathBuf,
        /// Page URL prefix; each file becomes <base-url>/<file stem>/
        #[arg(long)]
        base_url: String,
    },
    /// Extract stored pages, replacing any rows previously saved for them
    Process {
        /// Max pages to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Extract a single saved page and print its rows as JSON
    Extract {
        file: PathBuf,
        /// Canonical URL of the page
        #[arg(long)]
        url: String,
    },
    /// Show table counts
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(db) = cli.db {
        settings.db_path = db;
    }
    info!(settings = ?settings, "starting");

    let result = match cli.command {
        Commands::Init => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            println!("Schema ready at {}", settings.db_path);
            Ok(())
        }
        Commands::Import { dir, base_url } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let pages = read_pages(&dir, &base_url)?;
            let inserted = db::insert_pages(&conn, &pages)?;
            println!("Imported {} new pages ({} files found)", inserted, pages.len());
            Ok(())
        }
        Commands::Process { limit } => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let pages = db::fetch_pages(&conn, limit)?;
            if pages.is_empty() {
                println!("No pages stored. Run 'import' first.");
                return Ok(());
            }
            println!("Processing {} pages...", pages.len());
            let counts = pipeline::process_pages(&conn, &pages, settings.chunk_size)?;
            counts.print();
            Ok(())
        }
        Commands::Extract { file, url } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let record = parser::extract(&html, &url)?;
            println!("{}", serde_json::to_string_pretty(&record.compile())?);
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect(&settings.db_path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Pages:    {}", s.pages);
            println!("Reviews:  {}", s.reviews);
            println!("Errors:   {}", s.errors);
            println!("Artists:  {}", s.artists);
            println!("Genres:   {}", s.genres);
            println!("Labels:   {}", s.labels);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }

    result
}

fn read_pages(dir: &Path, base_url: &str) -> anyhow::Result<Vec<(String, String)>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "html"))
        .collect();
    paths.sort();

    let base = base_url.trim_end_matches('/');
    let mut pages = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("skipping non-UTF-8 file name {}", path.display());
            continue;
        };
        let html = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        pages.push((format!("{}/{}/", base, stem), html));
    }
    Ok(pages)
}
