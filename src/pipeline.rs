use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rusqlite::Connection;
use tracing::warn;

use crate::db::{self, StoredPage};
use crate::parser;

/// Totals for one processing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessCounts {
    pub reviews: usize,
    pub artists: usize,
    pub genres: usize,
    pub labels: usize,
    pub errors: usize,
}

impl ProcessCounts {
    pub fn print(&self) {
        println!(
            "Saved {} reviews, {} artist rows, {} genre rows, {} label rows. {} pages failed.",
            self.reviews, self.artists, self.genres, self.labels, self.errors,
        );
    }
}

/// Extract `pages` in parallel chunks and replace their stored rows.
/// A page that fails extraction is logged and its error stored; the run
/// continues with the rest.
pub fn process_pages(
    conn: &Connection,
    pages: &[StoredPage],
    chunk_size: usize,
) -> Result<ProcessCounts> {
    let pb = ProgressBar::new(pages.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = ProcessCounts::default();

    for chunk in pages.chunks(chunk_size.max(1)) {
        let results: Vec<_> = chunk
            .par_iter()
            .map(|page| (page, parser::extract(&page.html, &page.url).map(|r| r.compile())))
            .collect();

        let mut compiled = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for (page, result) in results {
            match result {
                Ok(c) => {
                    counts.artists += c.artists.len();
                    counts.genres += c.genres.len();
                    counts.labels += c.labels.len();
                    compiled.push(c);
                }
                Err(e) => {
                    warn!(url = %page.url, error = %e, "extraction failed");
                    errors.push((page.id, e.to_string()));
                }
            }
        }

        counts.reviews += compiled.len();
        counts.errors += errors.len();
        let chunk_pages: Vec<&StoredPage> = chunk.iter().collect();
        db::replace_page_results(conn, &chunk_pages, &compiled, &errors)?;
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}
