use std::path::Path;

use anyhow::Result;
use rusqlite::Connection;

use crate::rows::CompiledReview;

pub fn connect(path: &str) -> Result<Connection> {
    if let Some(dir) = Path::new(path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        -- Raw pages, filled by the crawler
        CREATE TABLE IF NOT EXISTS pages (
            id         INTEGER PRIMARY KEY,
            url        TEXT UNIQUE NOT NULL,
            html       TEXT NOT NULL,
            error      TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Extracted review data
        CREATE TABLE IF NOT EXISTS reviews (
            reviewid       TEXT NOT NULL,
            title          TEXT,
            artist         TEXT,
            url            TEXT,
            score          REAL,
            best_new_music INTEGER,
            author         TEXT,
            author_type    TEXT,
            pub_date       TEXT,
            pub_weekday    INTEGER,
            pub_day        INTEGER,
            pub_month      INTEGER,
            pub_year       INTEGER
        );
        CREATE INDEX IF NOT EXISTS idx_reviews_id ON reviews(reviewid);

        CREATE TABLE IF NOT EXISTS artists (reviewid TEXT NOT NULL, artist TEXT);
        CREATE INDEX IF NOT EXISTS idx_artists_id ON artists(reviewid);

        CREATE TABLE IF NOT EXISTS genres (reviewid TEXT NOT NULL, genre TEXT);
        CREATE INDEX IF NOT EXISTS idx_genres_id ON genres(reviewid);

        CREATE TABLE IF NOT EXISTS labels (reviewid TEXT NOT NULL, label TEXT);
        CREATE INDEX IF NOT EXISTS idx_labels_id ON labels(reviewid);

        CREATE TABLE IF NOT EXISTS years (reviewid TEXT NOT NULL, year TEXT);
        CREATE INDEX IF NOT EXISTS idx_years_id ON years(reviewid);

        CREATE TABLE IF NOT EXISTS content (reviewid TEXT NOT NULL, content TEXT);
        CREATE INDEX IF NOT EXISTS idx_content_id ON content(reviewid);
        ",
    )?;
    Ok(())
}

// ── Pages ──

pub fn insert_pages(conn: &Connection, pages: &[(String, String)]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare("INSERT OR IGNORE INTO pages (url, html) VALUES (?1, ?2)")?;
        for (url, html) in pages {
            count += stmt.execute(rusqlite::params![url, html])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub struct StoredPage {
    pub id: i64,
    pub url: String,
    pub html: String,
}

pub fn fetch_pages(conn: &Connection, limit: Option<usize>) -> Result<Vec<StoredPage>> {
    let sql = format!(
        "SELECT id, url, html FROM pages ORDER BY id{}",
        match limit {
            Some(n) => format!(" LIMIT {}", n),
            None => String::new(),
        }
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(StoredPage {
                id: row.get(0)?,
                url: row.get(1)?,
                html: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Record why a page could not be extracted.
pub fn mark_error(conn: &Connection, page_id: i64, message: &str) -> Result<()> {
    conn.execute(
        "UPDATE pages SET error = ?2 WHERE id = ?1",
        rusqlite::params![page_id, message],
    )?;
    Ok(())
}

// ── Extracted rows ──

const SIDE_TABLES: &[&str] = &["artists", "genres", "labels", "years", "content"];

/// Drop rows previously extracted from these pages and clear their errors.
fn clear_pages(conn: &Connection, pages: &[&StoredPage]) -> Result<()> {
    let mut side_stmts = SIDE_TABLES
        .iter()
        .map(|table| {
            conn.prepare(&format!(
                "DELETE FROM {} WHERE reviewid IN (SELECT reviewid FROM reviews WHERE url = ?1)",
                table
            ))
        })
        .collect::<rusqlite::Result<Vec<_>>>()?;
    let mut r_stmt = conn.prepare("DELETE FROM reviews WHERE url = ?1")?;
    let mut e_stmt = conn.prepare("UPDATE pages SET error = NULL WHERE id = ?1")?;

    for page in pages {
        for stmt in side_stmts.iter_mut() {
            stmt.execute([&page.url])?;
        }
        r_stmt.execute([&page.url])?;
        e_stmt.execute([page.id])?;
    }
    Ok(())
}

fn insert_compiled(conn: &Connection, reviews: &[CompiledReview]) -> Result<()> {
    let mut r_stmt = conn.prepare(
        "INSERT INTO reviews
         (reviewid, title, artist, url, score, best_new_music, author, author_type,
          pub_date, pub_weekday, pub_day, pub_month, pub_year)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13)",
    )?;
    let mut a_stmt = conn.prepare("INSERT INTO artists (reviewid, artist) VALUES (?1, ?2)")?;
    let mut g_stmt = conn.prepare("INSERT INTO genres (reviewid, genre) VALUES (?1, ?2)")?;
    let mut l_stmt = conn.prepare("INSERT INTO labels (reviewid, label) VALUES (?1, ?2)")?;
    let mut y_stmt = conn.prepare("INSERT INTO years (reviewid, year) VALUES (?1, ?2)")?;
    let mut c_stmt = conn.prepare("INSERT INTO content (reviewid, content) VALUES (?1, ?2)")?;

    for c in reviews {
        let r = &c.reviews;
        r_stmt.execute(rusqlite::params![
            r.reviewid, r.title, r.artist, r.url, r.score, r.best_new_music, r.author,
            r.author_type, r.pub_date, r.pub_weekday, r.pub_day, r.pub_month, r.pub_year,
        ])?;
        for a in &c.artists {
            a_stmt.execute(rusqlite::params![a.reviewid, a.artist])?;
        }
        for g in &c.genres {
            g_stmt.execute(rusqlite::params![g.reviewid, g.genre])?;
        }
        for l in &c.labels {
            l_stmt.execute(rusqlite::params![l.reviewid, l.label])?;
        }
        y_stmt.execute(rusqlite::params![c.years.reviewid, c.years.year])?;
        c_stmt.execute(rusqlite::params![c.content.reviewid, c.content.content])?;
    }
    Ok(())
}

pub fn save_compiled(conn: &Connection, reviews: &[CompiledReview]) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    insert_compiled(&tx, reviews)?;
    tx.commit()?;
    Ok(())
}

/// Replace everything stored for `pages` with a fresh extraction result,
/// in one transaction. Rows from other pages are untouched.
pub fn replace_page_results(
    conn: &Connection,
    pages: &[&StoredPage],
    reviews: &[CompiledReview],
    errors: &[(i64, String)],
) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    clear_pages(&tx, pages)?;
    insert_compiled(&tx, reviews)?;
    for (page_id, message) in errors {
        mark_error(&tx, *page_id, message)?;
    }
    tx.commit()?;
    Ok(())
}

// ── Stats ──

pub struct Stats {
    pub pages: usize,
    pub reviews: usize,
    pub errors: usize,
    pub artists: usize,
    pub genres: usize,
    pub labels: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let count = |sql: &str| -> rusqlite::Result<usize> { conn.query_row(sql, [], |r| r.get(0)) };
    Ok(Stats {
        pages: count("SELECT COUNT(*) FROM pages")?,
        reviews: count("SELECT COUNT(*) FROM reviews")?,
        errors: count("SELECT COUNT(*) FROM pages WHERE error IS NOT NULL")?,
        artists: count("SELECT COUNT(DISTINCT artist) FROM artists")?,
        genres: count("SELECT COUNT(DISTINCT genre) FROM genres")?,
        labels: count("SELECT COUNT(DISTINCT label) FROM labels")?,
    })
}
