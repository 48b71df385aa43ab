use chrono::Datelike;
use serde::Serialize;

use crate::record::ReviewRecord;

/// `reviews` table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub reviewid: String,
    pub artist: String,
    pub title: String,
    pub url: String,
    pub score: f64,
    pub best_new_music: bool,
    pub author: String,
    pub author_type: Option<String>,
    pub pub_date: String,
    pub pub_weekday: u32,
    pub pub_day: u32,
    pub pub_month: u32,
    pub pub_year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistRow {
    pub reviewid: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRow {
    pub reviewid: String,
    pub genre: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRow {
    pub reviewid: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRow {
    pub reviewid: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRow {
    pub reviewid: String,
    pub content: String,
}

/// All rows produced by one review, grouped by destination table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledReview {
    pub reviews: ReviewRow,
    pub artists: Vec<ArtistRow>,
    pub genres: Vec<GenreRow>,
    pub labels: Vec<LabelRow>,
    /// One row even when the year text names several years.
    pub years: YearRow,
    pub content: ContentRow,
}

impl ReviewRecord {
    pub fn compile(&self) -> CompiledReview {
        let id = &self.review_id;
        let date = self.published_at.date();

        CompiledReview {
            reviews: ReviewRow {
                reviewid: id.clone(),
                artist: self.artist_display.clone(),
                title: self.title.clone(),
                url: self.source_url.clone(),
                score: self.score,
                best_new_music: self.best_new_music,
                author: self.author.clone(),
                author_type: self.author_role.clone(),
                pub_date: date.to_string(),
                pub_weekday: self.published_at.weekday(),
                pub_day: date.day(),
                pub_month: date.month(),
                pub_year: date.year(),
            },
            artists: self
                .artists
                .iter()
                .map(|artist| ArtistRow {
                    reviewid: id.clone(),
                    artist: artist.clone(),
                })
                .collect(),
            genres: self
                .genres
                .iter()
                .map(|genre| GenreRow {
                    reviewid: id.clone(),
                    genre: genre.clone(),
                })
                .collect(),
            labels: self
                .labels
                .iter()
                .map(|label| LabelRow {
                    reviewid: id.clone(),
                    label: label.clone(),
                })
                .collect(),
            years: YearRow {
                reviewid: id.clone(),
                year: self.year.clone(),
            },
            content: ContentRow {
                reviewid: id.clone(),
                content: self.content.clone(),
            },
        }
    }
}
