use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::{Captures, Regex};

/// ISO-8601 calendar date with optional time and UTC offset, in extended
/// (`2017-01-06T06:00:04-05:00`) or basic (`20170106T060004-0500`) form.
/// Time may stop at hours or minutes; offset may be `Z`, `±hh` or `±hh[:]mm`.
static ISO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})-?(\d{2})-?(\d{2})(?:[T ](\d{2})(?::?(\d{2})(?::?(\d{2})(?:[.,](\d{1,9})\d*)?)?)?(Z|[+-]\d{2}(?::?\d{2})?)?)?$",
    )
    .unwrap()
});

/// Publication timestamp. Keeps the page's UTC offset when it carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedAt {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

fn number(caps: &Captures, i: usize) -> Option<u32> {
    match caps.get(i) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw == "Z" {
        return FixedOffset::east_opt(0);
    }
    let digits = raw[1..].replace(':', "");
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = match &digits[2..] {
        "" => 0,
        mm => mm.parse().ok()?,
    };
    if minutes > 59 {
        return None;
    }
    let secs = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if raw.starts_with('-') { -secs } else { secs })
}

impl PublishedAt {
    /// Parse an ISO-8601 datetime (or bare date). `None` if it is not one.
    pub fn parse_iso(raw: &str) -> Option<Self> {
        let caps = ISO_RE.captures(raw.trim())?;
        let date = NaiveDate::from_ymd_opt(caps[1].parse().ok()?, number(&caps, 2)?, number(&caps, 3)?)?;
        let nanos = match caps.get(7) {
            Some(m) => {
                let digits = m.as_str();
                digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
            }
            None => 0,
        };
        let local = date.and_hms_nano_opt(
            number(&caps, 4)?,
            number(&caps, 5)?,
            number(&caps, 6)?,
            nanos,
        )?;
        match caps.get(8) {
            Some(m) => {
                let offset = parse_offset(m.as_str())?;
                offset
                    .from_local_datetime(&local)
                    .single()
                    .map(PublishedAt::Zoned)
            }
            None => Some(PublishedAt::Naive(local)),
        }
    }

    /// Wall-clock time as written on the page, offset discarded.
    pub fn local(&self) -> NaiveDateTime {
        match self {
            PublishedAt::Zoned(dt) => dt.naive_local(),
            PublishedAt::Naive(dt) => *dt,
        }
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        match self {
            PublishedAt::Zoned(dt) => Some(*dt.offset()),
            PublishedAt::Naive(_) => None,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.local().date()
    }

    /// 0 = Monday.
    pub fn weekday(&self) -> u32 {
        self.date().weekday().num_days_from_monday()
    }
}

impl fmt::Display for PublishedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishedAt::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            PublishedAt::Naive(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

/// Everything extracted from one review page.
///
/// Text fields other than `source_url`, `content` and `year` are
/// ASCII-folded and lower-cased. `genres` and `labels` are never empty:
/// a page without them yields `vec![None]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub review_id: String,
    pub source_url: String,
    pub title: String,
    pub artists: Vec<String>,
    pub artist_display: String,
    pub author: String,
    pub author_role: Option<String>,
    pub score: f64,
    pub best_new_music: bool,
    pub content: String,
    pub genres: Vec<Option<String>>,
    pub labels: Vec<Option<String>>,
    pub year: String,
    pub published_at: PublishedAt,
}
