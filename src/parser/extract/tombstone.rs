use crate::error::ExtractError;
use crate::parser::text::{clean_year, normalize};
use crate::parser::tree::{DocumentTree, Query, TreeNode};

use super::item_texts;

const TITLE: Query = Query::new("h1", &["single-album-tombstone__review-title"]);
const ARTIST_LIST: Query = Query::new("ul", &["artist-links", "artist-list"]);
const SCORE: Query = Query::new("span", &["score"]);
const BNM: Query = Query::new("p", &["bnm-txt"]);
const YEAR: Query = Query::new("span", &["single-album-tombstone__meta-year"]);

pub fn title<T: DocumentTree>(tree: &T) -> Result<String, ExtractError> {
    tree.find(&TITLE)
        .map(|h1| normalize(&h1.text_content()))
        .ok_or(ExtractError::missing("h1.single-album-tombstone__review-title"))
}

/// Normalized artist names; at least one.
pub fn artists<T: DocumentTree>(tree: &T) -> Result<Vec<String>, ExtractError> {
    let list = tree.find(&ARTIST_LIST).ok_or(ExtractError::missing("ul.artist-list"))?;
    let artists = item_texts(&list);
    if artists.is_empty() {
        return Err(ExtractError::missing("ul.artist-list li"));
    }
    Ok(artists)
}

/// Leading text of the first `span.score`, e.g. `"8.1"`.
pub fn score<T: DocumentTree>(tree: &T) -> Result<f64, ExtractError> {
    let span = tree.find(&SCORE).ok_or(ExtractError::missing("span.score"))?;
    let raw = span.first_text().unwrap_or_default();
    raw.trim()
        .parse::<f64>()
        .map_err(|e| ExtractError::parse("score", raw, e))
}

/// Presence of the best-new-music badge; its text is irrelevant.
pub fn best_new_music<T: DocumentTree>(tree: &T) -> bool {
    tree.find(&BNM).is_some()
}

pub fn year<T: DocumentTree>(tree: &T) -> Result<String, ExtractError> {
    tree.find(&YEAR)
        .map(|span| clean_year(&span.text_content()))
        .ok_or(ExtractError::missing("span.single-album-tombstone__meta-year"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::HtmlTree;

    fn tree(body: &str) -> HtmlTree {
        HtmlTree::parse(&format!("<html><body>{}</body></html>", body))
    }

    #[test]
    fn title_normalized() {
        let t = tree(r#"<h1 class="single-album-tombstone__review-title">Ágætis Byrjun</h1>"#);
        assert_eq!(title(&t).unwrap(), "gtis byrjun");
    }

    #[test]
    fn artists_from_either_class() {
        let links = tree(r#"<ul class="artist-links"><li><a>Björk</a></li><li>Arca</li></ul>"#);
        assert_eq!(artists(&links).unwrap(), vec!["bjrk", "arca"]);

        let list = tree(r#"<ul class="artist-list"><li>Boards of Canada</li></ul>"#);
        assert_eq!(artists(&list).unwrap(), vec!["boards of canada"]);
    }

    #[test]
    fn artists_empty_list_rejected() {
        let t = tree(r#"<ul class="artist-list"></ul>"#);
        assert!(matches!(artists(&t), Err(ExtractError::MalformedDocument { .. })));
    }

    #[test]
    fn score_first_text_node_only() {
        let t = tree(r#"<span class="score"> 8.1 <small>/10</small></span>"#);
        assert_eq!(score(&t).unwrap(), 8.1);
    }

    #[test]
    fn score_missing_vs_unparseable() {
        assert_eq!(score(&tree("<p>no score</p>")), Err(ExtractError::missing("span.score")));
        assert!(matches!(
            score(&tree(r#"<span class="score">N/A</span>"#)),
            Err(ExtractError::FieldParse { field: "score", .. })
        ));
        assert!(matches!(
            score(&tree(r#"<span class="score"><b>8.1</b></span>"#)),
            Err(ExtractError::FieldParse { field: "score", .. })
        ));
    }

    #[test]
    fn bnm_presence_only() {
        assert!(best_new_music(&tree(r#"<p class="bnm-txt"></p>"#)));
        assert!(best_new_music(&tree(r#"<p class="bnm-txt">Best new reissue</p>"#)));
        assert!(!best_new_music(&tree(r#"<div class="bnm-txt">Best new music</div>"#)));
    }

    #[test]
    fn year_raw_text() {
        let t = tree(r#"<span class="single-album-tombstone__meta-year">2005 • 2006</span>"#);
        assert_eq!(year(&t).unwrap(), "20052006");
    }
}
