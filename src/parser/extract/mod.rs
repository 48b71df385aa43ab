pub mod author;
pub mod body;
pub mod meta;
pub mod taxonomy;
pub mod tombstone;

use super::text::normalize;
use super::tree::{DocumentTree, Query, TreeNode};
use crate::error::ExtractError;
use crate::record::ReviewRecord;

const LIST_ITEM: Query = Query::tag("li");

/// Run every field extractor against `tree`. Fails on the first missing or
/// unparseable required field; never returns a partial record.
pub fn extract_all<T: DocumentTree>(
    tree: &T,
    source_url: &str,
) -> Result<ReviewRecord, ExtractError> {
    let review_id = meta::review_id(tree)?;
    let title = tombstone::title(tree)?;
    let artists = tombstone::artists(tree)?;
    let (author, author_role) = author::extract(tree)?;
    let score = tombstone::score(tree)?;
    let best_new_music = tombstone::best_new_music(tree);
    let content = body::content(tree)?;
    let genres = taxonomy::genres(tree);
    let labels = taxonomy::labels(tree);
    let year = tombstone::year(tree)?;
    let published_at = meta::published_at(tree)?;

    Ok(ReviewRecord {
        review_id,
        source_url: source_url.to_string(),
        title,
        artist_display: artists.join(", "),
        artists,
        author,
        author_role,
        score,
        best_new_music,
        content,
        genres,
        labels,
        year,
        published_at,
    })
}

/// Normalized text of each `<li>` under `node`.
fn item_texts<'a, N: TreeNode<'a>>(node: &N) -> Vec<String> {
    node.find_all(&LIST_ITEM)
        .iter()
        .map(|li| normalize(&li.text_content()))
        .collect()
}

/// Items of an optional list; a missing or empty list becomes `[None]`.
fn optional_items<'a, N: TreeNode<'a>>(node: Option<N>) -> Vec<Option<String>> {
    let items: Vec<Option<String>> = node
        .map(|n| item_texts(&n).into_iter().map(Some).collect())
        .unwrap_or_default();
    if items.is_empty() {
        vec![None]
    } else {
        items
    }
}

// ── Tests ──
