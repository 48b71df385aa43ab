use crate::error::ExtractError;
use crate::parser::text::id_suffix;
use crate::parser::tree::{DocumentTree, Query, TreeNode};
use crate::record::PublishedAt;

const ARTICLE: Query = Query::tag("article");
const PUB_DATE: Query = Query::new("time", &["pub-date"]);

/// Join key for every row: suffix of the first `<article>` id.
pub fn review_id<T: DocumentTree>(tree: &T) -> Result<String, ExtractError> {
    let article = tree.find(&ARTICLE).ok_or(ExtractError::missing("article"))?;
    let id = article
        .attribute("id")
        .ok_or(ExtractError::missing("article id"))?;
    let suffix = id_suffix(id);
    if suffix.is_empty() {
        return Err(ExtractError::missing("article id"));
    }
    Ok(suffix.to_string())
}

pub fn published_at<T: DocumentTree>(tree: &T) -> Result<PublishedAt, ExtractError> {
    let time = tree.find(&PUB_DATE).ok_or(ExtractError::missing("time.pub-date"))?;
    let raw = time
        .attribute("datetime")
        .ok_or(ExtractError::missing("time.pub-date datetime"))?;
    PublishedAt::parse_iso(raw)
        .ok_or_else(|| ExtractError::parse("pub_date", raw, "not an ISO-8601 datetime"))
}
