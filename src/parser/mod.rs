pub mod extract;
pub mod text;
pub mod tree;

use tracing::debug;

use crate::error::ExtractError;
use crate::record::ReviewRecord;
use tree::HtmlTree;

/// Parse one review page and extract its record.
pub fn extract(raw_html: &str, source_url: &str) -> Result<ReviewRecord, ExtractError> {
    let tree = HtmlTree::parse(raw_html);
    let record = extract::extract_all(&tree, source_url)?;
    debug!(reviewid = %record.review_id, url = source_url, "extracted review");
    Ok(record)
}
