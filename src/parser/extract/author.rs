use crate::error::ExtractError;
use crate::parser::text::normalize;
use crate::parser::tree::{DocumentTree, Query, TreeNode};

const DISPLAY_NAME: Query = Query::new("a", &["authors-detail__display-name"]);
const ROLE: Query = Query::new("span", &["authors-detail__title"]);

/// Byline name and, when shown, the staff role (`"contributor"`, ...).
pub fn extract<T: DocumentTree>(tree: &T) -> Result<(String, Option<String>), ExtractError> {
    let name = tree
        .find(&DISPLAY_NAME)
        .map(|a| normalize(&a.text_content()))
        .ok_or(ExtractError::missing("a.authors-detail__display-name"))?;
    let role = tree.find(&ROLE).map(|span| normalize(&span.text_content()));
    Ok((name, role))
}
