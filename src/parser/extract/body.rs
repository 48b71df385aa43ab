use crate::error::ExtractError;
use crate::parser::tree::{DocumentTree, Query, TreeNode};

const REVIEW_TEXT: Query = Query::new("div", &["review-detail__text"]);
const PARAGRAPH: Query = Query::tag("p");

/// Raw text of every paragraph in the review body, joined with no separator.
pub fn content<T: DocumentTree>(tree: &T) -> Result<String, ExtractError> {
    let body = tree
        .find(&REVIEW_TEXT)
        .ok_or(ExtractError::missing("div.review-detail__text"))?;
    Ok(body
        .find_all(&PARAGRAPH)
        .iter()
        .map(|p| p.text_content())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::HtmlTree;

    #[test]
    fn paragraphs_joined_without_separator() {
        let t = HtmlTree::parse(
            r#"<div class="review-detail__text"><p>Great</p>
               <p>album</p></div>"#,
        );
        assert_eq!(content(&t).unwrap(), "Greatalbum");
    }

    #[test]
    fn nested_paragraphs_and_inline_markup() {
        let t = HtmlTree::parse(
            r#"<div class="review-detail__text clearfix"><div class="contents">
               <p>Björk’s <em>Vulnicura</em>.</p><aside>skip me</aside><p>Then live.</p>
               </div></div>"#,
        );
        assert_eq!(content(&t).unwrap(), "Björk’s Vulnicura.Then live.");
    }

    #[test]
    fn body_without_paragraphs_is_empty() {
        let t = HtmlTree::parse(r#"<div class="review-detail__text"></div>"#);
        assert_eq!(content(&t).unwrap(), "");
    }

    #[test]
    fn body_required() {
        let t = HtmlTree::parse("<p>orphan</p>");
        assert_eq!(content(&t), Err(ExtractError::missing("div.review-detail__text")));
    }
}
