use crate::parser::tree::{DocumentTree, Query};

use super::optional_items;

const GENRE_LIST: Query = Query::new("ul", &["genre-list"]);
const LABEL_LIST: Query = Query::new("span", &["label-list"]);

/// Normalized genres, or `[None]` when the page lists none.
pub fn genres<T: DocumentTree>(tree: &T) -> Vec<Option<String>> {
    optional_items(tree.find(&GENRE_LIST))
}

/// Normalized record labels, or `[None]` when the page lists none.
pub fn labels<T: DocumentTree>(tree: &T) -> Vec<Option<String>> {
    optional_items(tree.find(&LABEL_LIST))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tree::HtmlTree;

    #[test]
    fn genres_listed() {
        let t = HtmlTree::parse(
            r#"<ul class="genre-list"><li><a>Electronic</a></li><li><a>Experimental</a></li></ul>"#,
        );
        assert_eq!(
            genres(&t),
            vec![Some("electronic".to_string()), Some("experimental".to_string())]
        );
    }

    #[test]
    fn absent_lists_hold_one_none() {
        let t = HtmlTree::parse("<p>nothing here</p>");
        assert_eq!(genres(&t), vec![None]);
        assert_eq!(labels(&t), vec![None]);
    }

    #[test]
    fn empty_list_treated_as_absent() {
        let t = HtmlTree::parse(r#"<ul class="genre-list"></ul><span class="label-list"></span>"#);
        assert_eq!(genres(&t), vec![None]);
        assert_eq!(labels(&t), vec![None]);
    }

    #[test]
    fn labels_inside_span() {
        let t = HtmlTree::parse(
            r#"<div><span class="label-list"><li>One Little Indian</li><li>Wellhart</li></span></div>"#,
        );
        assert_eq!(
            labels(&t),
            vec![Some("one little indian".to_string()), Some("wellhart".to_string())]
        );
    }

    #[test]
    fn empty_string_is_not_absent() {
        let t = HtmlTree::parse(r#"<ul class="genre-list"><li></li></ul>"#);
        assert_eq!(genres(&t), vec![Some(String::new())]);
    }
}
