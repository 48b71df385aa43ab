use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Element lookup by tag name, optionally restricted to elements carrying
/// any one of `classes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    pub tag: &'static str,
    pub classes: &'static [&'static str],
}

impl Query {
    pub const fn new(tag: &'static str, classes: &'static [&'static str]) -> Self {
        Query { tag, classes }
    }

    pub const fn tag(tag: &'static str) -> Self {
        Query { tag, classes: &[] }
    }

    /// CSS selector list equivalent: `ul.a, ul.b`.
    pub fn css(&self) -> String {
        if self.classes.is_empty() {
            return self.tag.to_string();
        }
        self.classes
            .iter()
            .map(|class| format!("{}.{}", self.tag, class))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A parsed page that can be searched by [`Query`].
pub trait DocumentTree {
    type Node<'a>: TreeNode<'a>
    where
        Self: 'a;

    /// Matching elements in document order.
    fn find_all(&self, query: &Query) -> Vec<Self::Node<'_>>;

    fn find(&self, query: &Query) -> Option<Self::Node<'_>> {
        self.find_all(query).into_iter().next()
    }
}

/// An element of a [`DocumentTree`].
pub trait TreeNode<'a>: Sized {
    /// Matching descendants in document order.
    fn find_all(&self, query: &Query) -> Vec<Self>;

    fn find(&self, query: &Query) -> Option<Self> {
        self.find_all(query).into_iter().next()
    }

    /// All descendant text, concatenated without separators.
    fn text_content(&self) -> String;

    /// The first child node if it is a text node.
    fn first_text(&self) -> Option<&'a str>;

    fn attribute(&self, name: &str) -> Option<&'a str>;
}

/// [`DocumentTree`] over an html5ever-parsed document.
pub struct HtmlTree {
    html: Html,
}

impl HtmlTree {
    pub fn parse(raw_html: &str) -> Self {
        HtmlTree {
            html: Html::parse_document(raw_html),
        }
    }
}

fn selector(query: &Query) -> Option<Selector> {
    let css = query.css();
    // bound so the parse error borrowing `css` drops first
    let parsed = match Selector::parse(&css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            warn!(selector = %css, error = ?e, "invalid selector");
            None
        }
    };
    parsed
}

impl DocumentTree for HtmlTree {
    type Node<'a> = ElementRef<'a>;

    fn find_all(&self, query: &Query) -> Vec<ElementRef<'_>> {
        match selector(query) {
            Some(sel) => self.html.select(&sel).collect(),
            None => Vec::new(),
        }
    }
}

impl<'a> TreeNode<'a> for ElementRef<'a> {
    fn find_all(&self, query: &Query) -> Vec<Self> {
        match selector(query) {
            Some(sel) => self.select(&sel).collect(),
            None => Vec::new(),
        }
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn first_text(&self) -> Option<&'a str> {
        self.children()
            .next()
            .and_then(|node| node.value().as_text())
            .map(|text| &**text)
    }

    fn attribute(&self, name: &str) -> Option<&'a str> {
        self.value().attr(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <ul class="artist-list"><li>First</li></ul>
        <ul class="artist-links"><li>Second</li><li>Third</li></ul>
        <span class="score">8.1<b>/10</b></span>
        <span class="empty"></span>
        <time class="pub-date" datetime="2017-01-06T06:00:04-05:00">Jan 6</time>
    </body></html>"#;

    #[test]
    fn css_for_class_list() {
        assert_eq!(Query::tag("p").css(), "p");
        assert_eq!(Query::new("span", &["score"]).css(), "span.score");
        assert_eq!(
            Query::new("ul", &["artist-links", "artist-list"]).css(),
            "ul.artist-links, ul.artist-list"
        );
    }

    #[test]
    fn class_list_matches_any_in_document_order() {
        let tree = HtmlTree::parse(PAGE);
        let lists = tree.find_all(&Query::new("ul", &["artist-links", "artist-list"]));
        assert_eq!(lists.len(), 2);
        let first = tree
            .find(&Query::new("ul", &["artist-links", "artist-list"]))
            .unwrap();
        assert_eq!(first.text_content(), "First");
    }

    #[test]
    fn descendants_of_node() {
        let tree = HtmlTree::parse(PAGE);
        let list = tree.find(&Query::new("ul", &["artist-links"])).unwrap();
        let items: Vec<String> = list
            .find_all(&Query::tag("li"))
            .iter()
            .map(|li| li.text_content())
            .collect();
        assert_eq!(items, vec!["Second", "Third"]);
    }

    #[test]
    fn first_text_vs_text_content() {
        let tree = HtmlTree::parse(PAGE);
        let score = tree.find(&Query::new("span", &["score"])).unwrap();
        assert_eq!(score.first_text(), Some("8.1"));
        assert_eq!(score.text_content(), "8.1/10");

        let empty = tree.find(&Query::new("span", &["empty"])).unwrap();
        assert_eq!(empty.first_text(), None);
        assert_eq!(empty.text_content(), "");
    }

    #[test]
    fn attribute_lookup() {
        let tree = HtmlTree::parse(PAGE);
        let time = tree.find(&Query::new("time", &["pub-date"])).unwrap();
        assert_eq!(time.attribute("datetime"), Some("2017-01-06T06:00:04-05:00"));
        assert_eq!(time.attribute("title"), None);
    }

    #[test]
    fn invalid_query_matches_nothing() {
        let tree = HtmlTree::parse(PAGE);
        assert!(tree.find_all(&Query::new("span", &["1bad class"])).is_empty());
    }

    #[test]
    fn missing_element() {
        let tree = HtmlTree::parse(PAGE);
        assert!(tree.find(&Query::new("ul", &["genre-list"])).is_none());
        assert!(tree.find_all(&Query::tag("article")).is_empty());
    }
}
