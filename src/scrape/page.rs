//! Reading title and visible text out of markup

use scraper::{Html, Node, Selector};

/// Elements whose text is never visible
const INVISIBLE: &[&str] = &["script", "style", "noscript", "template"];

/// Title and visible text of a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    pub title: String,
    pub text: String,
}

/// Parses markup and returns its title and visible body text
///
/// Text inside script, style, noscript and template elements is skipped and
/// whitespace is collapsed. A document without a body yields its root text.
///
/// # Example
///
/// ```
/// use profile_lens::scrape::read_page;
///
/// let page = read_page("<html><head><title> Jane </title></head><body><p>Hi</p><script>x()</script></body></html>");
/// assert_eq!(page.title, "Jane");
/// assert_eq!(page.text, "Hi");
/// ```
pub fn read_page(markup: &str) -> PageText {
    let document = Html::parse_document(markup);

    PageText {
        title: extract_title(&document).unwrap_or_default(),
        text: visible_text(&document),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .filter(|s| !s.is_empty())
}

fn visible_text(document: &Html) -> String {
    let root = Selector::parse("body")
        .ok()
        .and_then(|body| document.select(&body).next())
        .unwrap_or_else(|| document.root_element());

    let mut pieces = Vec::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| INVISIBLE.contains(&el.name()))
        });
        if !hidden && !text.trim().is_empty() {
            pieces.push(text.trim());
        }
    }

    collapse_whitespace(&pieces.join(" "))
}

/// Collapses runs of whitespace into single spaces and trims the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
