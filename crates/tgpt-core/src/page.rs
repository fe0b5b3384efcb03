//! Flattening of wiki storage-format HTML into plain searchable text.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Item, RawPage};

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</?p(\s[^>]*)?>").expect("static regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

/// Paragraph tags become spaces, any other tag is dropped, and runs of
/// whitespace collapse to a single space.
pub fn flatten_html(body: &str) -> String {
    let spaced = PARAGRAPH.replace_all(body, " ");
    let stripped = TAG.replace_all(&spaced, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl From<RawPage> for Item {
    fn from(page: RawPage) -> Self {
        Item { id: page.id, text: flatten_html(&page.body), title: page.title, url: page.url }
    }
}
