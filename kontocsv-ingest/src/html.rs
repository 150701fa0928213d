//! Positioned text fragments lifted from MuPDF-style HTML page dumps.
//!
//! PyMuPDF's `get_text("html")` and `mutool convert -F html` both emit one
//! `<div id="pageN">` per page, with an absolutely positioned `<p>` per text
//! line and styled `<span>`s inside. That positioning is the only structure
//! the statement gives us.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ParseError;

static LEFT_PT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"left:(\d+)pt").unwrap());

/// One positioned text span from a page, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    /// Style of the containing paragraph; carries the `left:<n>pt` offset.
    pub par_style: String,
    /// Style of the text span; distinguishes body text from page furniture.
    pub span_style: String,
}

impl Fragment {
    /// Horizontal offset of the containing paragraph, in layout points.
    pub fn left_offset(&self) -> Result<u32, ParseError> {
        LEFT_PT
            .captures(&self.par_style)
            .and_then(|caps| caps[1].parse().ok())
            .ok_or_else(|| ParseError::MissingLayoutOffset(self.par_style.clone()))
    }
}

/// Split a document dump into per-page HTML strings, in page order.
pub fn document_pages(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut pages = Vec::new();
    if let Ok(selector) = Selector::parse("div[id^=page]") {
        for div in doc.select(&selector) {
            pages.push(div.html());
        }
    }
    pages
}

/// Lift the styled text spans out of one page, in emission order.
///
/// Paragraphs without a styled span are layout artifacts (images, rules) and
/// are dropped here; filtering the survivors by text style happens during
/// reconstruction.
pub fn page_fragments(page_html: &str) -> Vec<Fragment> {
    let doc = Html::parse_document(page_html);
    let mut fragments = Vec::new();

    let (Ok(paragraphs), Ok(spans)) = (Selector::parse("p"), Selector::parse("span")) else {
        return fragments;
    };

    for par in doc.select(&paragraphs) {
        let Some(span) = par.select(&spans).next() else {
            continue;
        };
        let Some(par_style) = par.value().attr("style") else {
            continue;
        };
        let Some(span_style) = span.value().attr("style") else {
            continue;
        };
        fragments.push(Fragment {
            text: span.text().collect(),
            par_style: par_style.to_string(),
            span_style: span_style.to_string(),
        });
    }

    fragments
}
