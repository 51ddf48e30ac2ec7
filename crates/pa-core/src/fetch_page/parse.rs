//! Extract h1, title, and meta description from an HTML body.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::PageMetadata;

static SELECTOR_H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static SELECTOR_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static SELECTOR_DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"meta[name="description"]"#).unwrap());

/// Builds [`PageMetadata`] from a response status and body.
///
/// The HTML5 parser recovers from any input, so this never fails; missing
/// elements or a missing `content` attribute give empty strings.
pub fn parse_html(status_code: u32, body: &str) -> PageMetadata {
    let document = Html::parse_document(body);

    let h1 = first_text(&document, &SELECTOR_H1);
    let title = first_text(&document, &SELECTOR_TITLE);
    let description = document
        .select(&SELECTOR_DESCRIPTION)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    PageMetadata {
        status_code,
        h1,
        title,
        description,
    }
}

fn first_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
