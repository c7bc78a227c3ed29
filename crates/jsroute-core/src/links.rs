//! Script link discovery in HTML pages.

use crate::fetch::{Accept, Fetcher};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Absolute script URLs referenced by `html`, in document order, not deduplicated.
///
/// Candidates are `<script src>` and `<link rel="stylesheet" href="*.js">`.
/// The second form almost never occurs in practice but is accepted as-is.
/// A resolved link is kept when it ends in `.js` or the tag's `type`
/// mentions `javascript`.
pub fn extract_script_links(html: &str, base_url: &str) -> Vec<String> {
    let base = match Url::parse(base_url) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!("invalid base URL {}: {}", base_url, e);
            return Vec::new();
        }
    };
    let Ok(selector) = Selector::parse("script[src], link[href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();
    for element in document.select(&selector) {
        let Some(reference) = candidate_reference(&element) else {
            continue;
        };
        let Ok(resolved) = base.join(reference) else {
            tracing::debug!("cannot resolve {:?} against {}", reference, base);
            continue;
        };
        let resolved: String = resolved.into();
        if resolved.ends_with(".js") || declares_javascript(&element) {
            links.push(resolved);
        }
    }
    links
}

/// The raw `src`/`href` of a tag that may point at a script.
fn candidate_reference<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    let tag = element.value();
    match tag.name() {
        "script" => tag.attr("src").filter(|s| !s.is_empty()),
        "link" => {
            let rel: Vec<&str> = tag.attr("rel")?.split_whitespace().collect();
            if rel != ["stylesheet"] {
                return None;
            }
            tag.attr("href").filter(|h| !h.is_empty() && h.ends_with(".js"))
        }
        _ => None,
    }
}

fn declares_javascript(element: &ElementRef<'_>) -> bool {
    element
        .value()
        .attr("type")
        .map(|t| t.to_ascii_lowercase().contains("javascript"))
        .unwrap_or(false)
}

/// Fetches `page_url` and returns the script links it references.
///
/// Network and HTTP failures are logged and produce an empty list.
pub fn discover_script_links<F: Fetcher + ?Sized>(fetcher: &mut F, page_url: &str) -> Vec<String> {
    tracing::info!("parsing page {}", page_url);
    let response = match fetcher.get(page_url, None, None, Accept::Page) {
        Ok(r) => r,
        Err(e) if e.is_network() => {
            tracing::warn!("page fetch failed {}: {}", page_url, e);
            return Vec::new();
        }
        Err(e) => {
            tracing::info!("page skipped {}: {}", page_url, e);
            return Vec::new();
        }
    };
    tracing::debug!(
        "HTTP {} from {} ({} bytes)",
        response.status,
        page_url,
        response.body.len()
    );
    let links = extract_script_links(&response.text(), page_url);
    tracing::info!("found {} script links on {}", links.len(), page_url);
    links
}
