// src/extract/html.rs
// =============================================================================
// This module turns an HTML page into the pieces a scrape returns:
// - the page title
// - the readable content as Markdown
// - the links on the page, split into internal and external
//
// We use the `scraper` crate to parse the HTML (html5ever underneath), and
// `html2md` to write the Markdown. Before conversion the document is cleaned:
// - scripts, styles, <head> and form controls are dropped
// - link and image targets are resolved against the page URL
// - nested tables are flattened into the outer cell
// - nesting deeper than MAX_NESTING keeps its text but loses its tags
//
// The cleaning pass walks the tree with an explicit stack, so pathologically
// deep pages cannot exhaust the call stack.
// =============================================================================

use std::collections::HashSet;

use scraper::{ElementRef, Html, Node, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use super::markdown::tidy_lines;

// Elements whose content never reaches the output
const SKIPPED_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "svg", "iframe", "canvas", "object",
    "button", "select", "input", "textarea",
];

// Elements without children or closing tag
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "link", "meta", "source", "track", "wbr",
];

const TABLE_PARTS: &[&str] = &[
    "thead", "tbody", "tfoot", "tr", "td", "th", "caption", "colgroup", "col",
];

// Attributes the converter reads; everything else is dropped
const KEPT_ATTRIBUTES: &[&str] = &["href", "src", "alt", "start"];

// Deepest element that keeps its tag in the cleaned document
const MAX_NESTING: usize = 128;

/// Links found on a page, absolute and without fragments.
///
/// A link is internal when its host matches the host of the page it was
/// found on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub internal: Vec<String>,
    pub external: Vec<String>,
}

impl PageLinks {
    pub fn len(&self) -> usize {
        self.internal.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// Everything extracted from one HTML document.
#[derive(Debug, Clone, Default)]
pub struct ExtractedPage {
    pub title: Option<String>,
    pub markdown: String,
    pub links: PageLinks,
}

// Parses the document once and pulls out title, Markdown and links
pub fn extract_page(html: &str, base_url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);

    ExtractedPage {
        title: extract_title(&document),
        markdown: render_markdown(&document, Some(base_url)),
        links: extract_links(&document, base_url),
    }
}

/// Converts an HTML document to Markdown.
///
/// When `base_url` is given, relative link and image targets are resolved
/// against it; otherwise they are kept as written.
pub fn html_to_markdown(html: &str, base_url: Option<&Url>) -> String {
    let document = Html::parse_document(html);
    render_markdown(&document, base_url)
}

fn render_markdown(document: &Html, base_url: Option<&Url>) -> String {
    let cleaned = clean_html(document, base_url);
    tidy_lines(&html2md::parse_html(&cleaned))
}

// Returns the text of the first <title> element, whitespace collapsed
fn extract_title(document: &Html) -> Option<String> {
    let title = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "title")?;

    let text = collapse_whitespace(&title.text().collect::<String>());
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// Collects every http(s) link of the page in document order, deduplicated
fn extract_links(document: &Html, base_url: &Url) -> PageLinks {
    let mut links = PageLinks::default();

    let selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    let mut seen = HashSet::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(mut url) = resolve_url(base_url, href) else {
            continue;
        };
        if !is_http_url(&url) {
            continue;
        }
        url.set_fragment(None);

        let absolute = url.to_string();
        if !seen.insert(absolute.clone()) {
            continue;
        }

        if url.host_str() == base_url.host_str() {
            links.internal.push(absolute);
        } else {
            links.external.push(absolute);
        }
    }

    links
}

// One step of the cleaning walk
enum Visit<'a> {
    Enter(ElementRef<'a>),
    Text(&'a str),
    Leave {
        name: &'a str,
        emitted: bool,
        table: bool,
    },
}

// Re-serializes the document with only what the converter should see
fn clean_html(document: &Html, base_url: Option<&Url>) -> String {
    let mut out = String::new();
    let mut stack = vec![Visit::Enter(document.root_element())];
    let mut depth = 0;
    let mut open_tables = 0;

    while let Some(visit) = stack.pop() {
        let element = match visit {
            Visit::Text(text) => {
                push_escaped(&mut out, text, false);
                continue;
            }
            Visit::Leave {
                name,
                emitted,
                table,
            } => {
                if table {
                    open_tables -= 1;
                }
                if emitted {
                    depth -= 1;
                    out.push_str("</");
                    out.push_str(name);
                    out.push('>');
                }
                continue;
            }
            Visit::Enter(element) => element,
        };

        let name = element.value().name();
        if SKIPPED_TAGS.contains(&name) {
            continue;
        }

        let attributes = kept_attributes(element, base_url);
        let has_target = attributes.iter().any(|(key, _)| *key == "href" || *key == "src");

        // Images without a usable source have nothing to show
        if name == "img" && !has_target {
            continue;
        }

        // Only the outermost table keeps its structure
        let table_structure = match name {
            "table" => open_tables == 0,
            _ if TABLE_PARTS.contains(&name) => open_tables == 1,
            _ => true,
        };
        // Anchors without a usable target are rendered as plain text
        let usable_anchor = name != "a" || has_target;
        let emit = depth < MAX_NESTING && table_structure && usable_anchor;

        if emit {
            out.push('<');
            out.push_str(name);
            for (key, value) in &attributes {
                out.push(' ');
                out.push_str(key);
                out.push_str("=\"");
                push_escaped(&mut out, value, true);
                out.push('"');
            }
            out.push('>');
        }

        if VOID_TAGS.contains(&name) {
            continue;
        }

        if emit {
            depth += 1;
        }
        let table = name == "table";
        if table {
            open_tables += 1;
        }
        stack.push(Visit::Leave {
            name,
            emitted: emit,
            table,
        });

        for child in element.children().rev() {
            match child.value() {
                Node::Text(text) => stack.push(Visit::Text(&**text)),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        stack.push(Visit::Enter(child));
                    }
                }
                _ => {}
            }
        }
    }

    out
}

// An href/src that points nowhere usable is dropped
fn kept_attributes<'a>(element: ElementRef<'a>, base_url: Option<&Url>) -> Vec<(&'a str, String)> {
    let mut attributes = Vec::new();

    for (key, value) in element.value().attrs() {
        if !KEPT_ATTRIBUTES.contains(&key) {
            continue;
        }
        if key == "href" || key == "src" {
            if let Some(target) = link_target(base_url, value) {
                attributes.push((key, target));
            }
        } else {
            attributes.push((key, value.to_string()));
        }
    }

    attributes
}

fn link_target(base_url: Option<&Url>, href: &str) -> Option<String> {
    let href = href.trim();
    if is_skipped_href(href) {
        return None;
    }
    match base_url {
        Some(base) => resolve_url(base, href).map(|url| url.to_string()),
        None => Some(href.to_string()),
    }
}

fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

// Resolves a possibly-relative href to an absolute URL
//
// Anchors and non-navigational schemes (mailto:, tel:, javascript:, data:)
// yield None.
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if is_skipped_href(href) {
        return None;
    }

    match Url::parse(href) {
        Ok(url) => Some(url),
        Err(_) => base.join(href).ok(),
    }
}

fn is_skipped_href(href: &str) -> bool {
    href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
        || href.starts_with("data:")
}

fn is_http_url(url: &Url) -> bool {
    url.scheme() == "http" || url.scheme() == "https"
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why clean the HTML before handing it to html2md?
//    - html2md converts whatever it is given, <script> bodies included
//    - It does not know the page URL, so relative links would stay relative
//
// 2. Why a Vec as the stack instead of recursion?
//    - A page can nest thousands of <div>s; recursion would follow it down
//    - The Vec grows on the heap, and MAX_NESTING bounds what html2md sees
//
// 3. What is ElementRef::wrap?
//    - Tree nodes can be text, comments or elements
//    - wrap() returns Some only for elements, giving access to name() and attrs()
// -----------------------------------------------------------------------------
