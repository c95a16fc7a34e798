// src/extract/mod.rs
// =============================================================================
// This module turns fetched pages into content a caller can read.
//
// Submodules:
// - html: HTML -> Markdown, page title and link extraction
// - markdown: Markdown -> plain text
// =============================================================================

mod html;
mod markdown;

pub use html::{extract_page, html_to_markdown, ExtractedPage, PageLinks};
pub use markdown::markdown_to_text;
