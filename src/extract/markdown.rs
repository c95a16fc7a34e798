// src/extract/markdown.rs
// =============================================================================
// This module renders Markdown as plain text.
//
// We use the `pulldown-cmark` crate which parses Markdown into a stream of
// events (start of a heading, some text, end of a paragraph, ...). Keeping
// only the text events and turning block ends into line breaks gives a
// readable plain-text version of a scraped page.
// =============================================================================

use pulldown_cmark::{Event, Options, Parser, Tag};

// Renders Markdown as plain text
//
// Example:
//   "# Title\n\nSee [docs](https://example.com)"  ->  "Title\n\nSee docs"
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::with_capacity(markdown.len());

    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);

    for event in parser {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak | Event::Rule => text.push('\n'),

            // List items keep a bullet so items stay distinguishable
            Event::Start(Tag::Item) => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str("- ");
            }
            Event::End(Tag::Item) => text.push('\n'),

            Event::End(Tag::TableCell) => text.push('\t'),
            Event::End(Tag::TableHead) | Event::End(Tag::TableRow) => {
                let trimmed = text.trim_end_matches('\t').len();
                text.truncate(trimmed);
                text.push('\n');
            }

            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::BlockQuote)
            | Event::End(Tag::List(_))
            | Event::End(Tag::Table(_)) => text.push_str("\n\n"),

            // Raw HTML, footnote markers and task checkboxes carry no text
            _ => {}
        }
    }

    tidy_lines(&text)
}

// Trims line ends, folds blank-line runs and strips surrounding blank lines
pub(super) fn tidy_lines(text: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for line in text.lines().map(str::trim_end) {
        if line.is_empty() && lines.last().map_or(true, |last| last.is_empty()) {
            continue;
        }
        lines.push(line);
    }

    while lines.last().map_or(false, |last| last.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title\n\nHello **world**!", "Title\n\nHello world!")]
    #[case("- One\n- Two", "- One\n- Two")]
    #[case("See [docs](https://example.com/docs)", "See docs")]
    #[case("Run `cargo test` now", "Run cargo test now")]
    #[case("```\nfn main() {}\n```", "fn main() {}")]
    #[case("> Quoted", "Quoted")]
    #[case("", "")]
    fn test_markdown_to_text(#[case] markdown: &str, #[case] expected: &str) {
        assert_eq!(markdown_to_text(markdown), expected);
    }

    #[test]
    fn test_table_cells_are_tab_separated() {
        let markdown = "| A | B |\n| --- | --- |\n| 1 | 2 |";
        assert_eq!(markdown_to_text(markdown), "A\tB\n1\t2");
    }

    #[test]
    fn test_paragraph_lines_are_joined() {
        let markdown = "first line\nsecond line";
        assert_eq!(markdown_to_text(markdown), "first line second line");
    }
}
