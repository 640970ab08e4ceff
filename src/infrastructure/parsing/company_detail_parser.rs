//! Company detail parser
//!
//! Detail pages list facts as `<li><strong>Label:</strong> value</li>`, but
//! not consistently: values are sometimes wrapped in other elements, preceded
//! by a line break, or the label sits inside a nested element. Extraction is
//! therefore opportunistic:
//!
//! 1. A list item without an emphasized label contributes nothing.
//! 2. The label is the emphasized text with its first colon removed, trimmed.
//! 3. The value is the text of the node right after the label (primary);
//!    when that is missing or blank, the item's rendered text minus the
//!    label text (fallback). Rendering keeps line breaks from `<br>` and
//!    block elements.
//! 4. A repeated label overwrites the earlier value.

#![allow(clippy::uninlined_format_args)]

use super::{compile_selector, ContextualParser, DetailParseContext, DetailSelectors, ParsingResult};
use crate::domain::DetailRecord;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

/// Parser for extracting label/value fields from company detail pages
pub struct CompanyDetailParser {
    item_selector: Selector,
    label_selector: Selector,
}

impl CompanyDetailParser {
    /// Create a new company detail parser with default selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&DetailSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &DetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            item_selector: compile_selector(&selectors.field_item)?,
            label_selector: compile_selector(&selectors.field_label)?,
        })
    }

    /// Extract one field from a list item, `None` when it has no label
    fn extract_field(&self, item: &ElementRef) -> Option<(String, String)> {
        let label = item.select(&self.label_selector).next()?;
        let raw_label: String = label.text().collect();
        let value = resolve_value(item, &label);
        Some((normalize_label(&raw_label), value))
    }
}

impl ContextualParser for CompanyDetailParser {
    type Output = DetailRecord;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing company detail from: {}", context.url);

        let mut record = DetailRecord::new();
        let mut items = 0usize;
        for item in html.select(&self.item_selector) {
            items += 1;
            let Some((label, value)) = self.extract_field(&item) else {
                continue;
            };
            if let Some(previous) = record.insert(label.clone(), value) {
                debug!("Label '{}' repeated on {}, replacing '{}'", label, context.url, previous);
            }
        }

        debug!(
            "Extracted {} fields from {} list items for {}",
            record.len(),
            items,
            context.company.as_deref().unwrap_or("unnamed company")
        );
        Ok(record)
    }
}

/// Label text with the first colon removed, trimmed
pub fn normalize_label(raw: &str) -> String {
    raw.replacen(':', "", 1).trim().to_string()
}

/// Two-step value resolution: the node right after the label, else the
/// item's visible text with the label's visible text removed once
pub fn resolve_value(item: &ElementRef, label: &ElementRef) -> String {
    following_text(label)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| text_without_label(item, label))
}

/// Trimmed text of the node immediately following `label` in its parent
fn following_text(label: &ElementRef) -> Option<String> {
    let sibling = label.next_sibling()?;
    let text = match sibling.value() {
        Node::Text(text) => text.text.to_string(),
        Node::Comment(comment) => comment.comment.to_string(),
        Node::Element(_) => ElementRef::wrap(sibling)?.text().collect(),
        _ => String::new(),
    };
    Some(text.trim().to_string())
}

fn text_without_label(item: &ElementRef, label: &ElementRef) -> String {
    let label_text = visible_text(label);
    visible_text(item).replacen(label_text.trim_end(), "", 1).trim().to_string()
}

/// Elements rendered on their own line, with the number of line breaks
/// required around them
fn block_breaks(name: &str) -> Option<usize> {
    match name {
        "p" => Some(2),
        "div" | "li" | "ul" | "ol" | "dl" | "dt" | "dd" | "tr" | "table" | "section" | "article" | "header"
        | "footer" | "blockquote" | "figure" | "figcaption" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "pre"
        | "hr" => Some(1),
        _ => None,
    }
}

/// Rendered text of an element: `<br>` becomes a newline, block elements
/// sit on their own lines, whitespace inside text runs collapses and
/// script-like content is dropped.
pub fn visible_text(element: &ElementRef) -> String {
    let mut text = RenderedText::default();
    text.push_element(element);
    text.out
}

#[derive(Default)]
struct RenderedText {
    out: String,
    pending_breaks: usize,
}

impl RenderedText {
    fn push_element(&mut self, element: &ElementRef) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.push_text(&text.text),
                Node::Element(el) => {
                    let name = el.name();
                    if matches!(name, "script" | "style" | "noscript" | "template") {
                        continue;
                    }
                    if name == "br" {
                        self.push_newline();
                        continue;
                    }
                    let Some(child) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let breaks = block_breaks(name);
                    if let Some(n) = breaks {
                        self.request_breaks(n);
                    }
                    self.push_element(&child);
                    if let Some(n) = breaks {
                        self.request_breaks(n);
                    }
                }
                _ => {}
            }
        }
    }

    fn push_text(&mut self, raw: &str) {
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let leading = raw.starts_with(char::is_whitespace);
        if collapsed.is_empty() {
            if leading && self.pending_breaks == 0 {
                self.push_space();
            }
            return;
        }

        if self.pending_breaks > 0 {
            self.flush_breaks();
        } else if leading {
            self.push_space();
        }
        self.out.push_str(&collapsed);
        if raw.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
    }

    fn push_space(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with([' ', '\n']) {
            self.out.push(' ');
        }
    }

    fn push_newline(&mut self) {
        self.flush_breaks();
        self.trim_trailing_spaces();
        self.out.push('\n');
    }

    /// Consecutive block boundaries collapse to the largest request
    fn request_breaks(&mut self, n: usize) {
        self.pending_breaks = self.pending_breaks.max(n);
    }

    fn flush_breaks(&mut self) {
        if self.pending_breaks > 0 && !self.out.is_empty() {
            self.trim_trailing_spaces();
            self.out.push_str(&"\n".repeat(self.pending_breaks));
        }
        self.pending_breaks = 0;
    }

    fn trim_trailing_spaces(&mut self) {
        let kept = self.out.trim_end_matches(' ').len();
        self.out.truncate(kept);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use url::Url;

    fn parse(body: &str) -> DetailRecord {
        let parser = CompanyDetailParser::new().unwrap();
        let html = Html::parse_document(body);
        let context = DetailParseContext::new(Url::parse("https://www.sharktankindiaclub.com/acme/").unwrap())
            .with_company(Some("Acme".to_string()));
        parser.parse_with_context(&html, &context).unwrap()
    }

    fn content(items: &str) -> String {
        format!(r#"<html><body><div class="entry-content"><ul>{}</ul></div></body></html>"#, items)
    }

    #[test]
    fn test_parser_creation() {
        let parser = CompanyDetailParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_simple_label_value() {
        let record = parse(&content("<li><strong>Amount:</strong> 50 Lakhs</li>"));
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Amount"), Some("50 Lakhs"));
    }

    #[test]
    fn test_items_without_label_are_skipped() {
        let record = parse(&content(
            "<li>Just a note</li><li><strong>Equity:</strong> 10%</li><li>Another note</li><li><strong>Deal:</strong> Yes</li>",
        ));
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Equity"), Some("10%"));
        assert_eq!(record.get("Deal"), Some("Yes"));
    }

    #[test]
    fn test_repeated_label_keeps_later_value() {
        let record = parse(&content(
            "<li><strong>Shark:</strong> Aman</li><li><strong>Valuation:</strong> 5 Cr</li><li><strong>Shark:</strong> Namita</li>",
        ));
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("Shark"), Some("Namita"));
        let labels: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(labels, vec!["Shark", "Valuation"]);
    }

    #[test]
    fn test_value_in_following_element() {
        let record = parse(&content(r#"<li><strong>Website:</strong><a href="https://acme.in">acme.in</a></li>"#));
        assert_eq!(record.get("Website"), Some("acme.in"));
    }

    #[test]
    fn test_blank_following_node_falls_back_to_item_text() {
        let record = parse(&content("<li><strong>Ask</strong><br>50 Lakhs for 5%</li>"));
        assert_eq!(record.get("Ask"), Some("50 Lakhs for 5%"));
    }

    #[test]
    fn test_line_breaks_are_kept_in_fallback_value() {
        let record = parse(&content("<li><strong>Ask:</strong><br>50 Lakhs<br>for 5% equity</li>"));
        assert_eq!(record.get("Ask"), Some("50 Lakhs\nfor 5% equity"));
    }

    #[test]
    fn test_paragraphs_are_separated_in_fallback_value() {
        let record = parse(&content("<li><strong>Sharks:</strong><br><p>Aman</p><p>Namita</p></li>"));
        assert_eq!(record.get("Sharks"), Some("Aman\n\nNamita"));
    }

    #[test]
    fn test_visible_text_collapses_whitespace_and_skips_scripts() {
        let html = Html::parse_fragment(
            "<div id=\"v\">  Deal \n   done<script>var x = 1;</script><span> with</span>  Aman </div>",
        );
        let selector = scraper::Selector::parse("#v").unwrap();
        let element = html.select(&selector).next().unwrap();
        assert_eq!(visible_text(&element).trim(), "Deal done with Aman");
    }

    #[test]
    fn test_nested_label_falls_back_to_item_text() {
        let record = parse(&content("<li><span><strong>Founder:</strong></span> Jane Doe</li>"));
        assert_eq!(record.get("Founder"), Some("Jane Doe"));
    }

    #[test]
    fn test_label_without_value_is_kept_empty() {
        let record = parse(&content("<li><strong>Deal:</strong></li>"));
        assert_eq!(record.get("Deal"), Some(""));
    }

    #[test]
    fn test_items_outside_content_region_are_ignored() {
        let record = parse(
            r#"<html><body>
                <nav><ul><li><strong>Menu:</strong> Home</li></ul></nav>
                <div class="entry-content"><ul><li><strong>Amount:</strong> 1 Cr</li></ul></div>
            </body></html>"#,
        );
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("Menu"), None);
    }

    #[test]
    fn test_page_without_fields_is_empty() {
        let record = parse("<html><body><div class=\"entry-content\"><p>Pitch video</p></div></body></html>");
        assert!(record.is_empty());
    }

    #[rstest]
    #[case("Amount:", "Amount")]
    #[case("  Amount :  ", "Amount")]
    #[case("Amount", "Amount")]
    #[case("Ask: (Lakhs):", "Ask (Lakhs):")]
    #[case(":", "")]
    fn test_normalize_label(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(raw), expected);
    }
}
