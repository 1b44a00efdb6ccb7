//! Extraction of the preformatted report block from a fetched page.
//!
//! Report pages embed the member's log as a single `<pre class="report">`
//! block. Tag matching is case-insensitive and tolerant of extra attributes
//! and attribute order; actual HTTP retrieval is the fetch layer's job.

use crate::error::ReportError;

/// Tag and class marker identifying the report block.
const REPORT_TAG: &str = "pre";
const REPORT_CLASS: &str = "report";

/// Pull the report lines out of a fetched document.
///
/// Locates the `<pre class="report">` block, strips any nested markup,
/// decodes the basic character entities and returns the non-empty lines in
/// their original order. Fails with [`ReportError::ReportBlockMissing`] when
/// the document has no such block, which signals a malformed or unexpected
/// remote page.
pub fn extract_report_lines(html: &str) -> Result<Vec<String>, ReportError> {
    let block = find_marked_block(html, REPORT_TAG, REPORT_CLASS)
        .ok_or(ReportError::ReportBlockMissing)?;
    let text = decode_entities(&strip_tags(block));

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// ASCII-lowercase copy with identical byte offsets.
fn ascii_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Inner content of the first `<tag ... class="...marker...">` block.
fn find_marked_block<'a>(html: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    let lower = ascii_lower(html);
    let open = format!("<{}", tag);
    let close = format!("</{}", tag);

    let mut from = 0;
    while let Some(rel) = lower[from..].find(&open) {
        let start = from + rel;
        let after_name = start + open.len();

        // Reject longer tag names sharing the prefix (e.g. <predate>).
        match lower[after_name..].chars().next() {
            Some(c) if c.is_whitespace() || c == '>' => {}
            _ => {
                from = after_name;
                continue;
            }
        }

        let open_end = after_name + lower[after_name..].find('>')?;
        if has_class(&html[after_name..open_end], class) {
            let content_start = open_end + 1;
            let content_end = content_start + lower[content_start..].find(&close)?;
            return Some(&html[content_start..content_end]);
        }
        from = open_end + 1;
    }
    None
}

/// Whether an attribute string carries `class` containing the given token.
fn has_class(attrs: &str, wanted: &str) -> bool {
    let mut rest = attrs;
    while let Some(eq) = rest.find('=') {
        let name = rest[..eq]
            .trim()
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or("");
        let value_part = rest[eq + 1..].trim_start();

        let (value, remaining) = match value_part.chars().next() {
            Some(quote @ ('"' | '\'')) => match value_part[1..].find(quote) {
                Some(end) => (&value_part[1..1 + end], &value_part[2 + end..]),
                None => (&value_part[1..], ""),
            },
            _ => match value_part.find(char::is_whitespace) {
                Some(end) => (&value_part[..end], &value_part[end..]),
                None => (value_part, ""),
            },
        };

        if name.eq_ignore_ascii_case("class") {
            return value
                .split_whitespace()
                .any(|token| token.eq_ignore_ascii_case(wanted));
        }
        rest = remaining;
    }
    false
}

/// Drop everything between `<` and `>`, keeping line structure intact.
fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decode the basic named entities report pages use.
fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
