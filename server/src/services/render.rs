//! Markdown to HTML for article bodies.
//!
//! DESIGN
//! ======
//! `pulldown-cmark` does the parsing. Fenced code blocks are intercepted and
//! emitted as `<pre class="language-x">` with one `token-line` div per source
//! line so the stylesheet can mark highlighted lines. Blocks without a
//! language render as a bare `<code>` element.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeSet;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};
use pulldown_cmark_escape::escape_html;

/// Upper bound on lines a single range may name.
const MAX_RANGE_SPAN: usize = 10_000;

/// Render article markdown to HTML.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let mut events = Vec::new();
    let mut code: Option<CodeBlock> = None;

    for event in Parser::new_ext(markdown, options) {
        if let Some(block) = code.as_mut() {
            match event {
                Event::Text(text) => block.body.push_str(&text),
                Event::End(TagEnd::CodeBlock) => {
                    events.push(Event::Html(block.render().into()));
                    code = None;
                }
                _ => {}
            }
            continue;
        }
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let (language, meta) = match kind {
                    CodeBlockKind::Fenced(info) => split_info(&info),
                    CodeBlockKind::Indented => (String::new(), String::new()),
                };
                code = Some(CodeBlock { language, meta, body: String::new() });
            }
            event => events.push(event),
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Split a fence info string like `rust {1,3-5}` into language and meta.
fn split_info(info: &str) -> (String, String) {
    let info = info.trim();
    let end = info.find(|c: char| c.is_whitespace() || c == '{').unwrap_or(info.len());
    (info[..end].to_owned(), info[end..].trim().to_owned())
}

/// A fenced or indented code block being collected.
struct CodeBlock {
    language: String,
    meta: String,
    body: String,
}

impl CodeBlock {
    fn render(&self) -> String {
        let mut out = String::with_capacity(self.body.len() * 2);
        if self.language.is_empty() {
            out.push_str("<code>");
            let _ = escape_html(&mut out, &self.body);
            out.push_str("</code>");
            return out;
        }

        let highlighted = parse_line_ranges(&self.meta);
        let body = self.body.strip_suffix('\n').unwrap_or(&self.body);
        out.push_str("<pre class=\"language-");
        let _ = escape_html(&mut out, &self.language);
        out.push_str("\">");
        for (index, line) in body.split('\n').enumerate() {
            let class = if highlighted.contains(&(index + 1)) { "token-line highlight-line" } else { "token-line" };
            out.push_str("<div class=\"");
            out.push_str(class);
            out.push_str("\">");
            let _ = escape_html(&mut out, line);
            out.push_str("</div>");
        }
        out.push_str("</pre>\n");
        out
    }
}

/// One-based line numbers named by a `{1,3-5}` block in `meta`.
///
/// Anything outside the braces is ignored, as are malformed parts.
#[must_use]
pub fn parse_line_ranges(meta: &str) -> BTreeSet<usize> {
    let mut lines = BTreeSet::new();
    let Some(inner) = meta.split_once('{').and_then(|(_, rest)| rest.split_once('}')).map(|(inner, _)| inner) else {
        return lines;
    };
    if !inner.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '-' || c.is_whitespace()) {
        return lines;
    }

    for part in inner.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>()) else {
                    continue;
                };
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                if high - low > MAX_RANGE_SPAN {
                    continue;
                }
                lines.extend(low..=high);
            }
            None => {
                if let Ok(line) = part.parse::<usize>() {
                    lines.insert(line);
                }
            }
        }
    }
    lines
}
