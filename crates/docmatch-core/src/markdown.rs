//! Markdown to prose conversion.
//!
//! Markdown submissions are compared on their visible words only. Markup
//! characters, link targets, and code listings would otherwise show up as
//! "words" and skew the per-word counts.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning the visible text.
///
/// Dropped: fenced and indented code blocks, raw HTML, link and image
/// targets, and YAML frontmatter. Kept: paragraph text, headings, list
/// items, blockquotes, table cells, inline code, and image alt text.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let body = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;

    let mut prose = String::with_capacity(body.len());
    let mut in_code_block = false;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(t) | Event::Code(t) if !in_code_block => {
                prose.push_str(&t);
            }
            // Block ends and breaks separate words that would otherwise touch
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(
                TagEnd::Paragraph
                | TagEnd::Heading(_)
                | TagEnd::Item
                | TagEnd::TableCell
                | TagEnd::BlockQuote(_),
            ) => prose.push(' '),
            _ => {}
        }
    }

    prose
}

/// Skip a leading `---` delimited YAML block, if any.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close) = after_opening.find("\n---") else {
        return text;
    };
    let rest = &after_opening[close + 4..];
    rest.strip_prefix('\n').unwrap_or(rest)
}
