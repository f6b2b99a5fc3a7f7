// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Markdown rendering for the email body.
//!
//! Email clients ignore stylesheets, so paragraphs are emitted with an
//! inline `style` attribute. HTML comments (the draft's author notes) are
//! dropped from the event stream and never reach the rendered output.

use crate::error::{Error, Result};
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html::push_html};
use std::ops::Range;

/// Render draft prose to an HTML fragment.
///
/// With `paragraph_style`, every `<p>` carries that inline style, including
/// ones written as raw HTML. Fails when an HTML comment is opened and never
/// closed, since everything after it would silently disappear.
pub fn render_markdown(content: &str, paragraph_style: Option<&str>) -> Result<String> {
    let options = Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_TABLES
        | Options::ENABLE_SMART_PUNCTUATION;
    let parser = Parser::new_ext(content, options).into_offset_iter();

    let open = paragraph_style.map(|style| format!("<p style=\"{}\">", escape_attr(style)));
    let events = rewrite_events(content, parser, open.as_deref())?;

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, events.into_iter());
    Ok(html)
}

/// Drop HTML comments and, given `open`, restyle paragraph openers.
///
/// Markdown paragraphs become `open` … `</p>`. Paragraphs inside tight
/// lists never produce paragraph events, so list items stay unstyled.
/// Raw HTML blocks arrive one line per event and are buffered whole
/// before their comments are removed.
fn rewrite_events<'a>(
    content: &str,
    parser: impl Iterator<Item = (Event<'a>, Range<usize>)>,
    open: Option<&str>,
) -> Result<Vec<Event<'a>>> {
    let mut events = Vec::new();
    let mut block: Option<(usize, String)> = None;

    for (event, range) in parser {
        match event {
            Event::Start(Tag::HtmlBlock) => block = Some((range.start, String::new())),
            Event::End(TagEnd::HtmlBlock) => {
                let Some((start, raw)) = block.take() else {
                    continue;
                };
                let html = strip_comments(&raw)
                    .map_err(|offset| unterminated_comment(content, start, &raw[..offset]))?;
                if !html.trim().is_empty() {
                    events.push(Event::Html(style_paragraphs(&html, open).into()));
                }
            }
            Event::Html(text) => match block.as_mut() {
                Some((_, raw)) => raw.push_str(&text),
                None => events.push(Event::Html(style_paragraphs(&text, open).into())),
            },
            Event::InlineHtml(text) if text.starts_with("<!--") => {}
            Event::InlineHtml(text) => {
                events.push(Event::InlineHtml(style_paragraphs(&text, open).into()));
            }
            Event::Start(Tag::Paragraph) => match open {
                Some(open) => events.push(Event::Html(open.to_string().into())),
                None => events.push(Event::Start(Tag::Paragraph)),
            },
            Event::End(TagEnd::Paragraph) => match open {
                Some(_) => events.push(Event::Html("</p>\n".into())),
                None => events.push(Event::End(TagEnd::Paragraph)),
            },
            other => events.push(other),
        }
    }
    Ok(events)
}

/// Remove every `<!-- … -->` span from raw HTML.
///
/// On an unclosed comment, returns the byte offset of its `<!--`.
fn strip_comments(html: &str) -> std::result::Result<String, usize> {
    let mut result = String::with_capacity(html.len());
    let mut remaining = html;

    while let Some(start) = remaining.find("<!--") {
        result.push_str(&remaining[..start]);
        let after = &remaining[start + 4..];
        let Some(end) = after.find("-->") else {
            return Err(html.len() - remaining.len() + start);
        };
        remaining = &after[end + 3..];
    }
    result.push_str(remaining);
    Ok(result)
}

fn unterminated_comment(content: &str, block_start: usize, before: &str) -> Error {
    let line = content.get(..block_start).unwrap_or_default().matches('\n').count()
        + before.matches('\n').count()
        + 1;
    Error::Render(format!(
        "unterminated HTML comment starting on line {}",
        line
    ))
}

/// Give bare `<p>` openers in raw HTML the inline style.
fn style_paragraphs(html: &str, open: Option<&str>) -> String {
    match open {
        Some(open) => html.replace("<p>", open),
        None => html.to_string(),
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
