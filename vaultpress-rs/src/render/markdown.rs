//! Generic markdown to HTML via pulldown-cmark.

use crate::parser::heading::SlugCounter;
use crate::render::fragment_placeholder;
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

/// Extensions enabled for every note.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render markdown to an HTML fragment and restore stashed fragments.
///
/// Single newlines inside a paragraph become `<br />`, and every heading gets
/// a unique slug `id`.
pub fn render_markdown(text: &str, stash: &[String]) -> String {
    let mut events: Vec<Event<'_>> = Parser::new_ext(text, markdown_options())
        .map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        })
        .collect();
    assign_heading_ids(&mut events);

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    restore_fragments(out, stash)
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut slugs = SlugCounter::new();
    for idx in 0..events.len() {
        if !matches!(events[idx], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let slug = slugs.unique(&heading_text(&events[idx + 1..]));
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[idx] {
            *id = Some(slug.into());
        }
    }
}

/// Plain text of a heading, from the events following its start tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Swap stash placeholders back for their fragments.
///
/// A placeholder standing alone in a paragraph replaces the whole paragraph.
pub fn restore_fragments(mut html: String, stash: &[String]) -> String {
    for (index, fragment) in stash.iter().enumerate() {
        let token = fragment_placeholder(index);
        let paragraph = format!("<p>{token}</p>");
        if html.contains(&paragraph) {
            html = html.replace(&paragraph, fragment);
        }
        if html.contains(&token) {
            html = html.replace(&token, fragment);
        }
    }
    html
}
