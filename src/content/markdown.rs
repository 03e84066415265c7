//! Plain-text extraction from markdown bodies

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Maximum number of characters kept from the stripped body
pub const EXCERPT_LENGTH: usize = 200;

/// Suffix appended to every non-empty excerpt
pub const EXCERPT_SUFFIX: &str = "...";

/// Default reading speed used for reading-time estimates
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 200;

/// Reduce markdown to the visible prose.
///
/// Images and links are dropped together with their text, inline code is
/// unwrapped, block markers (headings, quotes, lists, emphasis) disappear and
/// whitespace is collapsed to single spaces.
pub fn strip_markdown(markdown: &str) -> String {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut text = String::with_capacity(markdown.len());
    let mut hidden_depth = 0usize;

    for event in parser {
        match event {
            Event::Start(Tag::Image { .. }) | Event::Start(Tag::Link { .. }) => hidden_depth += 1,
            Event::End(TagEnd::Image) | Event::End(TagEnd::Link) => {
                hidden_depth = hidden_depth.saturating_sub(1)
            }
            _ if hidden_depth > 0 => {}
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough) => {}
            Event::End(_) => text.push(' '),
            _ => {}
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build the preview shown in listings and feeds
pub fn excerpt(markdown: &str) -> String {
    let stripped = strip_markdown(markdown);
    let mut excerpt: String = stripped.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str(EXCERPT_SUFFIX);
    excerpt
}

/// Count whitespace-separated words
pub fn count_words(body: &str) -> usize {
    body.split_whitespace().count()
}

/// Minutes needed to read `words` at `words_per_minute`, never less than one
pub fn reading_time(words: usize, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    let minutes = words.div_ceil(wpm);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}
