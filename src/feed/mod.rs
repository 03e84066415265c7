//! RSS 2.0 feed serialization

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::content::Post;

/// Channel-level metadata of the feed
#[derive(Debug, Clone, PartialEq)]
pub struct FeedChannel {
    pub title: String,
    pub description: String,
    pub language: String,
}

impl FeedChannel {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            language: config.language.clone(),
        }
    }
}

impl Default for FeedChannel {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

/// Render posts as an RSS 2.0 document, one `<item>` per post in input order
pub fn to_feed(posts: &[Post], channel: &FeedChannel) -> String {
    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0">"#);
    feed.push('\n');
    feed.push_str("  <channel>\n");
    feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&channel.title)));
    feed.push_str(&format!(
        "    <description>{}</description>\n",
        escape_xml(&channel.description)
    ));
    feed.push_str(&format!(
        "    <language>{}</language>\n",
        escape_xml(&channel.language)
    ));

    for post in posts {
        feed.push_str("    <item>\n");
        feed.push_str(&format!("      <title>{}</title>\n", cdata(&post.title)));
        feed.push_str(&format!("      <pubDate>{}</pubDate>\n", rfc1123(&post.date)));
        feed.push_str(&format!(
            "      <description>{}</description>\n",
            cdata(&post.excerpt)
        ));
        feed.push_str(&format!("      <author>{}</author>\n", cdata(&post.author)));
        feed.push_str("    </item>\n");
    }

    feed.push_str("  </channel>\n");
    feed.push_str("</rss>\n");
    feed
}

/// HTTP-date style timestamp, e.g. `Mon, 15 Jan 2024 10:30:00 GMT`
pub fn rfc1123(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Wrap text in a CDATA section. A literal `]]>` is split across two
/// sections so it cannot terminate the first one.
fn cdata(s: &str) -> String {
    let clean = strip_invalid_xml_chars(s);
    format!("<![CDATA[{}]]>", clean.replace("]]>", "]]]]><![CDATA[>"))
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip invalid XML control characters (except tab, newline, carriage return)
/// XML 1.0 only allows: #x9 | #xA | #xD | [#x20-#xD7FF] | [#xE000-#xFFFD] | [#x10000-#x10FFFF]
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
