//! Blog post parsing.
//!
//! A post is a markdown file that opens with a front matter block:
//!
//! ```text
//! ---
//! title: "Hello, World"
//! date: 2024-06-01
//! category: Rust
//! icon: 🦀
//! ---
//! The body, in **markdown**.
//! ```
//!
//! Front matter is a flat list of `key: value` lines. Values are plain strings
//! (no YAML typing); one pair of surrounding quotes is dropped. The body is
//! rendered to HTML with pulldown-cmark, and a plain-text excerpt is derived
//! from the raw markdown.

use crate::config::RenderConfig;
use crate::content::{self, Parsed, SourceItem};
use crate::types::ContentKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PostError {
    #[error("invalid frontmatter format (expected a block between two `---` lines)")]
    InvalidFrontMatter,
}

/// A blog post built from one markdown file.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// File stem of the source file.
    pub slug: String,
    /// Source file name as found on disk.
    pub source_file: String,
    pub title: String,
    /// Date exactly as written in the front matter.
    pub date: String,
    pub category: String,
    pub icon: Option<String>,
    /// `date` as an instant, used for ordering. Values without a time of day
    /// are midnight UTC. `None` when it could not be parsed.
    pub published: Option<DateTime<FixedOffset>>,
    /// Every front matter pair, including the ones lifted into fields above.
    pub front_matter: BTreeMap<String, String>,
    /// Rendered HTML body.
    pub content: String,
    pub excerpt: String,
    /// Markdown body as read from disk.
    pub raw_content: String,
}

static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\r?\n(.*?)\r?\n---\r?\n(.*)\z").expect("front matter pattern is valid")
});

/// Parse a post from the text of its source file.
pub fn parse_post(text: &str, file_name: &str, excerpt_length: usize) -> Result<Post, PostError> {
    let caps = FRONT_MATTER
        .captures(text)
        .ok_or(PostError::InvalidFrontMatter)?;
    let block = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let front_matter = parse_front_matter(block);
    let field = |key: &str| front_matter.get(key).cloned().unwrap_or_default();

    let date = field("date");
    let icon = front_matter.get("icon").filter(|v| !v.is_empty()).cloned();

    Ok(Post {
        slug: content::slug_for(file_name),
        source_file: file_name.to_string(),
        title: field("title"),
        published: parse_post_date(&date),
        date,
        category: field("category"),
        icon,
        content: render_markdown(body),
        excerpt: excerpt(body, excerpt_length),
        raw_content: body.to_string(),
        front_matter,
    })
}

/// Parse a front matter block into key/value pairs.
///
/// Each non-blank line is split at its first colon. Lines without a colon, or
/// with the colon in first position, are ignored.
pub fn parse_front_matter(block: &str) -> BTreeMap<String, String> {
    let mut pairs = BTreeMap::new();
    for line in block.lines().filter(|l| !l.trim().is_empty()) {
        let Some(colon) = line.find(':') else {
            continue;
        };
        if colon == 0 {
            continue;
        }
        let key = line[..colon].trim();
        let value = strip_quotes(line[colon + 1..].trim());
        pairs.insert(key.to_string(), value.to_string());
    }
    pairs
}

/// Drop one leading and one trailing quote character (`"` or `'`).
/// The two ends are handled independently.
fn strip_quotes(value: &str) -> &str {
    let value = value
        .strip_prefix(['"', '\''])
        .unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_GFM);
    options
}

/// Render a markdown body to HTML.
///
/// Soft line breaks stay soft (no `<br>`) and punctuation is left alone.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut html_out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_out, parser);
    html_out
}

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}\s+").expect("heading pattern is valid"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern is valid"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("code pattern is valid"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("link pattern is valid"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n\s*\r?\n").expect("paragraph pattern is valid"));
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("line break pattern is valid"));

/// Derive a plain-text excerpt from raw markdown.
///
/// This is text substitution on the markdown source, not HTML-aware
/// truncation. The result is at most `max_chars` characters, plus `...` when
/// it had to be cut.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let text = HEADING_MARKER.replace_all(markdown, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = PARAGRAPH_BREAK.replace_all(&text, " ");
    let text = LINE_BREAK.replace_all(&text, " ");
    let text = text.trim();

    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim())
    } else {
        text.to_string()
    }
}

/// Parse a front matter date.
///
/// Accepts `2024-06-01`, RFC 3339 timestamps, `2024-06-01T09:30:00` and
/// `June 1, 2024`. Values without an offset are taken as UTC; values
/// without a time of day are midnight.
pub fn parse_post_date(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp);
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(value, "%B %d, %Y"))
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc().fixed_offset())
}

/// Long-form display date, e.g. `June 1, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

impl Post {
    /// Calendar date of `published`, in the offset it was written with.
    pub fn published_date(&self) -> Option<NaiveDate> {
        self.published.map(|at| at.date_naive())
    }

    /// The display date: long form when the front matter date parses,
    /// otherwise the raw value.
    pub fn display_date(&self) -> String {
        match self.published_date() {
            Some(date) => format_long_date(date),
            None => self.date.clone(),
        }
    }
}

impl SourceItem for Post {
    const KIND: ContentKind = ContentKind::Post;
    const EXTENSION: &'static str = "md";

    type Error = PostError;

    fn parse_source(
        text: &str,
        file_name: &str,
        render: &RenderConfig,
    ) -> Result<Parsed<Self>, PostError> {
        let post = parse_post(text, file_name, render.excerpt_length)?;
        let mut parsed = Parsed::clean(post);
        if parsed.item.published.is_none() {
            let problem = if parsed.item.date.trim().is_empty() {
                "no date".to_string()
            } else {
                format!("date '{}' is not a calendar date", parsed.item.date)
            };
            parsed
                .warnings
                .push(format!("{problem}, post will be listed last"));
        }
        Ok(parsed)
    }

    fn title(&self) -> &str {
        &self.title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "---\ntitle: \"Hello, World\"\ndate: 2024-06-01\ncategory: Rust\nicon: 🦀\n---\n# Intro\n\nSome **bold** text.\n";

    // =========================================================================
    // Structure
    // =========================================================================

    #[test]
    fn parses_front_matter_fields() {
        let post = parse_post(SAMPLE, "hello-world.md", 150).unwrap();
        assert_eq!(post.slug, "hello-world");
        assert_eq!(post.title, "Hello, World");
        assert_eq!(post.date, "2024-06-01");
        assert_eq!(post.category, "Rust");
        assert_eq!(post.icon.as_deref(), Some("🦀"));
        assert_eq!(post.published_date(), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(post.source_file, "hello-world.md");
    }

    #[test]
    fn keeps_raw_body() {
        let post = parse_post(SAMPLE, "hello-world.md", 150).unwrap();
        assert_eq!(post.raw_content, "# Intro\n\nSome **bold** text.\n");
    }

    #[test]
    fn parsing_is_idempotent() {
        let a = parse_post(SAMPLE, "hello-world.md", 150).unwrap();
        let b = parse_post(SAMPLE, "hello-world.md", 150).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn crlf_line_endings_accepted() {
        let text = "---\r\ntitle: Windows\r\ndate: 2024-01-01\r\n---\r\nBody\r\n";
        let post = parse_post(text, "win.md", 150).unwrap();
        assert_eq!(post.title, "Windows");
        assert_eq!(post.date, "2024-01-01");
    }

    #[test]
    fn missing_delimiters_rejected() {
        let result = parse_post("title: Nope\n\nJust text", "nope.md", 150);
        assert_eq!(result, Err(PostError::InvalidFrontMatter));
    }

    #[test]
    fn unclosed_front_matter_rejected() {
        let result = parse_post("---\ntitle: Open\nBody without closing", "open.md", 150);
        assert_eq!(result, Err(PostError::InvalidFrontMatter));
    }

    #[test]
    fn front_matter_must_start_the_file() {
        let result = parse_post("\n---\ntitle: Late\n---\nBody", "late.md", 150);
        assert_eq!(result, Err(PostError::InvalidFrontMatter));
    }

    #[test]
    fn absent_fields_default_to_empty() {
        let post = parse_post("---\ntitle: Bare\n---\nBody", "bare.md", 150).unwrap();
        assert_eq!(post.category, "");
        assert_eq!(post.date, "");
        assert!(post.icon.is_none());
        assert!(post.published.is_none());
    }

    // =========================================================================
    // Front matter lines
    // =========================================================================

    #[test]
    fn value_split_at_first_colon() {
        let fm = parse_front_matter("title: Rust: the good parts");
        assert_eq!(fm["title"], "Rust: the good parts");
    }

    #[test]
    fn quotes_stripped_once_each_side() {
        let fm = parse_front_matter("a: \"quoted\"\nb: 'single'\nc: \"\"double\"\"\nd: \"mixed'");
        assert_eq!(fm["a"], "quoted");
        assert_eq!(fm["b"], "single");
        assert_eq!(fm["c"], "\"double\"");
        assert_eq!(fm["d"], "mixed");
    }

    #[test]
    fn lines_without_colon_ignored() {
        let fm = parse_front_matter("title: Kept\njust words\n: no key\n\n   \n");
        assert_eq!(fm.len(), 1);
        assert_eq!(fm["title"], "Kept");
    }

    #[test]
    fn keys_and_values_trimmed() {
        let fm = parse_front_matter("  category   :   Systems  ");
        assert_eq!(fm["category"], "Systems");
    }

    #[test]
    fn later_key_wins() {
        let fm = parse_front_matter("title: One\ntitle: Two");
        assert_eq!(fm["title"], "Two");
    }

    // =========================================================================
    // Markdown rendering
    // =========================================================================

    #[test]
    fn renders_headings_and_emphasis() {
        let html = render_markdown("# Title\n\nSome *text*.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>text</em>"));
    }

    #[test]
    fn renders_tables() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn renders_fenced_code() {
        let html = render_markdown("```rust\nfn main() {}\n```\n");
        assert!(html.contains("<pre><code class=\"language-rust\">"));
    }

    #[test]
    fn soft_breaks_not_converted() {
        let html = render_markdown("line one\nline two");
        assert!(!html.contains("<br"));
    }

    #[test]
    fn no_smart_punctuation() {
        let html = render_markdown("'quotes' -- dashes...");
        assert!(html.contains("quotes' -- dashes..."));
        assert!(!html.contains('\u{2019}'));
        assert!(!html.contains('\u{2013}'));
    }

    #[test]
    fn ordered_and_unordered_lists() {
        let html = render_markdown("1. one\n2. two\n\n- a\n- b\n");
        assert!(html.contains("<ol>"));
        assert!(html.contains("<ul>"));
    }

    // =========================================================================
    // Excerpts
    // =========================================================================

    #[test]
    fn excerpt_strips_markup() {
        let md = "## Heading\n\nSome **bold**, *italic* and `code` with a [link](https://example.com).";
        assert_eq!(
            excerpt(md, 150),
            "Heading Some bold, italic and code with a link."
        );
    }

    #[test]
    fn excerpt_collapses_line_breaks() {
        assert_eq!(excerpt("one\ntwo\n\n\nthree", 150), "one two three");
    }

    #[test]
    fn excerpt_short_text_unchanged() {
        assert_eq!(excerpt("Short.", 150), "Short.");
    }

    #[test]
    fn excerpt_exactly_at_limit_not_truncated() {
        let text = "a".repeat(150);
        assert_eq!(excerpt(&text, 150), text);
    }

    #[test]
    fn excerpt_truncated_with_ellipsis() {
        let text = "word ".repeat(60);
        let result = excerpt(&text, 150);
        assert!(result.ends_with("..."));
        assert!(result.chars().count() <= 153);
    }

    #[test]
    fn excerpt_truncation_trims_before_ellipsis() {
        // Character 150 lands on a space
        let text = format!("{} tail", "x".repeat(149));
        assert_eq!(excerpt(&text, 150), format!("{}...", "x".repeat(149)));
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        let text = "é".repeat(200);
        let result = excerpt(&text, 150);
        assert_eq!(result.chars().count(), 153);
    }

    #[test]
    fn excerpt_bound_holds_for_varied_input() {
        let inputs = [
            String::new(),
            "# Only a heading".to_string(),
            "**".repeat(100),
            "[a](b) ".repeat(80),
            "line\n".repeat(200),
            "`code` and *stars* ".repeat(30),
        ];
        for input in &inputs {
            assert!(excerpt(input, 150).chars().count() <= 153, "input: {input:?}");
        }
    }

    // =========================================================================
    // Dates
    // =========================================================================

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> Option<DateTime<FixedOffset>> {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .map(|naive| naive.and_utc().fixed_offset())
    }

    #[test]
    fn parses_iso_date_as_midnight_utc() {
        assert_eq!(parse_post_date("2024-01-01"), utc(2024, 1, 1, 0, 0));
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        assert_eq!(parse_post_date("2024-03-05T10:00:00Z"), utc(2024, 3, 5, 10, 0));
    }

    #[test]
    fn rfc3339_offset_kept_for_display() {
        let post = parse_post(
            "---\ntitle: T\ndate: 2024-03-05T23:30:00-05:00\n---\nBody",
            "t.md",
            150,
        )
        .unwrap();
        assert_eq!(post.published, utc(2024, 3, 6, 4, 30));
        assert_eq!(post.display_date(), "March 5, 2024");
    }

    #[test]
    fn parses_local_timestamp() {
        assert_eq!(parse_post_date("2024-03-05T23:59:00"), utc(2024, 3, 5, 23, 59));
    }

    #[test]
    fn parses_long_form_date() {
        assert_eq!(parse_post_date("June 1, 2024"), utc(2024, 6, 1, 0, 0));
    }

    #[test]
    fn time_of_day_orders_same_day_timestamps() {
        let morning = parse_post_date("2024-06-01T08:00:00Z");
        let evening = parse_post_date("2024-06-01T20:00:00Z");
        assert!(evening > morning);
        assert!(morning > parse_post_date("2024-06-01"));
    }

    #[test]
    fn rejects_garbage_date() {
        assert_eq!(parse_post_date("someday"), None);
        assert_eq!(parse_post_date("2024-13-01"), None);
        assert_eq!(parse_post_date(""), None);
    }

    #[test]
    fn long_date_format() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(format_long_date(date), "June 1, 2024");
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(format_long_date(date), "December 25, 2023");
    }

    #[test]
    fn display_date_falls_back_to_raw() {
        let post = parse_post("---\ntitle: T\ndate: soon\n---\nBody", "t.md", 150).unwrap();
        assert_eq!(post.display_date(), "soon");
    }

    #[test]
    fn source_item_warns_on_unparseable_date() {
        let parsed = Post::parse_source(
            "---\ntitle: T\ndate: soon\n---\nBody",
            "t.md",
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert!(parsed.warnings[0].contains("soon"));
    }

    #[test]
    fn source_item_warns_on_missing_date() {
        let parsed = Post::parse_source(
            "---\ntitle: T\n---\nBody",
            "t.md",
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(parsed.warnings, vec!["no date, post will be listed last"]);
    }

    #[test]
    fn source_file_keeps_on_disk_name() {
        let post = parse_post("---\ntitle: T\n---\nBody", "NOTES.MD", 150).unwrap();
        assert_eq!(post.slug, "NOTES");
        assert_eq!(post.source_file, "NOTES.MD");
    }
}
