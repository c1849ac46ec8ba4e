use std::sync::LazyLock;

use regex::Regex;

use super::text_sanitizer::sanitize_inline;

static NON_CONTENT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript|template|svg)\b[^>]*>.*?</(script|style|noscript|template|svg)\s*>")
        .unwrap()
});
static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title\b[^>]*>(.*?)</title\s*>").unwrap());
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p\s*>").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").unwrap());

/// Paragraphs shorter than this are navigation crumbs, bylines or captions.
const MIN_PARAGRAPH_CHARS: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleText {
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
}

impl ArticleText {
    pub fn body(&self) -> String {
        self.paragraphs.join("\n\n")
    }
}

/// Pulls the title and body paragraphs out of an article page.
///
/// Short paragraphs are dropped unless the page has nothing longer, in which
/// case every non-empty paragraph is kept.
pub fn extract_article(html: &str) -> ArticleText {
    let without_comments = HTML_COMMENT.replace_all(html, " ");
    let content = NON_CONTENT_BLOCK.replace_all(&without_comments, " ");

    let title = TITLE
        .captures(&content)
        .map(|caps| inline_text(&caps[1]))
        .filter(|t| !t.is_empty());

    let all_paragraphs: Vec<String> = PARAGRAPH
        .captures_iter(&content)
        .map(|caps| inline_text(&caps[1]))
        .filter(|p| !p.is_empty())
        .collect();

    let substantial: Vec<String> = all_paragraphs
        .iter()
        .filter(|p| p.chars().count() >= MIN_PARAGRAPH_CHARS)
        .cloned()
        .collect();

    let paragraphs = if substantial.is_empty() {
        all_paragraphs
    } else {
        substantial
    };

    ArticleText { title, paragraphs }
}

fn inline_text(fragment: &str) -> String {
    let stripped = TAG.replace_all(fragment, " ");
    sanitize_inline(&decode_entities(&stripped))
}

/// Decodes the named entities common in news markup plus all numeric ones.
/// Unknown entities are left as written.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            decode_entity(entity).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => numeric.parse::<u32>().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }

    let decoded = match entity {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => " ",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201C}",
        "rdquo" => "\u{201D}",
        "hellip" => "\u{2026}",
        "copy" => "\u{00A9}",
        "reg" => "\u{00AE}",
        "trade" => "\u{2122}",
        "euro" => "\u{20AC}",
        "pound" => "\u{00A3}",
        "rupee" => "\u{20B9}",
        _ => return None,
    };
    Some(decoded.to_string())
}
