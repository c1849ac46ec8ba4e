use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Cleans text pulled out of PDFs, OCR output and web pages.
///
/// Applies NFKC, rejoins words hyphenated across line breaks, drops control
/// characters, collapses runs of whitespace inside lines and keeps at most one
/// blank line between paragraphs.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().filter(|ch| !is_invisible(*ch)).collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut result = String::with_capacity(de_hyphenated.len());
    let mut pending_break: Option<&str> = None;

    for line in de_hyphenated.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !result.is_empty() {
                pending_break = Some("\n\n");
            }
            continue;
        }

        if let Some(separator) = pending_break.take() {
            result.push_str(separator);
        } else if !result.is_empty() {
            result.push('\n');
        }
        collapse_internal_whitespace(trimmed, &mut result);
    }

    result
}

/// Collapses every whitespace run, newlines included, into a single space.
pub fn sanitize_inline(raw: &str) -> String {
    let normalized: String = raw.nfkc().filter(|ch| !is_invisible(*ch)).collect();
    let mut result = String::with_capacity(normalized.len());
    collapse_internal_whitespace(normalized.trim(), &mut result);
    result
}

fn is_invisible(ch: char) -> bool {
    matches!(ch, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
        || (ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
