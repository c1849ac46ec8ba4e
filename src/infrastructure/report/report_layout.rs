use crate::domain::ExportRequest;

use super::latin1::to_latin1_safe;

pub const REPORT_TITLE: &str = "NewsSense Summary Report";

const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
const BODY_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 16.0;
const LINE_HEIGHT: f32 = 1.2;
const BODY_CHARS_PER_LINE: usize = 88;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub font: &'static str,
    pub size: f32,
    pub text: String,
}

impl ReportLine {
    fn body(text: impl Into<String>) -> Self {
        Self {
            font: "Helvetica",
            size: BODY_SIZE,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::body(String::new())
    }

    fn height(&self) -> f32 {
        self.size * LINE_HEIGHT
    }
}

/// Report content in reading order: title, the four labelled fields, then
/// one line per entity.
pub fn report_lines(request: &ExportRequest, title: &str) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine {
            font: "Helvetica-Bold",
            size: TITLE_SIZE,
            text: to_latin1_safe(title),
        },
        ReportLine::blank(),
    ];

    let fields = [
        ("Category", request.category.clone()),
        ("Summary", request.summary.clone()),
        ("Sentiment", request.sentiment_label().to_string()),
        ("Keywords", request.keywords.join(", ")),
    ];
    for (label, value) in fields {
        let text = to_latin1_safe(&format!("{label}: {value}"));
        lines.extend(wrap(&text, BODY_CHARS_PER_LINE).into_iter().map(ReportLine::body));
    }

    lines.push(ReportLine::blank());
    lines.push(ReportLine {
        font: "Helvetica-Bold",
        size: BODY_SIZE,
        text: "Named Entities:".to_string(),
    });
    for entity in request.entities.iter() {
        let text = to_latin1_safe(&format!("- {} ({})", entity.text, entity.label));
        lines.extend(wrap(&text, BODY_CHARS_PER_LINE).into_iter().map(ReportLine::body));
    }

    lines
}

/// Splits lines into pages that fit between the top and bottom margins.
pub fn paginate(lines: Vec<ReportLine>) -> Vec<Vec<ReportLine>> {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN;
    let mut pages = vec![Vec::new()];
    let mut used = 0.0;

    for line in lines {
        if used + line.height() > usable && used > 0.0 {
            pages.push(Vec::new());
            used = 0.0;
        }
        used += line.height();
        if let Some(page) = pages.last_mut() {
            page.push(line);
        }
    }
    pages
}

pub fn top_of_page() -> f32 {
    PAGE_HEIGHT - MARGIN
}

pub fn left_margin() -> f32 {
    MARGIN
}

/// Greedy word wrap; words longer than a line are split by characters.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split_at = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let rest = word.split_off(split_at);
            lines.push(word);
            word = rest;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
