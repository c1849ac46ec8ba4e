use unicode_segmentation::UnicodeSegmentation;

/// Latin terminals plus the Devanagari danda used in Hindi text.
const SENTENCE_TERMINALS: [&str; 4] = [".", "!", "?", "\u{0964}"];

/// Splits text into sentence-like chunks at a terminal followed by whitespace
/// or the end of the text. Chunks are trimmed and never empty.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut graphemes = text.graphemes(true).peekable();

    while let Some(grapheme) = graphemes.next() {
        current.push_str(grapheme);

        if SENTENCE_TERMINALS.contains(&grapheme) {
            let at_boundary = graphemes
                .peek()
                .is_none_or(|next| next.chars().all(char::is_whitespace));
            if at_boundary {
                push_trimmed(&mut sentences, &current);
                current.clear();
            }
        }
    }

    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
