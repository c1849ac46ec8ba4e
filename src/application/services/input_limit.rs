use std::borrow::Cow;
use std::sync::LazyLock;

use tiktoken_rs::CoreBPE;

/// GPT-2 byte-level BPE, the vocabulary BART and RoBERTa models share.
static TOKENIZER: LazyLock<CoreBPE> = LazyLock::new(|| {
    tiktoken_rs::r50k_base().expect("Failed to initialize r50k_base tokenizer")
});

/// Counts GPT-2 BPE tokens. Model special tokens are not included, so token
/// caps leave room for them.
pub fn count_tokens(text: &str) -> usize {
    TOKENIZER.encode_with_special_tokens(text).len()
}

/// Upper bound on how much of an article a model sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLimit {
    Characters(usize),
    Tokens(usize),
}

impl InputLimit {
    /// Returns the longest prefix of `text` within the limit. Token limits cut
    /// on word boundaries; character limits cut on char boundaries.
    pub fn truncate<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match *self {
            InputLimit::Characters(max_chars) => truncate_chars(text, max_chars),
            InputLimit::Tokens(max_tokens) => truncate_tokens(text, max_tokens),
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => Cow::Borrowed(&text[..byte_index]),
        None => Cow::Borrowed(text),
    }
}

fn truncate_tokens(text: &str, max_tokens: usize) -> Cow<'_, str> {
    if count_tokens(text) <= max_tokens {
        return Cow::Borrowed(text);
    }

    let mut end = 0;
    for word in text.split_inclusive(char::is_whitespace) {
        let candidate = &text[..end + word.len()];
        if count_tokens(candidate) > max_tokens {
            break;
        }
        end += word.len();
    }

    if end == 0 {
        return truncate_chars(text, max_tokens);
    }

    Cow::Borrowed(text[..end].trim_end())
}
