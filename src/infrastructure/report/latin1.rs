/// Maps text onto the Latin-1 range the standard PDF fonts can render.
///
/// Typographic punctuation gets an ASCII stand-in; anything else outside
/// Latin-1 becomes `?`.
pub fn to_latin1_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2212}' => out.push('-'),
            '\u{2026}' => out.push_str("..."),
            '\u{2022}' => out.push('*'),
            '\u{20AC}' => out.push_str("EUR"),
            '\u{20B9}' => out.push_str("Rs."),
            '\u{00A0}' | '\u{2009}' | '\u{200A}' => out.push(' '),
            c if (c as u32) <= 0xFF && !c.is_control() => out.push(c),
            c if c.is_whitespace() => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}
