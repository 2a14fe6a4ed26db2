use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folds an answer for comparison: lower-case, no diacritics, no outer
/// whitespace.
///
/// `đ` has no canonical decomposition, so it is mapped to `d` by hand.
#[must_use]
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c == 'đ' { 'd' } else { c })
        .collect();

    folded.trim().to_owned()
}
