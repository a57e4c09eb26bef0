//! Small string formatting helpers.

use std::ops::RangeInclusive;

/// The CJK Unified Ideographs block counted as wide by [`display_len`].
const CJK_IDEOGRAPHS: RangeInclusive<char> = '\u{4e00}'..='\u{9fa5}';

/// Uppercase the first character.
pub fn ucfirst(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Left-pad `text` with `fill` until it is `max_len` characters long.
///
/// ```
/// use protolite_core::text::pad;
///
/// assert_eq!(pad("7", '0', 3), "007");
/// assert_eq!(pad("1234", '0', 3), "1234");
/// ```
pub fn pad(text: &str, fill: char, max_len: usize) -> String {
    let len = text.chars().count();
    if len >= max_len {
        return text.to_string();
    }
    let mut padded: String = std::iter::repeat_n(fill, max_len - len).collect();
    padded.push_str(text);
    padded
}

/// Display width where CJK ideographs count `cjk_width` and every other
/// character counts `other_width`.
///
/// ```
/// use protolite_core::text::display_len;
///
/// assert_eq!(display_len("ab中文", 2, 1), 6);
/// ```
pub fn display_len(text: &str, cjk_width: usize, other_width: usize) -> usize {
    text.chars()
        .map(|c| {
            if CJK_IDEOGRAPHS.contains(&c) {
                cjk_width
            } else {
                other_width
            }
        })
        .sum()
}

/// Drop the first `item` from a `separator`-joined list.
///
/// ```
/// use protolite_core::text::remove_item;
///
/// assert_eq!(remove_item("a,b,c,b", "b", ","), "a,c,b");
/// assert_eq!(remove_item("a|b", "z", "|"), "a|b");
/// ```
pub fn remove_item(text: &str, item: &str, separator: &str) -> String {
    let mut parts: Vec<&str> = text.split(separator).collect();
    if let Some(index) = parts.iter().position(|part| *part == item) {
        parts.remove(index);
    }
    parts.join(separator)
}
