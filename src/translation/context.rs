/*!
 * Positional context windows for translation calls.
 *
 * For body segments, the external translator receives up to 100 characters
 * of surrounding text on each side of the segment, trimmed to whole words
 * and marked with an ellipsis where truncated. Header and footer segments
 * get no cross-part context.
 */

/// Maximum characters taken on each side of a segment
pub const CONTEXT_WINDOW_CHARS: usize = 100;

/// Marker appended or prepended where a window was truncated mid-text
const ELLIPSIS: &str = "…";

/// Surrounding text handed to the external translator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow {
    /// Text immediately before the segment
    pub preceding: String,

    /// Text immediately after the segment
    pub following: String,
}

impl ContextWindow {
    /// The empty window used for non-body parts
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether both sides are empty
    pub fn is_empty(&self) -> bool {
        self.preceding.is_empty() && self.following.is_empty()
    }

    /// Locate a segment's raw text inside the part's plain-text view and
    /// slice a window on each side. Segments that cannot be located (or
    /// carry no searchable text) get the empty window.
    pub fn around(full_text: &str, segment_text: &str) -> Self {
        if segment_text.trim().is_empty() {
            return Self::empty();
        }

        let Some(position) = full_text.find(segment_text) else {
            return Self::empty();
        };

        let preceding = window_before(full_text, position, CONTEXT_WINDOW_CHARS);
        let following = window_after(
            full_text,
            position + segment_text.len(),
            CONTEXT_WINDOW_CHARS,
        );

        Self {
            preceding,
            following,
        }
    }
}

/// Slice up to `max` characters ending at `position`, dropping a leading
/// partial word when the slice is truncated
fn window_before(text: &str, position: usize, max: usize) -> String {
    if position == 0 {
        return String::new();
    }

    let mut start = position.saturating_sub(max);
    while !text.is_char_boundary(start) {
        start += 1;
    }

    let slice = &text[start..position];
    if start == 0 {
        return slice.to_string();
    }

    match slice.find(char::is_whitespace) {
        Some(boundary) => format!("{}{}", ELLIPSIS, slice[boundary..].trim_start()),
        None => format!("{}{}", ELLIPSIS, slice),
    }
}

/// Slice up to `max` characters starting at `position`, dropping a trailing
/// partial word when the slice is truncated
fn window_after(text: &str, position: usize, max: usize) -> String {
    if position >= text.len() {
        return String::new();
    }

    let mut stop = (position + max).min(text.len());
    while !text.is_char_boundary(stop) {
        stop -= 1;
    }

    let slice = &text[position..stop];
    if stop == text.len() {
        return slice.to_string();
    }

    match slice.rfind(char::is_whitespace) {
        Some(boundary) => format!("{}{}", slice[..boundary].trim_end(), ELLIPSIS),
        None => format!("{}{}", slice, ELLIPSIS),
    }
}
