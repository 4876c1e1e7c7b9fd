//! Bounded context windows around match positions.

/// Returns the text within `radius` bytes on either side of `index`.
///
/// Both ends are clamped to the text and widened to the nearest UTF-8
/// character boundary, so the window never splits a character. Nothing is
/// trimmed or marked when the window reaches a document boundary.
pub fn context_window(text: &str, index: usize, radius: usize) -> &str {
    let index = index.min(text.len());

    let mut start = index.saturating_sub(radius);
    while !text.is_char_boundary(start) {
        start -= 1;
    }

    let mut end = index.saturating_add(radius).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    &text[start..end]
}
