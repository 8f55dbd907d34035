//! Fenced code block detection.
//!
//! Used when skip markers inside code samples must be left alone, e.g. in
//! documentation that describes the marker syntax itself.

use std::ops::Range;

/// Tracks code fence state during line-by-line scanning.
///
/// Code fences in `CommonMark` use backticks or tildes (three or more).
/// The closing fence must use the same character and be at least as long
/// as the opening fence.
#[derive(Debug, Default)]
struct FenceTracker {
    /// Character of the open fence, if any.
    fence_char: Option<char>,
    /// Length of the opening fence (minimum length for closing).
    fence_len: usize,
}

impl FenceTracker {
    fn in_fence(&self) -> bool {
        self.fence_char.is_some()
    }

    /// Feed one line and update fence state.
    ///
    /// Lines indented four or more columns are indented code, never fence
    /// lines.
    fn update(&mut self, line: &str) {
        let Some(trimmed) = strip_fence_indent(line) else {
            return;
        };

        if let Some(fence_char) = self.fence_char {
            if is_closing_fence(trimmed, fence_char, self.fence_len) {
                self.fence_char = None;
                self.fence_len = 0;
            }
        } else if let Some((ch, len)) = detect_fence(trimmed) {
            self.fence_char = Some(ch);
            self.fence_len = len;
        }
    }
}

/// Byte ranges of `text` covered by fenced code blocks, fence lines included.
///
/// An unclosed fence runs to the end of the document.
pub(crate) fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    let mut tracker = FenceTracker::default();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let was_open = tracker.in_fence();
        tracker.update(line);
        let line_range = offset..offset + line.len();
        offset = line_range.end;

        if !(was_open || tracker.in_fence()) {
            continue;
        }
        match ranges.last_mut() {
            Some(last) if last.end == line_range.start => last.end = line_range.end,
            _ => ranges.push(line_range),
        }
    }

    ranges
}

/// Strip up to three columns of indentation, or `None` if the line is
/// indented further. Tabs advance to the next multiple of four columns.
fn strip_fence_indent(line: &str) -> Option<&str> {
    let mut column = 0;
    for (idx, ch) in line.char_indices() {
        match ch {
            ' ' => column += 1,
            '\t' => column += 4 - column % 4,
            _ => return (column <= 3).then_some(&line[idx..]),
        }
        if column > 3 {
            return None;
        }
    }
    Some("")
}

/// Detect if a line opens a code fence, returning its character and length.
fn detect_fence(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let count = trimmed.chars().take_while(|&c| c == first).count();
    (count >= 3).then_some((first, count))
}

/// Check if a line closes the open fence.
///
/// Same character, at least as long, only whitespace after the fence.
fn is_closing_fence(trimmed: &str, expected_char: char, min_len: usize) -> bool {
    if !trimmed.starts_with(expected_char) {
        return false;
    }

    let count = trimmed.chars().take_while(|&c| c == expected_char).count();
    if count < min_len {
        return false;
    }

    // Fence chars are ASCII, so `count` is also a byte offset
    trimmed[count..].chars().all(char::is_whitespace)
}
