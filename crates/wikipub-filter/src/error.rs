//! Error types for skip-marker filtering.

use std::fmt;

/// Rule broken by a document's skip markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerViolation {
    /// A start marker is never closed.
    UnmatchedStart,
    /// An end marker has no start marker anywhere before it.
    UnmatchedEnd,
    /// A start marker appears while a span is already open.
    Nested,
    /// An end marker appears before the start marker it would close.
    OutOfOrder,
}

impl fmt::Display for MarkerViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::UnmatchedStart => "start marker has no matching end marker",
            Self::UnmatchedEnd => "end marker has no matching start marker",
            Self::Nested => "start marker found inside an open skip span (nesting is not allowed)",
            Self::OutOfOrder => "end marker found before its start marker",
        };
        f.write_str(msg)
    }
}

/// Error from [`SkipFilter`](crate::SkipFilter).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Skip markers are unbalanced, nested, or out of order.
    #[error("malformed skip markers: {violation} (line {line}, byte offset {offset})")]
    MalformedMarkers {
        /// Which pairing rule was broken.
        violation: MarkerViolation,
        /// Byte offset of the offending marker comment.
        offset: usize,
        /// 1-indexed line of the offending marker comment.
        line: usize,
    },
}

impl FilterError {
    /// Build a `MalformedMarkers` error for the marker at `offset` in `text`.
    pub(crate) fn malformed(text: &str, violation: MarkerViolation, offset: usize) -> Self {
        let line = text.as_bytes()[..offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1;
        Self::MalformedMarkers {
            violation,
            offset,
            line,
        }
    }

    /// The broken pairing rule.
    #[must_use]
    pub fn violation(&self) -> MarkerViolation {
        match self {
            Self::MalformedMarkers { violation, .. } => *violation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_computes_line() {
        let text = "one\ntwo\n<!-- x -->";
        let err = FilterError::malformed(text, MarkerViolation::UnmatchedStart, 8);
        assert_eq!(
            err,
            FilterError::MalformedMarkers {
                violation: MarkerViolation::UnmatchedStart,
                offset: 8,
                line: 3,
            }
        );
    }

    #[test]
    fn test_malformed_first_line() {
        let err = FilterError::malformed("<!-- x -->", MarkerViolation::Nested, 0);
        assert_eq!(err.violation(), MarkerViolation::Nested);
        assert!(matches!(err, FilterError::MalformedMarkers { line: 1, .. }));
    }

    #[test]
    fn test_display_names_rule_and_position() {
        let err = FilterError::malformed("a\nb", MarkerViolation::OutOfOrder, 2);
        let msg = err.to_string();
        assert!(msg.contains("before its start marker"), "got: {msg}");
        assert!(msg.contains("line 2"), "got: {msg}");
        assert!(msg.contains("byte offset 2"), "got: {msg}");
    }
}
