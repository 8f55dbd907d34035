//! Skip span validation and removal.

use std::borrow::Cow;
use std::ops::Range;

use crate::error::{FilterError, MarkerViolation};
use crate::fence::fenced_ranges;
use crate::marker::{Marker, MarkerKind, MarkerPattern, MarkerTokens};

/// Options for [`SkipFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Tokens identifying start and end markers.
    pub tokens: MarkerTokens,
    /// Treat markers inside fenced code blocks as literal text.
    pub respect_code_fences: bool,
}

/// Scanner state while pairing markers.
#[derive(Debug, Clone, Copy)]
enum State {
    /// Not inside a skip span.
    Outside,
    /// Inside a span opened by the marker at this offset.
    Inside(usize),
}

/// Removes marker-delimited skip spans from Markdown.
///
/// Stateless after construction; one instance can filter any number of
/// documents, from any number of threads.
///
/// # Example
///
/// ```
/// use wikipub_filter::{FilterOptions, MarkerTokens, SkipFilter};
///
/// let filter = SkipFilter::new(FilterOptions {
///     tokens: MarkerTokens::new("wiki-hide", "wiki-show"),
///     ..Default::default()
/// });
/// let output = filter.filter("A<!-- wiki-hide -->B<!-- wiki-show -->C").unwrap();
/// assert_eq!(output, "AC");
/// ```
#[derive(Debug, Clone)]
pub struct SkipFilter {
    options: FilterOptions,
    pattern: MarkerPattern,
}

impl Default for SkipFilter {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}

impl SkipFilter {
    /// Create a filter with the given options.
    #[must_use]
    pub fn new(options: FilterOptions) -> Self {
        let pattern = MarkerPattern::new(&options.tokens);
        Self { options, pattern }
    }

    /// Options this filter was built with.
    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Markers that take part in filtering, in document order.
    ///
    /// With `respect_code_fences`, markers starting inside a fenced code
    /// block are excluded.
    #[must_use]
    pub fn markers(&self, text: &str) -> Vec<Marker> {
        let mut markers = self.pattern.scan(text);
        if self.options.respect_code_fences && !markers.is_empty() {
            let fences = fenced_ranges(text);
            markers.retain(|m| !fences.iter().any(|f| f.contains(&m.start)));
        }
        markers
    }

    /// Validate marker pairing and return the byte ranges to remove.
    ///
    /// Each range runs from the start marker's `<!--` through the end
    /// marker's `-->`. Ranges are disjoint and in document order.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedMarkers`] if markers do not strictly
    /// alternate start, end, start, end.
    pub fn spans(&self, text: &str) -> Result<Vec<Range<usize>>, FilterError> {
        let markers = self.markers(text);
        let mut spans = Vec::with_capacity(markers.len() / 2);
        let mut state = State::Outside;

        for (idx, marker) in markers.iter().enumerate() {
            state = match (state, marker.kind) {
                (State::Outside, MarkerKind::Start) => State::Inside(marker.start),
                (State::Inside(open), MarkerKind::End) => {
                    spans.push(open..marker.end);
                    State::Outside
                }
                (State::Inside(_), MarkerKind::Start) => {
                    return Err(FilterError::malformed(
                        text,
                        MarkerViolation::Nested,
                        marker.start,
                    ));
                }
                (State::Outside, MarkerKind::End) => {
                    let start_follows = markers[idx + 1..]
                        .iter()
                        .any(|m| m.kind == MarkerKind::Start);
                    let violation = if start_follows {
                        MarkerViolation::OutOfOrder
                    } else {
                        MarkerViolation::UnmatchedEnd
                    };
                    return Err(FilterError::malformed(text, violation, marker.start));
                }
            };
        }

        if let State::Inside(open) = state {
            return Err(FilterError::malformed(
                text,
                MarkerViolation::UnmatchedStart,
                open,
            ));
        }

        Ok(spans)
    }

    /// Remove all skip spans from `text`.
    ///
    /// Text outside the spans is kept verbatim; nothing is trimmed or
    /// inserted where a span was cut out.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedMarkers`] if markers are unbalanced,
    /// nested, or out of order. No partial output is produced.
    pub fn filter(&self, text: &str) -> Result<String, FilterError> {
        self.apply(text).map(Cow::into_owned)
    }

    /// Like [`filter`](Self::filter), but borrows `text` when it has no
    /// skip spans.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::MalformedMarkers`] if markers are malformed.
    pub fn apply<'a>(&self, text: &'a str) -> Result<Cow<'a, str>, FilterError> {
        let spans = self.spans(text)?;
        if spans.is_empty() {
            return Ok(Cow::Borrowed(text));
        }

        let removed: usize = spans.iter().map(|span| span.end - span.start).sum();
        let mut output = String::with_capacity(text.len() - removed);
        let mut cursor = 0;
        for span in &spans {
            output.push_str(&text[cursor..span.start]);
            cursor = span.end;
        }
        output.push_str(&text[cursor..]);

        tracing::debug!(
            spans = spans.len(),
            removed_bytes = removed,
            "Removed skip spans"
        );
        Ok(Cow::Owned(output))
    }
}

/// Remove skip spans delimited by the default `confluence-skip-start` /
/// `confluence-skip-end` markers.
///
/// # Errors
///
/// Returns [`FilterError::MalformedMarkers`] if markers are malformed.
pub fn filter_markdown(text: &str) -> Result<String, FilterError> {
    SkipFilter::default().filter(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn violation_of(text: &str) -> MarkerViolation {
        filter_markdown(text)
            .expect_err("expected malformed markers")
            .violation()
    }

    #[test]
    fn test_block_skip() {
        let content = "# Title
<!-- confluence-skip-start -->
This is a block of text
that should be skipped.
<!-- confluence-skip-end -->
Visible text.";
        assert_eq!(filter_markdown(content).unwrap(), "# Title\n\nVisible text.");
    }

    #[test]
    fn test_inline_skip() {
        let content =
            "This is <!-- confluence-skip-start -->hidden<!-- confluence-skip-end --> visible.";
        assert_eq!(filter_markdown(content).unwrap(), "This is  visible.");
    }

    #[test]
    fn test_multiple_skips() {
        let content = "Start.
<!-- confluence-skip-start -->
Skip 1
<!-- confluence-skip-end -->
Middle.
<!-- confluence-skip-start -->
Skip 2
<!-- confluence-skip-end -->
End.";
        assert_eq!(
            filter_markdown(content).unwrap(),
            "Start.\n\nMiddle.\n\nEnd."
        );
    }

    #[test]
    fn test_whitespace_variations() {
        for content in [
            "A<!--confluence-skip-start-->B<!--confluence-skip-end-->C",
            "A<!--   confluence-skip-start   -->B<!--   confluence-skip-end   -->C",
            "A<!--\nconfluence-skip-start\n-->B<!--\nconfluence-skip-end\n-->C",
        ] {
            assert_eq!(filter_markdown(content).unwrap(), "AC", "input: {content:?}");
        }
    }

    #[test]
    fn test_no_markers_is_identity() {
        for content in [
            "",
            "# Title\n\nSome *text*.\n",
            "<!-- an ordinary comment -->\ntext",
            "trailing <!-- unterminated",
        ] {
            assert_eq!(filter_markdown(content).unwrap(), content);
        }
    }

    #[test]
    fn test_ordinary_comments_inside_and_outside_span() {
        let content = "<!-- keep -->a<!-- confluence-skip-start --><!-- gone --><!-- confluence-skip-end -->b";
        assert_eq!(filter_markdown(content).unwrap(), "<!-- keep -->ab");
    }

    #[test]
    fn test_literal_comment_opener_before_span() {
        let content = "Write `<!--` to open a comment.
<!-- confluence-skip-start -->
secret
<!-- confluence-skip-end -->
Visible.";
        assert_eq!(
            filter_markdown(content).unwrap(),
            "Write `<!--` to open a comment.\n\nVisible."
        );
    }

    #[test]
    fn test_literal_comment_opener_inside_span() {
        let content =
            "A<!-- confluence-skip-start -->use `<!--` here<!-- confluence-skip-end -->B";
        assert_eq!(filter_markdown(content).unwrap(), "AB");
    }

    #[test]
    fn test_apply_borrows_without_spans() {
        let filter = SkipFilter::default();
        let content = "# Title\n<!-- note -->\n";
        assert!(matches!(filter.apply(content).unwrap(), Cow::Borrowed(_)));

        let content = "a<!-- confluence-skip-start -->b<!-- confluence-skip-end -->";
        assert!(matches!(filter.apply(content).unwrap(), Cow::Owned(ref s) if s == "a"));
    }

    #[test]
    fn test_indented_backticks_do_not_hide_markers() {
        let filter = SkipFilter::new(FilterOptions {
            respect_code_fences: true,
            ..Default::default()
        });
        let content = "Example:

    ```

<!-- confluence-skip-start -->
secret
<!-- confluence-skip-end -->
End.";
        assert_eq!(
            filter.filter(content).unwrap(),
            "Example:\n\n    ```\n\n\nEnd."
        );
    }

    #[test]
    fn test_filter_is_idempotent() {
        let content = "x <!-- confluence-skip-start -->y<!-- confluence-skip-end --> z\n";
        let once = filter_markdown(content).unwrap();
        assert_eq!(filter_markdown(&once).unwrap(), once);
    }

    #[test]
    fn test_preserves_multibyte_text() {
        let content = "héllo <!-- confluence-skip-start -->скрыто<!-- confluence-skip-end -->wörld ✓";
        assert_eq!(filter_markdown(content).unwrap(), "héllo wörld ✓");
    }

    #[test]
    fn test_unbalanced_start_only() {
        assert_eq!(
            violation_of("<!-- confluence-skip-start --> Hidden"),
            MarkerViolation::UnmatchedStart
        );
    }

    #[test]
    fn test_unbalanced_end_only() {
        assert_eq!(
            violation_of("Hidden <!-- confluence-skip-end -->"),
            MarkerViolation::UnmatchedEnd
        );
    }

    #[test]
    fn test_unbalanced_extra_end_after_pair() {
        let content = "<!-- confluence-skip-start -->a<!-- confluence-skip-end -->b<!-- confluence-skip-end -->";
        assert_eq!(violation_of(content), MarkerViolation::UnmatchedEnd);
    }

    #[test]
    fn test_nested() {
        let content = "1<!-- confluence-skip-start -->2<!-- confluence-skip-start -->3<!-- confluence-skip-end -->4<!-- confluence-skip-end -->5";
        let err = filter_markdown(content).unwrap_err();
        assert_eq!(
            err,
            FilterError::MalformedMarkers {
                violation: MarkerViolation::Nested,
                offset: 32,
                line: 1,
            }
        );
    }

    #[test]
    fn test_out_of_order() {
        let content = "A <!-- confluence-skip-end --> B <!-- confluence-skip-start --> C";
        let err = filter_markdown(content).unwrap_err();
        assert_eq!(
            err,
            FilterError::MalformedMarkers {
                violation: MarkerViolation::OutOfOrder,
                offset: 2,
                line: 1,
            }
        );
    }

    #[test]
    fn test_unmatched_start_reports_opening_marker() {
        let content = "ok\n<!-- confluence-skip-start -->a<!-- confluence-skip-end -->\n\n<!-- confluence-skip-start -->\nrest";
        let err = filter_markdown(content).unwrap_err();
        let expected_offset = content.rfind("<!--").unwrap();
        assert_eq!(
            err,
            FilterError::MalformedMarkers {
                violation: MarkerViolation::UnmatchedStart,
                offset: expected_offset,
                line: 4,
            }
        );
    }

    #[test]
    fn test_spans_cover_marker_comments() {
        let content = "a<!-- confluence-skip-start -->b<!-- confluence-skip-end -->c";
        let spans = SkipFilter::default().spans(content).unwrap();
        assert_eq!(spans, vec![1..content.len() - 1]);
    }

    #[test]
    fn test_custom_tokens_ignore_defaults() {
        let filter = SkipFilter::new(FilterOptions {
            tokens: MarkerTokens::new("wiki-hide", "wiki-show"),
            respect_code_fences: false,
        });
        let content = "<!-- confluence-skip-end -->A<!-- wiki-hide -->B<!-- wiki-show -->C";
        assert_eq!(
            filter.filter(content).unwrap(),
            "<!-- confluence-skip-end -->AC"
        );
    }

    #[test]
    fn test_markers_in_code_fence_are_matched_by_default() {
        let content = "```\n<!-- confluence-skip-start -->\n```\n";
        assert_eq!(violation_of(content), MarkerViolation::UnmatchedStart);
    }

    #[test]
    fn test_respect_code_fences_keeps_fenced_markers() {
        let filter = SkipFilter::new(FilterOptions {
            respect_code_fences: true,
            ..Default::default()
        });
        let content = "Use markers like this:

```markdown
<!-- confluence-skip-start -->
internal notes
<!-- confluence-skip-end -->
```
<!-- confluence-skip-start -->
secret
<!-- confluence-skip-end -->
done";
        let expected = "Use markers like this:

```markdown
<!-- confluence-skip-start -->
internal notes
<!-- confluence-skip-end -->
```

done";
        assert_eq!(filter.filter(content).unwrap(), expected);
    }

    #[test]
    fn test_respect_code_fences_ignores_unbalanced_fenced_marker() {
        let filter = SkipFilter::new(FilterOptions {
            respect_code_fences: true,
            ..Default::default()
        });
        let content = "~~~\n<!-- confluence-skip-end -->\n~~~\ntext";
        assert_eq!(filter.filter(content).unwrap(), content);
        assert!(filter.markers(content).is_empty());
    }
}
