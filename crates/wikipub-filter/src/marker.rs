//! Skip marker recognition.
//!
//! A marker is `<!--`, optional whitespace, exactly one of the two reserved
//! tokens, optional whitespace, `-->`. Recognition is anchored on the tokens,
//! so a stray `<!--` elsewhere in the text never swallows a marker.

use regex::Regex;

/// Default token opening a skip span.
pub const DEFAULT_START_TOKEN: &str = "confluence-skip-start";

/// Default token closing a skip span.
pub const DEFAULT_END_TOKEN: &str = "confluence-skip-end";

/// Kind of skip marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Opens a skip span.
    Start,
    /// Closes a skip span.
    End,
}

/// A marker comment found in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    /// Marker kind.
    pub kind: MarkerKind,
    /// Byte offset of `<!--`.
    pub start: usize,
    /// Byte offset just past `-->`.
    pub end: usize,
}

/// Reserved token pair identifying skip markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerTokens {
    /// Token opening a span.
    pub start: String,
    /// Token closing a span.
    pub end: String,
}

impl Default for MarkerTokens {
    fn default() -> Self {
        Self::new(DEFAULT_START_TOKEN, DEFAULT_END_TOKEN)
    }
}

impl MarkerTokens {
    /// Create a token pair.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Compiled matcher for one token pair.
///
/// Tokens are matched literally and case-sensitively; whitespace (including
/// newlines) between the comment delimiters and the token is ignored.
#[derive(Debug, Clone)]
pub struct MarkerPattern {
    regex: Regex,
}

impl MarkerPattern {
    /// Compile a matcher for `tokens`.
    #[must_use]
    pub fn new(tokens: &MarkerTokens) -> Self {
        let pattern = format!(
            r"<!--\s*(?:(?P<start>{})|(?P<end>{}))\s*-->",
            regex::escape(&tokens.start),
            regex::escape(&tokens.end)
        );
        // Escaped literals: only the regex size limit can reject this
        let regex = Regex::new(&pattern).expect("invalid marker regex");
        Self { regex }
    }

    /// Find every marker in `text`, in document order.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<Marker> {
        // Fast path: no comments at all
        if !text.contains("<!--") {
            return Vec::new();
        }

        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let kind = if caps.name("start").is_some() {
                    MarkerKind::Start
                } else {
                    MarkerKind::End
                };
                Some(Marker {
                    kind,
                    start: whole.start(),
                    end: whole.end(),
                })
            })
            .collect()
    }
}

/// Find every marker for `tokens` in `text`, in document order.
///
/// Compiles a fresh [`MarkerPattern`]; reuse one (or a
/// [`SkipFilter`](crate::SkipFilter)) when scanning many documents.
#[must_use]
pub fn scan_markers(text: &str, tokens: &MarkerTokens) -> Vec<Marker> {
    MarkerPattern::new(tokens).scan(text)
}
