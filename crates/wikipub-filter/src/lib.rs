//! Skip-marker preprocessing for Markdown published to Confluence.
//!
//! Authors hide parts of a document from the wiki by wrapping them in a
//! pair of HTML comments:
//!
//! ```markdown
//! # Title
//! <!-- confluence-skip-start -->
//! Only visible in the repository.
//! <!-- confluence-skip-end -->
//! Visible everywhere.
//! ```
//!
//! [`SkipFilter`] removes every such span, marker comments included, and
//! leaves the remaining text byte-for-byte intact. Markers must alternate
//! strictly (start, end, start, end, ...); anything else is reported as
//! [`FilterError::MalformedMarkers`] and no output is produced.
//!
//! # Example
//!
//! ```
//! use wikipub_filter::filter_markdown;
//!
//! let input = "This is <!-- confluence-skip-start -->hidden<!-- confluence-skip-end --> visible.";
//! assert_eq!(filter_markdown(input).unwrap(), "This is  visible.");
//! ```

mod error;
mod fence;
mod filter;
mod marker;

pub use error::{FilterError, MarkerViolation};
pub use filter::{FilterOptions, SkipFilter, filter_markdown};
pub use marker::{
    DEFAULT_END_TOKEN, DEFAULT_START_TOKEN, Marker, MarkerKind, MarkerPattern, MarkerTokens,
    scan_markers,
};
