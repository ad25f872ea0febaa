//! Public surface.
//!
//! Everything here is pure and synchronous: scanning, resolving, and
//! segmenting complete deterministically and immediately given their inputs,
//! hold no state across calls, and are safe to invoke concurrently from any
//! number of callers. Network fetches, caching, retries, and rendering all
//! belong to the caller.

use crate::error::Result;
use crate::patterns::PatternRegistry;
use crate::resolver::{ResolveContext, Resolved};
use crate::segment::Segment;
use crate::{resolver, scanner, segment as segmenter, RawMatch};

/// Scan `text` with the fixed citation grammars (constitutional judgments,
/// interpretations, general court cases). Statute-article citations need a
/// statute-name list; use [`scan_with`] and a
/// [`PatternRegistry::with_statutes`] registry for those.
///
/// # Example
/// ```
/// use citeright::{scan, CitationKind};
///
/// let matches = scan("本院引用釋字第748號之意旨");
/// assert_eq!(matches.len(), 1);
/// assert_eq!(matches[0].kind, CitationKind::GrandJusticeInterpretation);
/// assert_eq!(matches[0].text, "釋字第748號");
/// ```
pub fn scan(text: &str) -> Vec<RawMatch> {
    scan_with(text, &PatternRegistry::new())
}

/// Scan `text` with every matcher in `registry`. Returns the ordered,
/// non-overlapping matches; scanning the same text twice yields identical
/// results.
pub fn scan_with(text: &str, registry: &PatternRegistry) -> Vec<RawMatch> {
    scanner::scan_registry(text, registry)
}

/// Resolve one match into its structured citation and lookup target,
/// consulting the caller's optional local indexes in `ctx` before generic
/// fallbacks. Fails with [`Error::UnrecognizedCitation`] only for matches of
/// kind [`CitationKind::Unrecognized`].
///
/// [`Error::UnrecognizedCitation`]: crate::Error::UnrecognizedCitation
/// [`CitationKind::Unrecognized`]: crate::CitationKind::Unrecognized
pub fn resolve(m: &RawMatch, ctx: &ResolveContext) -> Result<Resolved> {
    resolver::resolve_match(m, ctx)
}

/// Split `text` into literal and citation segments around `matches`.
/// Concatenating every segment's text reproduces `text` exactly.
pub fn segment(text: &str, matches: &[RawMatch]) -> Vec<Segment> {
    segmenter::segment_text(text, matches)
}

/// Scan and segment in one step.
pub fn annotate(text: &str, registry: &PatternRegistry) -> Vec<Segment> {
    let matches = scan_with(text, registry);
    segment(text, &matches)
}
