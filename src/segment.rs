//! Text segmentation for highlight rendering.
//!
//! Splits a text into literal runs and citation spans so a host UI can wrap
//! only the citation substrings in interactive markup while leaving all other
//! text untouched. Total coverage holds: concatenating every segment's text
//! reproduces the input exactly. Pure function, no DOM dependency — mutating
//! the document is the caller's concern.

use crate::scanner::order_and_suppress;
use crate::RawMatch;
use serde::{Deserialize, Serialize};

/// One segment of a text: either untouched literal text or a citation span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    Citation(RawMatch),
}

impl Segment {
    /// The segment's text, as it appears in the source.
    pub fn text(&self) -> &str {
        match self {
            Segment::Literal(text) => text,
            Segment::Citation(m) => &m.text,
        }
    }

    pub fn is_citation(&self) -> bool {
        matches!(self, Segment::Citation(_))
    }
}

/// Split `text` into literal and citation segments.
///
/// The match list is re-ordered and overlap-suppressed with the scanner's
/// discipline rather than trusted as given; matches whose spans do not fit
/// `text` (stale offsets from some other string) are dropped, keeping
/// coverage intact for the spans that do fit.
pub(crate) fn segment_text(text: &str, matches: &[RawMatch]) -> Vec<Segment> {
    let ordered = order_and_suppress(matches.to_vec());

    let mut segments = Vec::new();
    let mut cursor = 0;
    for m in ordered {
        if m.start < cursor || m.end > text.len() {
            continue;
        }
        let Some(span) = text.get(m.start..m.end) else {
            continue;
        };
        if m.start > cursor {
            segments.push(Segment::Literal(text[cursor..m.start].to_string()));
        }
        // Re-slice from the input so coverage holds even for a match carrying
        // stale text.
        segments.push(Segment::Citation(RawMatch { text: span.to_string(), ..m }));
        cursor = m.end;
    }
    if cursor < text.len() {
        segments.push(Segment::Literal(text[cursor..].to_string()));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternRegistry;
    use crate::scanner::scan_registry;
    use crate::CitationKind;

    fn coverage(text: &str) -> String {
        let matches = scan_registry(text, &PatternRegistry::new());
        segment_text(text, &matches).iter().map(Segment::text).collect()
    }

    #[test]
    fn concatenated_segments_reproduce_the_input() {
        let cases = [
            "",
            "無引用的純文字",
            "111年憲判字第13號",
            "前文 釋字第748號 後文",
            "在110年度台上字第3214號判決中，以及釋字第748號與109年憲判字第13號",
        ];
        for text in cases {
            assert_eq!(coverage(text), text, "coverage broken for {text:?}");
        }
    }

    #[test]
    fn literal_and_citation_segments_alternate_correctly() {
        let text = "前文 釋字第748號 後文";
        let matches = scan_registry(text, &PatternRegistry::new());
        let segments = segment_text(text, &matches);

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::Literal("前文 ".into()));
        assert!(segments[1].is_citation());
        assert_eq!(segments[1].text(), "釋字第748號");
        assert_eq!(segments[2], Segment::Literal(" 後文".into()));
    }

    #[test]
    fn citation_only_text_yields_a_single_citation_segment() {
        let text = "111年憲判字第13號";
        let matches = scan_registry(text, &PatternRegistry::new());
        let segments = segment_text(text, &matches);

        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_citation());
    }

    #[test]
    fn matches_with_stale_offsets_are_dropped() {
        let text = "短文";
        let stale = vec![RawMatch {
            kind: CitationKind::GrandJusticeInterpretation,
            text: "釋字第748號".into(),
            start: 0,
            end: 100,
            groups: vec![Some("748".into())],
        }];
        let segments = segment_text(text, &stale);
        assert_eq!(segments, vec![Segment::Literal("短文".into())]);
    }
}
