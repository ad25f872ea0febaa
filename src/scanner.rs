//! Citation scanning: collect, order, suppress.
//!
//! Each registered matcher runs independently over the full text; all
//! candidate matches are then merged into one ordered, non-overlapping
//! sequence:
//!
//! 1. sort ascending by start offset; ties break by length descending (the
//!    longer, more specific match wins) and then by the fixed kind priority
//!    (`CitationKind::rank`);
//! 2. sweep left to right, discarding any match that starts inside the span
//!    of the last accepted match.
//!
//! Scanning is synchronous and pure: no state survives a call, and scanning
//! the same text twice yields identical results. Markup exclusion is the
//! caller's job — only invoke the scanner on plain extracted text.

use crate::patterns::PatternRegistry;
use crate::{CitationKind, RawMatch};
use regex::Regex;
use tracing::debug;

/// Run every matcher in `registry` over `text` and return the ordered,
/// non-overlapping matches.
pub(crate) fn scan_registry(text: &str, registry: &PatternRegistry) -> Vec<RawMatch> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    for (kind, re) in registry.fixed() {
        collect(kind, re, text, &mut candidates);
    }
    if let Some(statute) = registry.statute() {
        candidates.extend(statute.find(text));
    }

    let found = candidates.len();
    let accepted = order_and_suppress(candidates);
    debug!(candidates = found, accepted = accepted.len(), "scan complete");
    accepted
}

/// Collect every match of one fixed grammar, capture groups included.
fn collect(kind: CitationKind, re: &Regex, text: &str, out: &mut Vec<RawMatch>) {
    for caps in re.captures_iter(text) {
        let m = caps.get(0).expect("group 0 always participates");
        let groups = (1..caps.len())
            .map(|i| caps.get(i).map(|g| g.as_str().to_string()))
            .collect();
        out.push(RawMatch {
            kind,
            text: m.as_str().to_string(),
            start: m.start(),
            end: m.end(),
            groups,
        });
    }
}

/// Order candidates and drop overlaps.
///
/// Shared with the segmenter, which re-applies the same discipline to
/// caller-supplied match lists rather than trusting their order.
pub(crate) fn order_and_suppress(mut candidates: Vec<RawMatch>) -> Vec<RawMatch> {
    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.kind.rank().cmp(&b.kind.rank()))
    });

    let mut accepted: Vec<RawMatch> = Vec::new();
    for m in candidates {
        match accepted.last() {
            Some(prev) if m.start < prev.end => continue,
            _ => accepted.push(m),
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{MatcherOptions, StatuteNameSet};

    fn registry_with(names: &[&str]) -> PatternRegistry {
        PatternRegistry::with_statutes(
            &StatuteNameSet::new(names.iter().copied()),
            &MatcherOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn empty_text_yields_no_matches() {
        assert!(scan_registry("", &PatternRegistry::new()).is_empty());
    }

    #[test]
    fn constitutional_judgment_spans_the_whole_citation() {
        let text = "111年憲判字第13號";
        let matches = scan_registry(text, &PatternRegistry::new());

        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.kind, CitationKind::ConstitutionalJudgment);
        assert_eq!(m.start, 0);
        assert_eq!(m.end, text.len());
        assert_eq!(m.text, text);
        assert_eq!(m.group(0), Some("111"));
        assert_eq!(m.group(1), Some("13"));
    }

    #[test]
    fn kind_priority_breaks_same_offset_ties() {
        // The general-court grammar also matches a constitutional judgment
        // (case type 憲判) over the exact same span; the constitutional kind
        // must win the tie.
        let matches = scan_registry("109年憲判字第13號", &PatternRegistry::new());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].kind, CitationKind::ConstitutionalJudgment);
    }

    #[test]
    fn mixed_text_yields_ordered_disjoint_matches() {
        let text = "在110年度台上字第3214號判決中，以及釋字第748號與109年憲判字第13號";
        let matches = scan_registry(text, &PatternRegistry::new());

        let kinds: Vec<_> = matches.iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CitationKind::GeneralCourtCase,
                CitationKind::GrandJusticeInterpretation,
                CitationKind::ConstitutionalJudgment,
            ]
        );

        // Non-overlap invariant: each match ends at or before the next one
        // starts.
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert_eq!(matches[0].text, "110年度台上字第3214號");
        assert_eq!(matches[1].text, "釋字第748號");
        assert_eq!(matches[2].text, "109年憲判字第13號");
    }

    #[test]
    fn statute_matches_join_the_same_ordered_stream() {
        let text = "民法第184條與釋字第748號";
        let matches = scan_registry(text, &registry_with(&["民法"]));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].kind, CitationKind::StatuteArticle);
        assert_eq!(matches[0].text, "民法第184條");
        assert_eq!(matches[1].kind, CitationKind::GrandJusticeInterpretation);
    }

    #[test]
    fn scanning_is_deterministic() {
        let text = "釋字第748號 民法第184條之1第1項 110年度上字第1234號";
        let registry = registry_with(&["民法", "刑法"]);

        let first = scan_registry(text, &registry);
        let second = scan_registry(text, &registry);
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn longer_match_wins_at_the_same_offset() {
        let candidates = vec![
            RawMatch {
                kind: CitationKind::StatuteArticle,
                text: "民法第184條".into(),
                start: 0,
                end: "民法第184條".len(),
                groups: vec![],
            },
            RawMatch {
                kind: CitationKind::StatuteArticle,
                text: "民法第184條之1".into(),
                start: 0,
                end: "民法第184條之1".len(),
                groups: vec![],
            },
        ];
        let kept = order_and_suppress(candidates);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "民法第184條之1");
    }
}
