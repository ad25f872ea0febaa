//! Citation resolution.
//!
//! The scanner produces `RawMatch`es, which are span-tagged but unstructured.
//! Resolution turns one match into a [`Citation`] (the structured fields) and
//! a [`ResolutionTarget`] (the canonical place to look the citation up) by:
//!
//! - reading capture groups positionally, per the fixed layout each kind's
//!   grammar guarantees (documented on [`RawMatch`]);
//! - normalizing numeric fields (whitespace stripped, full-width digits
//!   folded; statute article and subsection numbers additionally converted
//!   from CJK numerals to Arabic);
//! - deriving the target from the kind's rule, consulting the caller's
//!   optional local indexes before falling back to a generic deep link.
//!
//! Resolution is a pure function of its inputs: no network, no caching, no
//! retries. It fails only for [`CitationKind::Unrecognized`] — every known
//! kind has a total derivation rule.

use crate::error::{Error, Result};
use crate::numerals::{fold_digits, normalize_number};
use crate::{CitationKind, RawMatch};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Judgment/interpretation viewer of the constitutional court.
const CONSTITUTIONAL_VIEWER: &str = "https://cons.judicial.gov.tw/jcc/zh-tw/jep03/show";

/// Full-text search endpoint of the judicial open-data platform.
const OPEN_DATA_SEARCH: &str = "https://opendata.judicial.gov.tw/search";

/// Structured fields of a resolved citation, keyed by kind.
///
/// Numeric fields hold ASCII digits; statute articles with a `條之N`
/// compound normalize to `<base>-<n>` and subsection chains to `-`-joined
/// parts (`第1項第3款` -> `1-3`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Citation {
    ConstitutionalJudgment {
        /// ROC year, 2-3 digits.
        year: String,
        serial: String,
    },
    GrandJusticeInterpretation {
        serial: String,
    },
    GeneralCourtCase {
        year: String,
        /// CJK case-type label, e.g. `台上`.
        case_type: String,
        serial: String,
    },
    StatuteArticle {
        statute: String,
        article: String,
        subsection: Option<String>,
    },
}

impl Citation {
    pub fn kind(&self) -> CitationKind {
        match self {
            Citation::ConstitutionalJudgment { .. } => CitationKind::ConstitutionalJudgment,
            Citation::GrandJusticeInterpretation { .. } => {
                CitationKind::GrandJusticeInterpretation
            }
            Citation::GeneralCourtCase { .. } => CitationKind::GeneralCourtCase,
            Citation::StatuteArticle { .. } => CitationKind::StatuteArticle,
        }
    }
}

/// Canonical lookup target derived from a citation. Pure data; fetching is
/// the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionTarget {
    /// Direct deep link to the authoritative viewer.
    Link { url: String },
    /// Full-text search query (general court opinions have no stable public
    /// per-document URL).
    Search { url: String },
    /// Structured key the caller resolves against its own statute database;
    /// the core only names the statute precisely, it cannot reach its
    /// content.
    StatuteLookup {
        statute: String,
        article: String,
        subsection: Option<String>,
    },
}

impl ResolutionTarget {
    /// The target URL, when the target is addressable directly.
    pub fn url(&self) -> Option<&str> {
        match self {
            ResolutionTarget::Link { url } | ResolutionTarget::Search { url } => Some(url),
            ResolutionTarget::StatuteLookup { .. } => None,
        }
    }
}

/// One entry of the caller-supplied interpretation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationRecord {
    pub serial: String,
    /// Canonical URL of this interpretation.
    pub url: String,
    pub title: Option<String>,
}

/// Caller-supplied local indexes consulted before generic fallbacks.
///
/// Both maps are optional and borrowed: the resolver holds no state of its
/// own across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveContext<'a> {
    /// Statute name -> canonical URL.
    pub statute_index: Option<&'a HashMap<String, String>>,
    /// Interpretation serial -> record.
    pub interpretation_index: Option<&'a HashMap<String, InterpretationRecord>>,
}

/// A fully resolved citation: structured fields plus lookup target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolved {
    pub citation: Citation,
    pub target: ResolutionTarget,
}

/// Resolve one scanned match. See the module docs for the per-kind rules.
pub(crate) fn resolve_match(m: &RawMatch, ctx: &ResolveContext) -> Result<Resolved> {
    let resolved = match m.kind {
        CitationKind::ConstitutionalJudgment => resolve_constitutional(m)?,
        CitationKind::GrandJusticeInterpretation => resolve_interpretation(m, ctx)?,
        CitationKind::GeneralCourtCase => resolve_general(m)?,
        CitationKind::StatuteArticle => resolve_statute(m, ctx)?,
        CitationKind::Unrecognized => {
            return Err(Error::UnrecognizedCitation(m.text.clone()));
        }
    };

    debug!(kind = m.kind.name(), text = %m.text, "resolved citation");
    Ok(resolved)
}

/// A required capture group that is absent means the match did not come from
/// this crate's grammars; treat it like an unrecognized span.
fn required<'a>(m: &'a RawMatch, idx: usize) -> Result<&'a str> {
    m.group(idx).ok_or_else(|| Error::UnrecognizedCitation(m.text.clone()))
}

fn resolve_constitutional(m: &RawMatch) -> Result<Resolved> {
    let year = fold_digits(required(m, 0)?);
    let serial = fold_digits(required(m, 1)?);
    let url = format!("{CONSTITUTIONAL_VIEWER}?expno={year}憲判字第{serial}號");

    Ok(Resolved {
        citation: Citation::ConstitutionalJudgment { year, serial },
        target: ResolutionTarget::Link { url },
    })
}

fn resolve_interpretation(m: &RawMatch, ctx: &ResolveContext) -> Result<Resolved> {
    let serial = fold_digits(required(m, 0)?);

    // Local index first; the generic viewer link is the miss fallback.
    let url = ctx
        .interpretation_index
        .and_then(|index| index.get(&serial))
        .map(|record| record.url.clone())
        .unwrap_or_else(|| format!("{CONSTITUTIONAL_VIEWER}?expno={serial}"));

    Ok(Resolved {
        citation: Citation::GrandJusticeInterpretation { serial },
        target: ResolutionTarget::Link { url },
    })
}

fn resolve_general(m: &RawMatch) -> Result<Resolved> {
    let year = fold_digits(required(m, 0)?);
    let case_type = required(m, 1)?.to_string();
    let serial = fold_digits(required(m, 2)?);

    // No stable per-opinion URL exists; search the open-data platform for
    // the untouched matched substring.
    let url = format!("{OPEN_DATA_SEARCH}?q={}", urlencoding::encode(m.text.trim()));

    Ok(Resolved {
        citation: Citation::GeneralCourtCase { year, case_type, serial },
        target: ResolutionTarget::Search { url },
    })
}

fn resolve_statute(m: &RawMatch, ctx: &ResolveContext) -> Result<Resolved> {
    let statute = required(m, 0)?.to_string();
    let mut article = normalize_number(required(m, 1)?);
    if let Some(suffix) = m.group(2) {
        article = format!("{article}-{}", normalize_number(suffix));
    }
    let subsection = m.group(3).map(normalize_subsection);

    let citation = Citation::StatuteArticle {
        statute: statute.clone(),
        article: article.clone(),
        subsection: subsection.clone(),
    };

    let target = match ctx.statute_index.and_then(|index| index.get(&statute)) {
        Some(url) => ResolutionTarget::Link { url: url.clone() },
        None => ResolutionTarget::StatuteLookup { statute, article, subsection },
    };

    Ok(Resolved { citation, target })
}

/// Normalize a captured subsection chain: `1項第3` -> `1-3`.
fn normalize_subsection(raw: &str) -> String {
    raw.split("項第")
        .map(|part| normalize_number(part.trim()))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{MatcherOptions, PatternRegistry, StatuteNameSet};
    use crate::scanner::scan_registry;

    fn scan_one(text: &str) -> RawMatch {
        let matches = scan_registry(text, &PatternRegistry::new());
        assert_eq!(matches.len(), 1, "expected exactly one match in {text:?}");
        matches.into_iter().next().unwrap()
    }

    fn scan_one_statute(text: &str, names: &[&str]) -> RawMatch {
        let registry = PatternRegistry::with_statutes(
            &StatuteNameSet::new(names.iter().copied()),
            &MatcherOptions::default(),
        )
        .unwrap();
        let matches = scan_registry(text, &registry);
        assert_eq!(matches.len(), 1, "expected exactly one match in {text:?}");
        matches.into_iter().next().unwrap()
    }

    #[test]
    fn constitutional_judgment_deep_link() {
        let m = scan_one("111年憲判字第13號");
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::ConstitutionalJudgment { year: "111".into(), serial: "13".into() }
        );
        assert_eq!(
            resolved.target.url(),
            Some("https://cons.judicial.gov.tw/jcc/zh-tw/jep03/show?expno=111憲判字第13號")
        );
    }

    #[test]
    fn interpretation_falls_back_to_viewer_on_index_miss() {
        let m = scan_one("釋字第748號");
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::GrandJusticeInterpretation { serial: "748".into() }
        );
        assert_eq!(
            resolved.target.url(),
            Some("https://cons.judicial.gov.tw/jcc/zh-tw/jep03/show?expno=748")
        );
    }

    #[test]
    fn interpretation_index_hit_uses_the_indexed_url() {
        let mut index = HashMap::new();
        index.insert(
            "748".to_string(),
            InterpretationRecord {
                serial: "748".into(),
                url: "https://example.org/interpretations/748".into(),
                title: Some("同性二人婚姻自由案".into()),
            },
        );
        let ctx = ResolveContext { interpretation_index: Some(&index), ..Default::default() };

        let m = scan_one("釋字第748號");
        let resolved = resolve_match(&m, &ctx).unwrap();
        assert_eq!(resolved.target.url(), Some("https://example.org/interpretations/748"));
    }

    #[test]
    fn full_width_interpretation_serial_normalizes() {
        let m = scan_one("釋字第７４８號");
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::GrandJusticeInterpretation { serial: "748".into() }
        );
        assert_eq!(
            resolved.target.url(),
            Some("https://cons.judicial.gov.tw/jcc/zh-tw/jep03/show?expno=748")
        );
    }

    #[test]
    fn general_case_targets_the_open_data_search() {
        let m = scan_one("民國110年度上字第1234號");
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::GeneralCourtCase {
                year: "110".into(),
                case_type: "上".into(),
                serial: "1234".into(),
            }
        );
        assert_eq!(
            resolved.target.url(),
            Some(
                "https://opendata.judicial.gov.tw/search?q=%E6%B0%91%E5%9C%8B110%E5%B9%B4%E5%BA%A6%E4%B8%8A%E5%AD%97%E7%AC%AC1234%E8%99%9F"
            )
        );
    }

    #[test]
    fn statute_article_yields_a_lookup_key() {
        let m = scan_one_statute("民法第184條規定", &["民法", "刑法"]);
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::StatuteArticle {
                statute: "民法".into(),
                article: "184".into(),
                subsection: None,
            }
        );
        assert_eq!(
            resolved.target,
            ResolutionTarget::StatuteLookup {
                statute: "民法".into(),
                article: "184".into(),
                subsection: None,
            }
        );
        assert_eq!(resolved.target.url(), None);
    }

    #[test]
    fn statute_index_hit_yields_a_direct_link() {
        let mut index = HashMap::new();
        index.insert("民法".to_string(), "https://example.org/laws/civil-code".to_string());
        let ctx = ResolveContext { statute_index: Some(&index), ..Default::default() };

        let m = scan_one_statute("民法第184條", &["民法"]);
        let resolved = resolve_match(&m, &ctx).unwrap();
        assert_eq!(resolved.target.url(), Some("https://example.org/laws/civil-code"));
    }

    #[test]
    fn compound_articles_and_subsections_normalize() {
        let m = scan_one_statute("刑法第320條之1第1項第3款", &["刑法"]);
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::StatuteArticle {
                statute: "刑法".into(),
                article: "320-1".into(),
                subsection: Some("1-3".into()),
            }
        );
    }

    #[test]
    fn cjk_article_numbers_convert_to_arabic() {
        let m = scan_one_statute("民法第一百八十四條", &["民法"]);
        let resolved = resolve_match(&m, &ResolveContext::default()).unwrap();

        assert_eq!(
            resolved.citation,
            Citation::StatuteArticle {
                statute: "民法".into(),
                article: "184".into(),
                subsection: None,
            }
        );
    }

    #[test]
    fn unrecognized_kind_is_an_error() {
        let m = RawMatch {
            kind: CitationKind::Unrecognized,
            text: "某某文字".into(),
            start: 0,
            end: 12,
            groups: vec![],
        };
        let err = resolve_match(&m, &ResolveContext::default()).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedCitation(_)));
    }

    #[test]
    fn resolution_is_deterministic() {
        let m = scan_one("釋字第748號");
        let ctx = ResolveContext::default();
        assert_eq!(resolve_match(&m, &ctx).unwrap(), resolve_match(&m, &ctx).unwrap());
    }
}
