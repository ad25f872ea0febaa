//! Pattern registry: the citation grammars.
//!
//! Recognition is a pipeline over one input text:
//!
//! ```text
//! statute names ──┐
//!                 │  StatuteMatcher::build        (patterns/statute.rs)
//!                 └───────────────┬──────────────
//!                                 │
//! text ── PatternRegistry ────────┼─ fixed grammars (this module)
//!                                 v
//!                       scan (scanner.rs)
//!                         - collect per-kind matches
//!                         - order + suppress overlaps
//!                                 │
//!                                 v
//!                       resolve (resolver.rs)
//!                         - per-kind field extraction
//!                         - target derivation
//! ```
//!
//! Three grammars are fixed and compiled once (immutable values; the registry
//! holds cheap clones, so no matcher state is ever shared mutably between
//! scans). The statute-article grammar is dynamic: it is compiled from a
//! caller-supplied [`StatuteNameSet`] and must be rebuilt whenever that list
//! changes.

mod statute;

pub use statute::{MatcherFlags, MatcherOptions, StatuteMatcher, StatuteNameSet};

use crate::error::Result;
use crate::CitationKind;
use regex::Regex;

/// Constitutional-court judgment: `111年憲判字第13號`, spacing tolerated.
/// Groups: (year, serial).
fn constitutional_judgment() -> &'static Regex {
    regex!(r"(\d{2,3})\s*年\s*憲判字\s*第\s*(\d+)\s*號")
}

/// Grand-justice interpretation: `釋字第748號`. The serial may be written in
/// full-width digits. Groups: (serial).
fn interpretation() -> &'static Regex {
    regex!(r"釋字第\s*([0-9０-９]+)\s*號")
}

/// General court case: `民國110年度上字第1234號`. The case-type run is
/// non-greedy so it never swallows the trailing `字`/`第` markers.
/// Groups: (year, case_type, serial).
fn general_court_case() -> &'static Regex {
    regex!(r"(?:民國)?(\d{2,3})\s*年度?\s*(\p{Han}+?)\s*字\s*第\s*(\d+)\s*號")
}

/// The set of matchers one scan runs: the three fixed citation grammars plus
/// an optional statute-article matcher built from the caller's law names.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    constitutional: Regex,
    interpretation: Regex,
    general_case: Regex,
    statute: Option<StatuteMatcher>,
}

impl PatternRegistry {
    /// Registry with the fixed grammars only. Statute-article citations will
    /// not be recognized until a name list is supplied via [`with_statutes`].
    ///
    /// [`with_statutes`]: PatternRegistry::with_statutes
    pub fn new() -> Self {
        PatternRegistry {
            constitutional: constitutional_judgment().clone(),
            interpretation: interpretation().clone(),
            general_case: general_court_case().clone(),
            statute: None,
        }
    }

    /// Registry with the fixed grammars plus a statute-article matcher
    /// compiled from `names`. Fails with [`Error::Configuration`] when
    /// `names` is empty.
    ///
    /// [`Error::Configuration`]: crate::Error::Configuration
    pub fn with_statutes(names: &StatuteNameSet, options: &MatcherOptions) -> Result<Self> {
        let mut registry = Self::new();
        registry.statute = Some(StatuteMatcher::build(names, options)?);
        Ok(registry)
    }

    /// The fixed grammars with their kinds, in no particular order (the
    /// scanner orders matches, not matchers).
    pub(crate) fn fixed(&self) -> [(CitationKind, &Regex); 3] {
        [
            (CitationKind::ConstitutionalJudgment, &self.constitutional),
            (CitationKind::GrandJusticeInterpretation, &self.interpretation),
            (CitationKind::GeneralCourtCase, &self.general_case),
        ]
    }

    pub(crate) fn statute(&self) -> Option<&StatuteMatcher> {
        self.statute.as_ref()
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}
