#[macro_use]
mod macros;

mod api;
mod error;
mod numerals;
mod patterns;
mod resolver;
mod scanner;
mod segment;

pub use api::{annotate, resolve, scan, scan_with, segment};
pub use error::{Error, Result};
pub use patterns::{MatcherFlags, MatcherOptions, PatternRegistry, StatuteMatcher, StatuteNameSet};
pub use resolver::{Citation, InterpretationRecord, ResolutionTarget, Resolved, ResolveContext};
pub use segment::Segment;

use serde::{Deserialize, Serialize};

// --- Shared value types ------------------------------------------------------

/// Classification of a citation substring, assigned at match time.
///
/// The ordering used to break ties between matches starting at the same
/// offset is fixed: constitutional judgments and general-court citations have
/// more distinguishing structure than the generic statute-article form, so
/// they must not be shadowed by it. See [`CitationKind::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CitationKind {
    /// Constitutional-court judgment, e.g. `111年憲判字第13號`.
    ConstitutionalJudgment,
    /// Grand-justice interpretation, e.g. `釋字第748號`.
    GrandJusticeInterpretation,
    /// General court case number, e.g. `民國110年度上字第1234號`.
    GeneralCourtCase,
    /// Statute article reference, e.g. `民法第184條第1項`.
    StatuteArticle,
    /// A span that matched no known grammar. Never produced by the scanner;
    /// exists so callers can tag their own heuristic candidates.
    Unrecognized,
}

impl CitationKind {
    /// Tie-break rank for matches starting at the same offset with the same
    /// length. Lower wins.
    pub(crate) fn rank(self) -> u8 {
        match self {
            CitationKind::ConstitutionalJudgment => 0,
            CitationKind::GeneralCourtCase => 1,
            CitationKind::GrandJusticeInterpretation => 2,
            CitationKind::StatuteArticle => 3,
            CitationKind::Unrecognized => 4,
        }
    }

    /// Stable snake_case name, for logs and serialized output.
    pub fn name(self) -> &'static str {
        match self {
            CitationKind::ConstitutionalJudgment => "constitutional_judgment",
            CitationKind::GrandJusticeInterpretation => "interpretation",
            CitationKind::GeneralCourtCase => "general_court_case",
            CitationKind::StatuteArticle => "statute_article",
            CitationKind::Unrecognized => "unrecognized",
        }
    }
}

/// One citation match found by the scanner.
///
/// `start`/`end` are byte offsets into the scanned text (`start < end`).
/// `groups` holds the grammar's capture groups in order, starting at group 1;
/// the layout is fixed per kind and read positionally by the resolver:
///
/// ```text
/// ConstitutionalJudgment      [year, serial]
/// GrandJusticeInterpretation  [serial]
/// GeneralCourtCase            [year, case_type, serial]
/// StatuteArticle              [statute, article, 之-suffix?, subsection?]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatch {
    pub kind: CitationKind,
    /// The matched substring, verbatim.
    pub text: String,
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
    /// Capture groups 1.., `None` where an optional group did not participate.
    pub groups: Vec<Option<String>>,
}

impl RawMatch {
    /// Length of the matched span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Capture group `idx` (0-based over `groups`, i.e. grammar group 1 is
    /// `group(0)`), if it participated in the match.
    pub fn group(&self, idx: usize) -> Option<&str> {
        self.groups.get(idx).and_then(|g| g.as_deref())
    }
}
