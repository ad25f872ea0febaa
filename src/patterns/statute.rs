//! Dynamic statute-article matcher.
//!
//! Unlike the fixed citation grammars, the statute-article grammar depends on
//! caller data: the list of law names known to the caller's statute database.
//! [`StatuteMatcher::build`] compiles that list into a matcher value at call
//! time; the compiled matcher is immutable from then on and must be rebuilt
//! whenever the name list changes.
//!
//! A matcher also carries an exclusion heuristic: a set of characters that
//! suppress a match when one of them immediately precedes it (e.g. `根據` /
//! `依` / `按`, which introduce a descriptive phrase rather than a standalone
//! citation). This is a heuristic, not a grammar guarantee — it both misses
//! and over-admits depending on context, and the default set is carried over
//! from field use without further vetting. The `regex` crate has no
//! lookbehind, so the check runs on the character preceding each match.

use crate::error::{Error, Result};
use crate::{CitationKind, RawMatch};
use bitflags::bitflags;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Numeral class accepted in article and subsection numbers: ASCII digits,
/// full-width digits, and traditional CJK numerals (common and formal forms).
const NUMERAL_CLASS: &str = "[0-9０-９一二三四五六七八九十百千萬零壹貳參肆伍陸柒捌玖拾佰仟]";

/// Characters that suppress an immediately following statute match.
const DEFAULT_EXCLUDED_PREFIXES: &str = "根據依按與宣告，以及不符主管機關基於甲因酒駕違反";

bitflags! {
    /// Option flags for [`StatuteMatcher::build`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MatcherFlags: u8 {
        /// Match Latin letters in statute names case-sensitively. CJK has no
        /// case; this only matters for names carrying Latin abbreviations.
        const CASE_SENSITIVE = 1 << 0;
        /// Require word boundaries around the whole citation. Off by
        /// default: `\b` treats adjacent Han characters as word-internal, so
        /// this silently suppresses legitimate mid-sentence citations.
        const WHOLE_WORD = 1 << 1;
        /// Tolerate whitespace inside the numeral run (`第 184 條`).
        const ALLOW_SPACES = 1 << 2;
        /// Capture trailing subsection markers (`項`, `款`, `目`).
        const SUBSECTIONS = 1 << 3;
    }
}

/// Options controlling how the statute-article grammar is compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherOptions {
    pub flags: MatcherFlags,
    /// Characters whose presence immediately before a match suppresses it.
    pub excluded_prefixes: Vec<char>,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        MatcherOptions {
            flags: MatcherFlags::ALLOW_SPACES | MatcherFlags::SUBSECTIONS,
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES.chars().collect(),
        }
    }
}

/// Ordered set of distinct statute names supplied by the caller.
///
/// Lifecycle is request-scoped: the statute matcher is compiled from this
/// set, so rebuild the matcher whenever the caller's law list changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatuteNameSet {
    names: Vec<String>,
}

impl StatuteNameSet {
    /// Build from any iterator of names. Order is preserved, duplicates and
    /// blank entries are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        StatuteNameSet { names: out }
    }

    /// Load names from JSON. Accepts the shapes statute databases export:
    /// a bare array of strings, an array of `{"name": ...}` objects, or an
    /// object carrying the array under `laws` or `legalNames`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|err| Error::Configuration(format!("invalid statute name JSON: {err}")))?;

        let items = match &value {
            serde_json::Value::Array(items) => items.as_slice(),
            serde_json::Value::Object(map) => map
                .get("laws")
                .or_else(|| map.get("legalNames"))
                .and_then(|v| v.as_array())
                .map(|v| v.as_slice())
                .ok_or_else(|| {
                    Error::Configuration(
                        "statute name JSON object must carry a `laws` or `legalNames` array".into(),
                    )
                })?,
            _ => {
                return Err(Error::Configuration(
                    "statute name JSON must be an array or an object".into(),
                ));
            }
        };

        let mut names = Vec::with_capacity(items.len());
        for item in items {
            match item {
                serde_json::Value::String(s) => names.push(s.clone()),
                serde_json::Value::Object(o) => {
                    let name = o.get("name").and_then(|v| v.as_str()).ok_or_else(|| {
                        Error::Configuration("statute name object is missing `name`".into())
                    })?;
                    names.push(name.to_string());
                }
                other => {
                    return Err(Error::Configuration(format!(
                        "unsupported statute name entry: {other}"
                    )));
                }
            }
        }

        Ok(Self::new(names))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Compiled statute-article matcher.
///
/// Grammar, with `S` standing for optional whitespace when
/// [`MatcherFlags::ALLOW_SPACES`] is set:
///
/// ```text
/// (name₁|name₂|...) 第 S (number) S 條 [之 S (number)] [第 S (number [項第 number]*) S 項|款|目]
///  group 1              group 2          group 3          group 4
/// ```
///
/// Names are escaped before compilation, so arbitrary caller-supplied names
/// cannot corrupt the grammar.
#[derive(Debug, Clone)]
pub struct StatuteMatcher {
    re: Regex,
    excluded_prefixes: Vec<char>,
}

impl StatuteMatcher {
    /// Compile a matcher from `names`. Fails with [`Error::Configuration`]
    /// when `names` is empty: a matcher over zero alternatives is meaningless
    /// and must be rejected rather than silently matching nothing.
    pub fn build(names: &StatuteNameSet, options: &MatcherOptions) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::Configuration(
                "statute matcher requires at least one statute name".into(),
            ));
        }

        let flags = options.flags;
        let alternatives: Vec<String> = names.iter().map(regex::escape).collect();
        let names_alt = alternatives.join("|");
        let sp = if flags.contains(MatcherFlags::ALLOW_SPACES) { r"\s*" } else { "" };
        let num = format!("{NUMERAL_CLASS}+");

        let subsection = if flags.contains(MatcherFlags::SUBSECTIONS) {
            format!("(?:第{sp}({num}(?:{sp}項第{sp}{num})*){sp}[項款目])?")
        } else {
            String::new()
        };

        let mut pattern =
            format!("({names_alt})第{sp}({num}){sp}條(?:{sp}之{sp}({num}))?{subsection}");
        if flags.contains(MatcherFlags::WHOLE_WORD) {
            pattern = format!(r"\b{pattern}\b");
        }
        if !flags.contains(MatcherFlags::CASE_SENSITIVE) {
            pattern = format!("(?i){pattern}");
        }

        let re = Regex::new(&pattern)?;
        Ok(StatuteMatcher { re, excluded_prefixes: options.excluded_prefixes.clone() })
    }

    /// All statute-article matches in `text`, minus those suppressed by the
    /// excluded-prefix heuristic. Unordered; the scanner orders and
    /// deduplicates across kinds.
    pub(crate) fn find(&self, text: &str) -> Vec<RawMatch> {
        let mut out = Vec::new();
        for caps in self.re.captures_iter(text) {
            let m = caps.get(0).expect("group 0 always participates");
            if let Some(prev) = text[..m.start()].chars().next_back() {
                if self.excluded_prefixes.contains(&prev) {
                    continue;
                }
            }
            let groups = (1..caps.len())
                .map(|i| caps.get(i).map(|g| g.as_str().to_string()))
                .collect();
            out.push(RawMatch {
                kind: CitationKind::StatuteArticle,
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
                groups,
            });
        }
        out
    }
}
