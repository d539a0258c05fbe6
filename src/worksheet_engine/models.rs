use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::worksheet_engine::error::{Result, WorksheetError};
use crate::worksheet_engine::pos_types::PosType;

// ---------------------------------------------------------------------------
// Corrections
// ---------------------------------------------------------------------------

/// Wire marker for "nothing to locate, insert at the end".
pub const MISSING_MARKER: &str = "(missing)";

/// What a correction points at in the original sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CorrectionTarget {
    Word(String),
    /// Nothing to locate; the replacement is appended (missing punctuation).
    Missing,
}

impl From<String> for CorrectionTarget {
    fn from(s: String) -> Self {
        if s == MISSING_MARKER {
            CorrectionTarget::Missing
        } else {
            CorrectionTarget::Word(s)
        }
    }
}

impl From<CorrectionTarget> for String {
    fn from(t: CorrectionTarget) -> Self {
        match t {
            CorrectionTarget::Word(w) => w,
            CorrectionTarget::Missing => MISSING_MARKER.to_string(),
        }
    }
}

/// Category of a correction. Categories outside the usual four are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CorrectionKind {
    Capitalization,
    Punctuation,
    Spelling,
    Grammar,
    Other(String),
}

impl CorrectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            CorrectionKind::Capitalization => "capitalization",
            CorrectionKind::Punctuation    => "punctuation",
            CorrectionKind::Spelling       => "spelling",
            CorrectionKind::Grammar        => "grammar",
            CorrectionKind::Other(s)       => s,
        }
    }
}

impl From<String> for CorrectionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "capitalization" => CorrectionKind::Capitalization,
            "punctuation"    => CorrectionKind::Punctuation,
            "spelling"       => CorrectionKind::Spelling,
            "grammar"        => CorrectionKind::Grammar,
            _                => CorrectionKind::Other(s),
        }
    }
}

impl From<CorrectionKind> for String {
    fn from(k: CorrectionKind) -> Self {
        k.as_str().to_string()
    }
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    #[serde(rename = "w")]
    pub target: CorrectionTarget,
    #[serde(rename = "r")]
    pub replacement: String,
    #[serde(rename = "t")]
    pub kind: CorrectionKind,
    #[serde(rename = "e")]
    pub explanation: String,
}

impl Correction {
    /// Missing punctuation is appended to the sentence rather than placed
    /// inline.
    pub fn is_missing_punctuation(&self) -> bool {
        self.target == CorrectionTarget::Missing && self.kind == CorrectionKind::Punctuation
    }
}

// ---------------------------------------------------------------------------
// Sentence sub-records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosTag {
    #[serde(rename = "w")]
    pub word: String,
    #[serde(rename = "t")]
    pub pos_type: PosType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulation {
    /// Target word or phrase highlighted in the fixed sentence.
    pub word: String,
    pub task: String,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    #[serde(rename = "w")]
    pub word: String,
    #[serde(rename = "type")]
    pub word_type: String,
    #[serde(rename = "def")]
    pub definition: String,
    #[serde(rename = "simple")]
    pub simple_definition: String,
    pub examples: Vec<String>,
    #[serde(rename = "similar")]
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    #[serde(rename = "nonex")]
    pub non_examples: Vec<String>,
    #[serde(rename = "example")]
    pub model_sentence: String,
    #[serde(rename = "starter")]
    pub sentence_starter: String,
    #[serde(rename = "why")]
    pub rationale: String,
}

/// One worksheet sentence. Immutable for the session.
///
/// Every sub-record is required: a sentence without its manipulation block
/// fails to deserialize instead of silently getting zero examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "orig")]
    pub original: String,
    pub fixed: String,
    #[serde(rename = "corr")]
    pub corrections: Vec<Correction>,
    #[serde(rename = "pos")]
    pub pos_tags: Vec<PosTag>,
    #[serde(rename = "manip")]
    pub manipulation: Manipulation,
    #[serde(rename = "vocab")]
    pub vocabulary: Vocabulary,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonDay {
    pub day: u32,
    pub sentences: Vec<Sentence>,
}

impl LessonDay {
    pub fn sentence(&self, index: usize) -> Result<&Sentence> {
        self.sentences
            .get(index)
            .ok_or(WorksheetError::SentenceNotFound { day: self.day, index })
    }
}

/// The read-only lesson catalog (`days.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    days: Vec<LessonDay>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate day numbers.
    pub fn new(days: Vec<LessonDay>) -> Result<Self> {
        let mut seen = HashSet::new();
        for lesson in &days {
            if !seen.insert(lesson.day) {
                return Err(WorksheetError::DuplicateDay { day: lesson.day });
            }
        }
        Ok(Catalog { days })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let days: Vec<LessonDay> = serde_json::from_str(json)?;
        let catalog = Catalog::new(days)?;
        info!(days = catalog.len(), "lesson catalog loaded");
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WorksheetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Catalog::from_json_str(&json)
    }

    /// Log lessons whose day number falls outside `first..=last`. They stay
    /// in the catalog but navigation can never reach them.
    pub fn warn_out_of_range(&self, first: u32, last: u32) {
        for lesson in self.days.iter().filter(|l| l.day < first || l.day > last) {
            warn!(day = lesson.day, first, last, "lesson day outside navigable range");
        }
    }

    pub fn lesson(&self, day: u32) -> Result<&LessonDay> {
        self.days
            .iter()
            .find(|l| l.day == day)
            .ok_or(WorksheetError::DayNotFound { day })
    }

    pub fn sentence(&self, day: u32, index: usize) -> Result<&Sentence> {
        self.lesson(day)?.sentence(index)
    }

    pub fn days(&self) -> &[LessonDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_DAY: &str = r#"[{
        "day": 3,
        "sentences": [{
            "orig": "the dog run fast",
            "fixed": "The dog runs fast.",
            "corr": [
                {"w": "the", "r": "The", "t": "capitalization", "e": "Capitalize the first word."},
                {"w": "(missing)", "r": ".", "t": "punctuation", "e": "End with a period."}
            ],
            "pos": [{"w": "dog", "t": "N"}, {"w": "runs", "t": "v"}],
            "manip": {"word": "fast", "task": "Replace the adverb.", "examples": ["The dog runs slowly."]},
            "vocab": {
                "w": "sprint", "type": "verb", "def": "to run at full speed",
                "simple": "run very fast", "examples": ["She sprinted home."],
                "similar": ["dash"], "antonyms": ["stroll"], "nonex": ["sit"],
                "example": "The dog sprinted.", "starter": "I sprint when...",
                "why": "It describes speed."
            }
        }]
    }]"#;

    #[test]
    fn parses_wire_format() {
        let catalog = Catalog::from_json_str(ONE_DAY).unwrap();
        let s = catalog.sentence(3, 0).unwrap();
        assert_eq!(s.original, "the dog run fast");
        assert_eq!(s.corrections[0].kind, CorrectionKind::Capitalization);
        assert_eq!(s.corrections[1].target, CorrectionTarget::Missing);
        assert!(s.corrections[1].is_missing_punctuation());
        assert_eq!(s.pos_tags[1].pos_type, PosType::Verb);
        assert_eq!(s.vocabulary.synonyms, vec!["dash".to_string()]);
    }

    #[test]
    fn missing_day_and_sentence_are_distinct_errors() {
        let catalog = Catalog::from_json_str(ONE_DAY).unwrap();
        assert!(matches!(catalog.sentence(4, 0), Err(WorksheetError::DayNotFound { day: 4 })));
        assert!(matches!(
            catalog.sentence(3, 1),
            Err(WorksheetError::SentenceNotFound { day: 3, index: 1 })
        ));
    }

    #[test]
    fn sentence_without_manipulation_is_malformed() {
        let broken = ONE_DAY.replace(
            r#""manip": {"word": "fast", "task": "Replace the adverb.", "examples": ["The dog runs slowly."]},"#,
            "",
        );
        assert!(matches!(
            Catalog::from_json_str(&broken),
            Err(WorksheetError::MalformedCatalog(_))
        ));
    }

    #[test]
    fn duplicate_days_are_rejected() {
        let one: Vec<LessonDay> = serde_json::from_str(ONE_DAY).unwrap();
        let two = vec![one[0].clone(), one[0].clone()];
        assert!(matches!(Catalog::new(two), Err(WorksheetError::DuplicateDay { day: 3 })));
    }

    #[test]
    fn unknown_correction_kind_round_trips_verbatim() {
        let k: CorrectionKind = serde_json::from_str("\"word order\"").unwrap();
        assert_eq!(k, CorrectionKind::Other("word order".to_string()));
        assert_eq!(serde_json::to_string(&k).unwrap(), "\"word order\"");
    }
}
