use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Part-of-speech categories
// ---------------------------------------------------------------------------

/// Grammatical category of a tagged word.
///
/// The 16 known variants carry fixed metadata (see [`PosType::meta`]).
/// Any other code from the lesson data is kept verbatim (upper-cased) in
/// `Unknown`, which sorts after every known type and falls back to the raw
/// code for its label and badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PosType {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Pronoun,
    ObjectPronoun,
    Conjunction,
    SubordinatingConjunction,
    Article,
    Demonstrative,
    Possessive,
    PastParticiple,
    RelativePronoun,
    PassiveVerb,
    ModalVerb,
    Unknown(String),
}

/// Static display metadata for one known category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosMeta {
    /// Wire code used by the lesson data (`"N"`, `"SUBCONJ"`, ...).
    pub code: &'static str,
    /// Sort rank; lower ranks are asked first.
    pub priority: u8,
    /// Lower-case label used in prompts ("Find the noun").
    pub label: &'static str,
    /// Upper-case badge shown next to a revealed word.
    pub badge: &'static str,
    /// Short abbreviation for the card header ("2 N").
    pub abbr: &'static str,
    /// Hover name for the header tag.
    pub header_name: &'static str,
    /// Style class for the revealed word and badge.
    pub class: &'static str,
    /// Style class for the header tag.
    pub header_class: &'static str,
}

const fn meta(
    code: &'static str, priority: u8, label: &'static str, badge: &'static str,
    abbr: &'static str, header_name: &'static str, class: &'static str,
    header_class: &'static str,
) -> PosMeta {
    PosMeta { code, priority, label, badge, abbr, header_name, class, header_class }
}

/// Metadata for the 16 known categories, in priority order.
const TABLE: [PosMeta; 16] = [
    meta("N",       0,  "noun",                     "NOUN",       "N",    "Noun",         "noun", "noun"),
    meta("V",       1,  "verb",                     "VERB",       "V",    "Verb",         "verb", "verb"),
    meta("ADJ",     2,  "adjective",                "ADJ",        "ADJ",  "Adj",          "adj",  "adj"),
    meta("ADV",     3,  "adverb",                   "ADVERB",     "ADV",  "Adv",          "adv",  "adv"),
    meta("PREP",    4,  "preposition",              "PREP",       "PREP", "Prep",         "prep", "prep"),
    meta("PRO",     5,  "pronoun",                  "PRONOUN",    "PRO",  "Pronoun",      "pro",  "pro"),
    meta("OBJPRO",  6,  "object pronoun",           "OBJ PRO",    "OP",   "Obj Pro",      "pro",  "pro"),
    meta("CONJ",    7,  "conjunction",              "CONJ",       "CONJ", "Conj",         "noun", "noun"),
    meta("SUBCONJ", 8,  "subordinating conjunction", "SUB CONJ",  "SC",   "SubConj",      "noun", "prep"),
    meta("ART",     9,  "article",                  "ARTICLE",    "ART",  "Article",      "noun", "noun"),
    meta("DEM",     10, "demonstrative",            "DEM",        "DEM",  "Dem",          "adj",  "adj"),
    meta("POSS",    11, "possessive",               "POSS",       "POSS", "Poss",         "adj",  "adj"),
    meta("PP",      12, "past participle",          "PAST PART",  "PP",   "Past Part",    "verb", "verb"),
    meta("RELPRO",  13, "relative pronoun",         "REL PRO",    "RP",   "Rel Pro",      "pro",  "pro"),
    meta("PASS",    14, "passive verb",             "PASSIVE",    "PV",   "Passive Verb", "verb", "verb"),
    meta("MODAL",   15, "modal verb",               "MODAL VERB", "MV",   "Modal Verb",   "verb", "verb"),
];

/// Priority given to every unknown category (after all known ones).
pub const UNKNOWN_PRIORITY: u8 = u8::MAX;

/// Order in which categories appear in a card header. Unknown types are
/// never listed there.
pub const HEADER_ORDER: [PosType; 16] = [
    PosType::Noun,
    PosType::Verb,
    PosType::ModalVerb,
    PosType::PassiveVerb,
    PosType::PastParticiple,
    PosType::Adjective,
    PosType::Adverb,
    PosType::Pronoun,
    PosType::RelativePronoun,
    PosType::ObjectPronoun,
    PosType::Preposition,
    PosType::SubordinatingConjunction,
    PosType::Conjunction,
    PosType::Possessive,
    PosType::Article,
    PosType::Demonstrative,
];

impl PosType {
    /// Parse a wire code case-insensitively. Never fails: unrecognised codes
    /// become [`PosType::Unknown`].
    pub fn from_code(code: &str) -> Self {
        let upper = code.trim().to_uppercase();
        match upper.as_str() {
            "N"       => PosType::Noun,
            "V"       => PosType::Verb,
            "ADJ"     => PosType::Adjective,
            "ADV"     => PosType::Adverb,
            "PREP"    => PosType::Preposition,
            "PRO"     => PosType::Pronoun,
            "OBJPRO"  => PosType::ObjectPronoun,
            "CONJ"    => PosType::Conjunction,
            "SUBCONJ" => PosType::SubordinatingConjunction,
            "ART"     => PosType::Article,
            "DEM"     => PosType::Demonstrative,
            "POSS"    => PosType::Possessive,
            "PP"      => PosType::PastParticiple,
            "RELPRO"  => PosType::RelativePronoun,
            "PASS"    => PosType::PassiveVerb,
            "MODAL"   => PosType::ModalVerb,
            _         => PosType::Unknown(upper),
        }
    }

    /// Metadata row for a known category; `None` for `Unknown`.
    pub fn meta(&self) -> Option<&'static PosMeta> {
        let idx = match self {
            PosType::Noun                     => 0,
            PosType::Verb                     => 1,
            PosType::Adjective                => 2,
            PosType::Adverb                   => 3,
            PosType::Preposition              => 4,
            PosType::Pronoun                  => 5,
            PosType::ObjectPronoun            => 6,
            PosType::Conjunction              => 7,
            PosType::SubordinatingConjunction => 8,
            PosType::Article                  => 9,
            PosType::Demonstrative            => 10,
            PosType::Possessive               => 11,
            PosType::PastParticiple           => 12,
            PosType::RelativePronoun          => 13,
            PosType::PassiveVerb              => 14,
            PosType::ModalVerb                => 15,
            PosType::Unknown(_)               => return None,
        };
        Some(&TABLE[idx])
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, PosType::Unknown(_))
    }

    pub fn code(&self) -> &str {
        match self {
            PosType::Unknown(raw) => raw,
            known => known.meta().map_or("", |m| m.code),
        }
    }

    pub fn priority(&self) -> u8 {
        self.meta().map_or(UNKNOWN_PRIORITY, |m| m.priority)
    }

    /// Prompt label. Unknown codes fall back to the lower-cased code.
    pub fn label(&self) -> String {
        match self.meta() {
            Some(m) => m.label.to_string(),
            None => self.code().to_lowercase(),
        }
    }

    pub fn badge(&self) -> &str {
        self.meta().map_or(self.code(), |m| m.badge)
    }

    pub fn abbr(&self) -> &str {
        self.meta().map_or(self.code(), |m| m.abbr)
    }

    pub fn header_name(&self) -> &str {
        self.meta().map_or(self.code(), |m| m.header_name)
    }

    pub fn class(&self) -> &'static str {
        self.meta().map_or("noun", |m| m.class)
    }

    pub fn header_class(&self) -> &'static str {
        self.meta().map_or("noun", |m| m.header_class)
    }
}

impl From<String> for PosType {
    fn from(code: String) -> Self {
        PosType::from_code(&code)
    }
}

impl From<PosType> for String {
    fn from(t: PosType) -> Self {
        t.code().to_string()
    }
}

impl fmt::Display for PosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_in_priority_order() {
        for (i, row) in TABLE.iter().enumerate() {
            assert_eq!(row.priority as usize, i, "row {} out of order", row.code);
            assert_eq!(PosType::from_code(row.code).priority(), row.priority);
        }
    }

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(PosType::from_code("n"), PosType::Noun);
        assert_eq!(PosType::from_code("SubConj"), PosType::SubordinatingConjunction);
        assert_eq!(PosType::from_code(" modal "), PosType::ModalVerb);
        assert!(PosType::from_code("adj").is_known());
    }

    #[test]
    fn unknown_code_keeps_raw_text() {
        let t = PosType::from_code("interj");
        assert_eq!(t, PosType::Unknown("INTERJ".to_string()));
        assert!(!t.is_known());
        assert_eq!(t.label(), "interj");
        assert_eq!(t.badge(), "INTERJ");
        assert_eq!(t.class(), "noun");
        assert!(t.priority() > PosType::ModalVerb.priority());
    }

    #[test]
    fn header_order_covers_every_known_type() {
        for row in TABLE.iter() {
            assert!(
                HEADER_ORDER.iter().any(|t| t.code() == row.code),
                "{} missing from header order", row.code
            );
        }
    }

    #[test]
    fn serde_uses_wire_codes() {
        let t: PosType = serde_json::from_str("\"objpro\"").unwrap();
        assert_eq!(t, PosType::ObjectPronoun);
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"OBJPRO\"");
    }
}
