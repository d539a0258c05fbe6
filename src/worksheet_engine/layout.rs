//! Where things go in the sentence text.
//!
//! The renderer owns all markup; this module only decides which text is
//! shown and which byte ranges carry an inline correction, the manipulation
//! highlight, or a POS label. Matching is ASCII case-insensitive so offsets
//! found in a lower-cased copy index the original string.

use std::ops::Range;

use serde::Serialize;

use crate::worksheet_engine::models::{Correction, CorrectionKind, CorrectionTarget, Sentence};
use crate::worksheet_engine::normalizer::OrderedPosTag;
use crate::worksheet_engine::phase::{Phase, Visibility};
use crate::worksheet_engine::pos_types::PosType;

/// A correction placed inline over the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineCorrection {
    pub range: Range<usize>,
    /// The erroneous text as it appears in the original (original casing).
    pub wrong: String,
    pub right: String,
    pub kind: CorrectionKind,
    /// Most recently revealed correction.
    pub latest: bool,
}

/// Punctuation appended after the (trimmed) original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailingInsertion {
    pub text: String,
    pub latest: bool,
}

/// A revealed POS tag located in the fixed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledWord {
    pub range: Range<usize>,
    pub pos_type: PosType,
}

/// What the sentence line shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SentenceDisplay {
    /// Nothing revealed yet.
    Original(String),
    /// Corrections being revealed over the original text. `spans` are sorted
    /// by position and never overlap.
    Corrected {
        text: String,
        spans: Vec<InlineCorrection>,
        trailing: Option<TrailingInsertion>,
    },
    /// The corrected sentence with labels and an optional highlight.
    Fixed {
        text: String,
        highlight: Option<Range<usize>>,
        labels: Vec<LabeledWord>,
    },
}

fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// First case-insensitive occurrence of `needle` delimited by whitespace or
/// the ends of `text`.
pub fn find_at_whitespace_boundary(text: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let hay = text.to_ascii_lowercase();
    let needle = needle.to_ascii_lowercase();
    let bytes = hay.as_bytes();
    hay.match_indices(&needle).map(|(i, _)| i).find(|&i| {
        let end = i + needle.len();
        let before_ok = i == 0 || is_space(bytes[i - 1]);
        let after_ok = end == bytes.len() || is_space(bytes[end]);
        before_ok && after_ok
    })
}

/// First case-insensitive occurrence of `word` with word-character
/// boundaries on both sides.
pub fn find_whole_word(text: &str, word: &str) -> Option<Range<usize>> {
    if word.is_empty() {
        return None;
    }
    let hay = text.to_ascii_lowercase();
    let word = word.to_ascii_lowercase();
    let bytes = hay.as_bytes();
    let first = word.as_bytes()[0];
    let last = word.as_bytes()[word.len() - 1];
    hay.match_indices(&word).map(|(i, _)| i).find_map(|i| {
        let end = i + word.len();
        // A boundary only exists between a word and a non-word character.
        let before_ok = i == 0 || is_word_byte(bytes[i - 1]) != is_word_byte(first);
        let after_ok = end == bytes.len() || is_word_byte(bytes[end]) != is_word_byte(last);
        (before_ok && after_ok).then_some(i..end)
    })
}

/// Locate a phrase where any whitespace run in the phrase matches one or
/// more whitespace characters in `text`.
pub fn find_phrase(text: &str, phrase: &str) -> Option<Range<usize>> {
    let parts: Vec<String> = phrase.split_whitespace().map(|p| p.to_ascii_lowercase()).collect();
    let (head, tail) = parts.split_first()?;
    let hay = text.to_ascii_lowercase();
    let bytes = hay.as_bytes();

    'candidates: for (start, _) in hay.match_indices(head.as_str()) {
        let mut pos = start + head.len();
        for part in tail {
            let gap = bytes[pos..].iter().take_while(|b| is_space(**b)).count();
            if gap == 0 || !hay[pos + gap..].starts_with(part.as_str()) {
                continue 'candidates;
            }
            pos += gap + part.len();
        }
        return Some(start..pos);
    }
    None
}

/// Inline plan for the first `count` corrections over `original`.
pub fn plan_corrections(original: &str, corrections: &[Correction], count: usize) -> SentenceDisplay {
    let count = count.min(corrections.len());
    let mut placed: Vec<InlineCorrection> = Vec::new();

    for (i, c) in corrections[..count].iter().enumerate() {
        let word = match &c.target {
            CorrectionTarget::Word(w) => w,
            CorrectionTarget::Missing => continue,
        };
        // A non-capitalization fix that only changes case has nothing to show.
        if c.kind != CorrectionKind::Capitalization && word.eq_ignore_ascii_case(&c.replacement) {
            continue;
        }
        if let Some(pos) = find_at_whitespace_boundary(original, word) {
            let range = pos..pos + word.len();
            placed.push(InlineCorrection {
                wrong: original[range.clone()].to_string(),
                range,
                right: c.replacement.clone(),
                kind: c.kind.clone(),
                latest: i + 1 == count,
            });
        }
    }

    placed.sort_by_key(|c| c.range.start);
    let mut spans: Vec<InlineCorrection> = Vec::with_capacity(placed.len());
    let mut last_end = 0;
    for c in placed {
        if c.range.start >= last_end {
            last_end = c.range.end;
            spans.push(c);
        }
    }

    let trailing = corrections[..count]
        .iter()
        .position(Correction::is_missing_punctuation)
        .map(|i| TrailingInsertion {
            text: corrections[i].replacement.clone(),
            latest: i + 1 == count,
        });

    let text = if trailing.is_some() { original.trim_end() } else { original };
    SentenceDisplay::Corrected { text: text.to_string(), spans, trailing }
}

/// Labels for the first `count` ordered tags, plus the manipulation
/// highlight when `highlight` is set.
pub fn plan_fixed(
    fixed: &str,
    manipulation_word: &str,
    tags: &[OrderedPosTag],
    count: usize,
    highlight: bool,
) -> SentenceDisplay {
    let highlight = if highlight { find_phrase(fixed, manipulation_word) } else { None };
    let inside_highlight = |range: &Range<usize>| {
        highlight.as_ref().is_some_and(|h| h.start <= range.start && range.end <= h.end)
    };

    let labels = tags
        .iter()
        .take(count)
        .filter_map(|t| find_whole_word(fixed, &t.word).map(|range| (t, range)))
        // Words within the highlighted target are not labelled.
        .filter(|(_, range)| !inside_highlight(range))
        .map(|(t, range)| LabeledWord { range, pos_type: t.pos_type.clone() })
        .collect();

    SentenceDisplay::Fixed { text: fixed.to_string(), highlight, labels }
}

/// Sentence line for the given reveal position.
pub fn display_for(
    sentence: &Sentence,
    corrections: &[Correction],
    tags: &[OrderedPosTag],
    phase: Phase,
    visible: &Visibility,
) -> SentenceDisplay {
    if phase >= Phase::PartsOfSpeech {
        plan_fixed(&sentence.fixed, &sentence.manipulation.word, tags, visible.pos_tags, visible.highlight)
    } else if visible.corrections == 0 {
        SentenceDisplay::Original(sentence.original.clone())
    } else {
        plan_corrections(&sentence.original, corrections, visible.corrections)
    }
}
