//! Annotation normalizer: caps corrections and orders/labels POS tags.
//!
//! Everything here is pure and recomputed on every call. Callers rely on
//! fresh per-type totals, so nothing is cached.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::worksheet_engine::models::{Correction, PosTag, Sentence};
use crate::worksheet_engine::phase::Totals;
use crate::worksheet_engine::pos_types::{PosType, HEADER_ORDER};

/// Product convention: at most five corrections are surfaced per sentence.
pub const MAX_CORRECTIONS: usize = 5;

/// A POS tag after ordering, with its numbering and prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedPosTag {
    pub word: String,
    pub pos_type: PosType,
    /// Byte offset of the word in the fixed text; `None` when it could not
    /// be located (sorts last within its type).
    pub position: Option<usize>,
    /// 1-based index among tags of the same type.
    pub type_num: usize,
    pub type_total: usize,
    pub prompt: String,
}

impl OrderedPosTag {
    pub fn sort_position(&self) -> usize {
        self.position.unwrap_or(usize::MAX)
    }
}

/// Count of one category for the card header ("2 N").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub pos_type: PosType,
    pub count: usize,
}

/// Canonical view of one sentence's annotations.
#[derive(Debug, Clone)]
pub struct Annotations<'a> {
    pub corrections: &'a [Correction],
    pub pos_tags: Vec<OrderedPosTag>,
    pub example_count: usize,
}

impl Annotations<'_> {
    pub fn totals(&self) -> Totals {
        Totals {
            corrections: self.corrections.len(),
            pos_tags: self.pos_tags.len(),
            examples: self.example_count,
        }
    }
}

/// The first `min(len, cap)` corrections, in input order. Never pads.
pub fn cap_corrections(raw: &[Correction], cap: usize) -> &[Correction] {
    if raw.len() > cap {
        warn!(raw = raw.len(), cap, "sentence has more corrections than the cap; truncating");
    }
    &raw[..raw.len().min(cap)]
}

/// ASCII case-insensitive substring search returning a byte offset into
/// `haystack`.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.to_ascii_lowercase().find(&needle.to_ascii_lowercase())
}

/// Build the prompt shown when a tag is asked for.
pub fn prompt_for(pos_type: &PosType, type_num: usize, type_total: usize) -> String {
    let label = pos_type.label();
    if type_total == 1 {
        format!("Find the {label}")
    } else {
        format!("Find {label} {type_num} of {type_total}")
    }
}

/// Order tags by (type priority, position in `fixed`), stable on ties, then
/// number them per type.
pub fn order_pos_tags(raw: &[PosTag], fixed: &str) -> Vec<OrderedPosTag> {
    let mut ordered: Vec<OrderedPosTag> = raw
        .iter()
        .map(|tag| {
            let position = find_ignore_case(fixed, &tag.word);
            if position.is_none() {
                warn!(word = %tag.word, "POS word not found in fixed sentence");
            }
            if !tag.pos_type.is_known() {
                warn!(code = tag.pos_type.code(), "unrecognized POS type; ranked after known types");
            }
            OrderedPosTag {
                word: tag.word.clone(),
                pos_type: tag.pos_type.clone(),
                position,
                type_num: 0,
                type_total: 0,
                prompt: String::new(),
            }
        })
        .collect();

    // `sort_by_key` is stable: unranked types and unlocated words keep input order.
    ordered.sort_by_key(|t| (t.pos_type.priority(), t.sort_position()));

    let mut totals: HashMap<PosType, usize> = HashMap::new();
    for t in &ordered {
        *totals.entry(t.pos_type.clone()).or_insert(0) += 1;
    }

    let mut seen: HashMap<PosType, usize> = HashMap::new();
    for t in &mut ordered {
        let n = seen.entry(t.pos_type.clone()).or_insert(0);
        *n += 1;
        t.type_num = *n;
        t.type_total = totals[&t.pos_type];
        t.prompt = prompt_for(&t.pos_type, t.type_num, t.type_total);
    }
    ordered
}

/// Per-type counts in header order. Unknown categories are left out.
pub fn tag_summary(ordered: &[OrderedPosTag]) -> Vec<TagCount> {
    HEADER_ORDER
        .iter()
        .filter_map(|t| {
            let count = ordered.iter().filter(|p| &p.pos_type == t).count();
            (count > 0).then(|| TagCount { pos_type: t.clone(), count })
        })
        .collect()
}

/// Normalize one sentence with the given correction cap.
pub fn normalize(sentence: &Sentence, cap: usize) -> Annotations<'_> {
    Annotations {
        corrections: cap_corrections(&sentence.corrections, cap),
        pos_tags: order_pos_tags(&sentence.pos_tags, &sentence.fixed),
        example_count: sentence.manipulation.examples.len(),
    }
}
