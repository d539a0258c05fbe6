use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::worksheet_engine::phase::{RevealState, Totals};

/// Identifies one sentence instance: lesson day + sentence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SentenceKey {
    pub day: u32,
    pub index: usize,
}

impl SentenceKey {
    pub fn new(day: u32, index: usize) -> Self {
        SentenceKey { day, index }
    }
}

impl fmt::Display for SentenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.index)
    }
}

/// Session-wide reveal progress, one entry per sentence.
///
/// Entries are created on first access and live until the store is dropped,
/// so leaving a day and coming back keeps progress. Each entry is touched
/// only through its own key.
#[derive(Debug, Clone, Default)]
pub struct RevealStore {
    states: HashMap<SentenceKey, RevealState>,
}

impl RevealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state; an untouched sentence reads as the initial state.
    pub fn get(&self, key: SentenceKey) -> RevealState {
        self.states.get(&key).copied().unwrap_or_default()
    }

    pub fn entry(&mut self, key: SentenceKey) -> &mut RevealState {
        self.states.entry(key).or_default()
    }

    pub fn advance(&mut self, key: SentenceKey, totals: Totals) -> RevealState {
        let state = self.entry(key);
        state.advance(totals);
        *state
    }

    pub fn reset(&mut self, key: SentenceKey) -> RevealState {
        let state = self.entry(key);
        state.reset();
        *state
    }

    /// Number of sentences with a stored state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
