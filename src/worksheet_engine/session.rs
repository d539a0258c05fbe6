//! Session controller and the trigger interface used by the renderer.
//!
//! The free functions take the [`RevealStore`] explicitly so they can be
//! driven from tests without a [`Session`]. Every operation resolves the
//! sentence first: an unknown day or index fails with a not-found error and
//! leaves the store untouched.

use serde::Serialize;
use tracing::debug;

use crate::worksheet_engine::config::SessionConfig;
use crate::worksheet_engine::error::{Result, WorksheetError};
use crate::worksheet_engine::layout::{self, SentenceDisplay};
use crate::worksheet_engine::models::{Catalog, Correction, LessonDay, Sentence, Vocabulary};
use crate::worksheet_engine::normalizer::{self, OrderedPosTag, TagCount};
use crate::worksheet_engine::phase::{ButtonLabel, Phase, RevealState, Totals, Visibility};
use crate::worksheet_engine::store::{RevealStore, SentenceKey};

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Card header: "Find 5 errors and 2 N 1 V ...".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub error_count: usize,
    pub tags: Vec<TagCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedCorrection<'a> {
    /// 1-based position in reveal order ("Correction 2 of 5").
    pub number: usize,
    pub total: usize,
    pub correction: &'a Correction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManipulationView<'a> {
    pub task: &'a str,
    /// Revealed examples, newest first.
    pub examples: Vec<&'a str>,
}

/// Everything the renderer needs to draw one sentence card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentenceView<'a> {
    pub key: SentenceKey,
    pub step: usize,
    pub phase: Phase,
    pub totals: Totals,
    pub button: ButtonLabel,
    pub visibility: Visibility,
    pub header: Header,
    pub display: SentenceDisplay,
    /// Revealed corrections, newest first.
    pub corrections: Vec<RevealedCorrection<'a>>,
    /// Revealed POS tags, newest first.
    pub pos_tags: Vec<OrderedPosTag>,
    pub manipulation: Option<ManipulationView<'a>>,
    pub vocabulary: Option<&'a Vocabulary>,
}

impl SentenceView<'_> {
    pub fn trigger_enabled(&self) -> bool {
        self.button.is_enabled()
    }
}

// ---------------------------------------------------------------------------
// Trigger interface
// ---------------------------------------------------------------------------

pub fn totals_for(sentence: &Sentence, config: &SessionConfig) -> Totals {
    normalizer::normalize(sentence, config.correction_cap).totals()
}

pub fn advance(
    store: &mut RevealStore,
    catalog: &Catalog,
    config: &SessionConfig,
    key: SentenceKey,
) -> Result<RevealState> {
    let sentence = catalog.sentence(key.day, key.index)?;
    let totals = totals_for(sentence, config);
    if store.get(key).phase_for(totals).is_terminal() {
        debug!(%key, "advance on a completed sentence");
    }
    let state = store.advance(key, totals);
    debug!(%key, step = state.step(), phase = state.phase().number(), "advanced");
    Ok(state)
}

pub fn reset(store: &mut RevealStore, catalog: &Catalog, key: SentenceKey) -> Result<RevealState> {
    catalog.sentence(key.day, key.index)?;
    let state = store.reset(key);
    debug!(%key, "reset");
    Ok(state)
}

/// Current state of an existing sentence.
pub fn state(store: &RevealStore, catalog: &Catalog, key: SentenceKey) -> Result<RevealState> {
    catalog.sentence(key.day, key.index)?;
    Ok(store.get(key))
}

/// Assemble the full view of one sentence from its stored state.
pub fn sentence_view<'a>(
    store: &RevealStore,
    catalog: &'a Catalog,
    config: &SessionConfig,
    key: SentenceKey,
) -> Result<SentenceView<'a>> {
    let sentence = catalog.sentence(key.day, key.index)?;
    let annotations = normalizer::normalize(sentence, config.correction_cap);
    let totals = annotations.totals();
    let state = store.get(key);
    let phase = state.phase_for(totals);
    let visibility = state.visibility(totals);
    let capped: &'a [Correction] = annotations.corrections;

    let corrections = visibility
        .corrections_newest_first()
        .map(|i| RevealedCorrection {
            number: i + 1,
            total: totals.corrections,
            correction: &capped[i],
        })
        .collect();
    let pos_tags = visibility
        .pos_tags_newest_first()
        .map(|i| annotations.pos_tags[i].clone())
        .collect();
    let manipulation = visibility.manipulation_task.then(|| ManipulationView {
        task: sentence.manipulation.task.as_str(),
        examples: visibility
            .examples_newest_first()
            .map(|i| sentence.manipulation.examples[i].as_str())
            .collect(),
    });

    Ok(SentenceView {
        key,
        step: state.step(),
        phase,
        totals,
        button: state.button_label(totals),
        visibility,
        header: Header {
            error_count: totals.corrections,
            tags: normalizer::tag_summary(&annotations.pos_tags),
        },
        display: layout::display_for(
            sentence,
            capped,
            &annotations.pos_tags,
            phase,
            &visibility,
        ),
        corrections,
        pos_tags,
        manipulation,
        vocabulary: visibility.vocabulary.then_some(&sentence.vocabulary),
    })
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Top-level controller: owns the catalog, the reveal store and the day
/// currently on screen.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    store: RevealStore,
    config: SessionConfig,
    current_day: u32,
}

impl Session {
    pub fn new(catalog: Catalog, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        catalog.warn_out_of_range(config.first_day, config.last_day);
        Ok(Session {
            current_day: config.first_day,
            catalog,
            store: RevealStore::new(),
            config,
        })
    }

    pub fn with_defaults(catalog: Catalog) -> Result<Self> {
        Session::new(catalog, SessionConfig::default())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &RevealStore {
        &self.store
    }

    pub fn current_day(&self) -> u32 {
        self.current_day
    }

    /// Lesson for the current day. A day inside the range but missing from
    /// the catalog is `DayNotFound`.
    pub fn current_lesson(&self) -> Result<&LessonDay> {
        self.catalog.lesson(self.current_day)
    }

    /// Step back one day; returns `false` at the first day.
    pub fn prev_day(&mut self) -> bool {
        if self.current_day > self.config.first_day {
            self.current_day -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one day; returns `false` at the last day.
    pub fn next_day(&mut self) -> bool {
        if self.current_day < self.config.last_day {
            self.current_day += 1;
            true
        } else {
            false
        }
    }

    pub fn go_to_day(&mut self, day: u32) -> Result<()> {
        if !self.config.contains_day(day) {
            return Err(WorksheetError::DayOutOfRange {
                day,
                first: self.config.first_day,
                last: self.config.last_day,
            });
        }
        self.current_day = day;
        Ok(())
    }

    pub fn advance(&mut self, day: u32, index: usize) -> Result<RevealState> {
        advance(&mut self.store, &self.catalog, &self.config, SentenceKey::new(day, index))
    }

    pub fn reset(&mut self, day: u32, index: usize) -> Result<RevealState> {
        reset(&mut self.store, &self.catalog, SentenceKey::new(day, index))
    }

    pub fn state(&self, day: u32, index: usize) -> Result<RevealState> {
        state(&self.store, &self.catalog, SentenceKey::new(day, index))
    }

    pub fn view(&self, day: u32, index: usize) -> Result<SentenceView<'_>> {
        sentence_view(&self.store, &self.catalog, &self.config, SentenceKey::new(day, index))
    }

    /// Views for every sentence of the current day. Rendering a day is what
    /// creates its sentences' reveal states.
    pub fn render_current_day(&mut self) -> Result<Vec<SentenceView<'_>>> {
        let day = self.current_day;
        let count = self.catalog.lesson(day)?.sentences.len();
        for index in 0..count {
            self.store.entry(SentenceKey::new(day, index));
        }
        (0..count)
            .map(|index| sentence_view(&self.store, &self.catalog, &self.config, SentenceKey::new(day, index)))
            .collect()
    }
}
