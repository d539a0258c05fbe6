//! Reveal state machine.
//!
//! A sentence walks through a fixed sequence of disclosure phases driven by a
//! step counter. The phase is always derived from `(step, totals)`; it is
//! stored next to the step only as a cache that every transition rewrites.
//!
//! | phase | shown                                   | steps                     |
//! |-------|-----------------------------------------|---------------------------|
//! | 0     | corrections, one per step               | `0 ..= C`                 |
//! | 2     | POS tags, one per step                  | `C+1 ..= C+P`             |
//! | 3     | manipulation task + highlighted target  | `C+P+1`                   |
//! | 4     | first manipulation example              | `C+P+2`                   |
//! | 5     | remaining examples, one per step        | `C+P+3 ..= C+P+1+M`       |
//! | 6     | vocabulary                              | `C+P+2+M`                 |
//! | 7     | complete                                | beyond                    |
//!
//! Phase 1 does not exist. Styling keys off the phase numbers, so the gap
//! stays.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Fixed per-sentence totals the phase boundaries are computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Totals {
    /// `C`: capped correction count.
    pub corrections: usize,
    /// `P`: ordered POS tag count.
    pub pos_tags: usize,
    /// `M`: manipulation example count.
    pub examples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Phase {
    Corrections = 0,
    PartsOfSpeech = 2,
    ManipulationTask = 3,
    FirstExample = 4,
    MoreExamples = 5,
    Vocabulary = 6,
    Complete = 7,
}

impl Phase {
    /// Phase for a given step. Boundaries are checked in table order, so when
    /// two ranges coincide (e.g. `M = 0` makes phases 4 and 6 share a step)
    /// the earlier phase wins.
    pub fn for_step(step: usize, totals: Totals) -> Phase {
        let Totals { corrections: c, pos_tags: p, examples: m } = totals;
        if step <= c {
            Phase::Corrections
        } else if step <= c + p {
            Phase::PartsOfSpeech
        } else if step == c + p + 1 {
            Phase::ManipulationTask
        } else if step == c + p + 2 {
            Phase::FirstExample
        } else if step <= c + p + 1 + m {
            Phase::MoreExamples
        } else if step == c + p + 2 + m {
            Phase::Vocabulary
        } else {
            Phase::Complete
        }
    }

    /// Numeric phase as used by the rendering side.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Complete
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Per-sentence progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    step: usize,
    phase: Phase,
}

impl Default for RevealState {
    fn default() -> Self {
        RevealState { step: 0, phase: Phase::Corrections }
    }
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State at an arbitrary step; the phase is derived, never supplied.
    pub fn at_step(step: usize, totals: Totals) -> Self {
        RevealState { step, phase: Phase::for_step(step, totals) }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Transition function: one step forward. Safe on a completed state; the
    /// step keeps counting while the phase stays at `Complete`.
    pub fn next(self, totals: Totals) -> Self {
        RevealState::at_step(self.step.saturating_add(1), totals)
    }

    pub fn advance(&mut self, totals: Totals) {
        *self = self.next(totals);
    }

    pub fn reset(&mut self) {
        *self = RevealState::default();
    }

    /// Phase of this step under `totals`. Views derive from this, not from
    /// the phase recorded at the last advance.
    pub fn phase_for(&self, totals: Totals) -> Phase {
        Phase::for_step(self.step, totals)
    }

    pub fn visibility(&self, totals: Totals) -> Visibility {
        Visibility::derive(self.step, self.phase_for(totals), totals)
    }

    pub fn button_label(&self, totals: Totals) -> ButtonLabel {
        ButtonLabel::derive(self.step, self.phase_for(totals), totals)
    }
}

// ---------------------------------------------------------------------------
// Derived visibility
// ---------------------------------------------------------------------------

/// What the renderer should show. Derived on every query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visibility {
    /// Corrections revealed so far; the first `n` in input order.
    pub corrections: usize,
    /// POS tags revealed so far; the first `n` in ordered sequence.
    pub pos_tags: usize,
    pub manipulation_task: bool,
    pub examples: usize,
    pub vocabulary: bool,
    /// The manipulation target is highlighted in the sentence.
    pub highlight: bool,
}

impl Visibility {
    pub fn derive(step: usize, phase: Phase, totals: Totals) -> Self {
        let Totals { corrections: c, pos_tags: p, examples: m } = totals;

        let pos_tags = if phase >= Phase::PartsOfSpeech {
            step.saturating_sub(c).min(p)
        } else {
            0
        };
        let examples = match phase {
            Phase::Corrections | Phase::PartsOfSpeech | Phase::ManipulationTask => 0,
            Phase::FirstExample => m.min(1),
            _ => step.saturating_sub(c + p + 1).min(m),
        };

        Visibility {
            corrections: step.min(c),
            pos_tags,
            manipulation_task: phase >= Phase::ManipulationTask,
            examples,
            vocabulary: phase >= Phase::Vocabulary,
            highlight: (Phase::ManipulationTask..=Phase::MoreExamples).contains(&phase),
        }
    }

    /// Indices of revealed corrections, newest first (display order).
    pub fn corrections_newest_first(&self) -> impl Iterator<Item = usize> {
        (0..self.corrections).rev()
    }

    pub fn pos_tags_newest_first(&self) -> impl Iterator<Item = usize> {
        (0..self.pos_tags).rev()
    }

    pub fn examples_newest_first(&self) -> impl Iterator<Item = usize> {
        (0..self.examples).rev()
    }
}

// ---------------------------------------------------------------------------
// Trigger label
// ---------------------------------------------------------------------------

/// Text for the advance trigger, describing what the next press reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ButtonLabel {
    Start,
    Correction { shown: usize, total: usize },
    PartOfSpeech { next: usize, total: usize },
    ShowManipulation,
    ShowExample(usize),
    ShowVocabulary,
    Complete,
}

impl ButtonLabel {
    pub fn derive(step: usize, phase: Phase, totals: Totals) -> Self {
        let Totals { corrections: c, pos_tags: p, examples: m } = totals;
        match phase {
            Phase::Corrections if step == 0 => ButtonLabel::Start,
            Phase::Corrections => ButtonLabel::Correction { shown: step, total: c },
            Phase::PartsOfSpeech => {
                let pos_step = step.saturating_sub(c);
                if pos_step < p {
                    ButtonLabel::PartOfSpeech { next: pos_step + 1, total: p }
                } else {
                    ButtonLabel::ShowManipulation
                }
            }
            Phase::ManipulationTask => ButtonLabel::ShowExample(1),
            Phase::FirstExample if m > 1 => ButtonLabel::ShowExample(2),
            Phase::FirstExample => ButtonLabel::ShowVocabulary,
            Phase::MoreExamples => {
                let shown = step.saturating_sub(c + p + 1);
                if shown < m {
                    ButtonLabel::ShowExample(shown + 1)
                } else {
                    ButtonLabel::ShowVocabulary
                }
            }
            Phase::Vocabulary => ButtonLabel::ShowVocabulary,
            Phase::Complete => ButtonLabel::Complete,
        }
    }

    /// Whether the trigger accepts presses.
    pub fn is_enabled(&self) -> bool {
        *self != ButtonLabel::Complete
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonLabel::Start                          => write!(f, "Check Sentence"),
            ButtonLabel::Correction { shown, total }    => write!(f, "Correction {shown}/{total}"),
            ButtonLabel::PartOfSpeech { next, total }   => write!(f, "Part of Speech {next}/{total}"),
            ButtonLabel::ShowManipulation               => write!(f, "Show Manipulation"),
            ButtonLabel::ShowExample(n)                 => write!(f, "Show Example {n}"),
            ButtonLabel::ShowVocabulary                 => write!(f, "Show Vocabulary"),
            ButtonLabel::Complete                       => write!(f, "\u{2713} Complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(c: usize, p: usize, m: usize) -> Totals {
        Totals { corrections: c, pos_tags: p, examples: m }
    }

    /// Walk `n` advances from a fresh state and collect (step, phase).
    fn walk(t: Totals, n: usize) -> Vec<(usize, u8)> {
        let mut s = RevealState::new();
        let mut out = vec![(s.step(), s.phase().number())];
        for _ in 0..n {
            s.advance(t);
            out.push((s.step(), s.phase().number()));
        }
        out
    }

    #[test]
    fn full_walk_with_five_corrections() {
        let phases: Vec<u8> = walk(totals(5, 3, 2), 14).into_iter().map(|(_, p)| p).collect();
        assert_eq!(phases, [0, 0, 0, 0, 0, 0, 2, 2, 2, 3, 4, 5, 6, 7, 7]);
    }

    #[test]
    fn zero_corrections_jumps_straight_to_pos() {
        let t = totals(0, 2, 1);
        assert_eq!(Phase::for_step(0, t), Phase::Corrections);
        assert_eq!(Phase::for_step(1, t), Phase::PartsOfSpeech);
    }

    #[test]
    fn zero_corrections_and_zero_tags_jumps_to_manipulation() {
        let t = totals(0, 0, 2);
        assert_eq!(Phase::for_step(1, t), Phase::ManipulationTask);
        assert_eq!(Phase::for_step(2, t), Phase::FirstExample);
        assert_eq!(Phase::for_step(3, t), Phase::MoreExamples);
        assert_eq!(Phase::for_step(4, t), Phase::Vocabulary);
        assert_eq!(Phase::for_step(5, t), Phase::Complete);
    }

    #[test]
    fn single_example_goes_from_first_example_to_vocabulary() {
        let t = totals(1, 1, 1);
        let phases: Vec<u8> = walk(t, 6).into_iter().map(|(_, p)| p).collect();
        assert_eq!(phases, [0, 0, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn no_examples_skips_vocabulary_phase() {
        // With M = 0 the first-example step and the vocabulary step coincide;
        // the first-example phase wins and the next press completes.
        let phases: Vec<u8> = walk(totals(1, 1, 0), 5).into_iter().map(|(_, p)| p).collect();
        assert_eq!(phases, [0, 0, 2, 3, 4, 7]);
        let v = RevealState::at_step(4, totals(1, 1, 0)).visibility(totals(1, 1, 0));
        assert_eq!(v.examples, 0);
    }

    #[test]
    fn advance_past_complete_keeps_counting() {
        let t = totals(0, 0, 0);
        let mut s = RevealState::at_step(10, t);
        assert!(s.phase().is_terminal());
        s.advance(t);
        assert_eq!(s.step(), 11);
        assert_eq!(s.phase(), Phase::Complete);
    }

    #[test]
    fn reset_returns_to_start() {
        let t = totals(2, 2, 2);
        let mut s = RevealState::at_step(6, t);
        s.reset();
        assert_eq!(s, RevealState::new());
        s.reset();
        assert_eq!((s.step(), s.phase()), (0, Phase::Corrections));
    }

    #[test]
    fn visibility_through_scenario() {
        let t = totals(5, 3, 2);
        let v = |step| RevealState::at_step(step, t).visibility(t);

        assert_eq!(v(0).corrections, 0);
        assert_eq!(v(3).corrections, 3);
        assert_eq!(v(5).pos_tags, 0);
        assert_eq!(v(7).pos_tags, 2);
        assert_eq!(v(7).corrections, 5);
        assert!(!v(8).highlight);
        assert!(v(9).highlight && v(9).manipulation_task);
        assert_eq!(v(9).examples, 0);
        assert_eq!(v(10).examples, 1);
        assert_eq!(v(11).examples, 2);
        assert!(v(11).highlight);
        assert!(!v(11).vocabulary);
        assert!(v(12).vocabulary && !v(12).highlight);
        assert_eq!(v(13).examples, 2);
        assert_eq!(v(13).pos_tags, 3);
    }

    #[test]
    fn newest_first_reverses_reveal_order() {
        let t = totals(5, 3, 2);
        let vis = RevealState::at_step(3, t).visibility(t);
        assert_eq!(vis.corrections_newest_first().collect::<Vec<_>>(), [2, 1, 0]);
    }

    #[test]
    fn button_labels_through_scenario() {
        let t = totals(5, 3, 2);
        let label = |step| RevealState::at_step(step, t).button_label(t).to_string();

        assert_eq!(label(0), "Check Sentence");
        assert_eq!(label(1), "Correction 1/5");
        assert_eq!(label(5), "Correction 5/5");
        assert_eq!(label(6), "Part of Speech 2/3");
        assert_eq!(label(8), "Show Manipulation");
        assert_eq!(label(9), "Show Example 1");
        assert_eq!(label(10), "Show Example 2");
        assert_eq!(label(11), "Show Vocabulary");
        assert_eq!(label(12), "Show Vocabulary");
        assert_eq!(label(13), "\u{2713} Complete");
        assert!(!RevealState::at_step(13, t).button_label(t).is_enabled());
    }

    #[test]
    fn first_example_with_single_example_offers_vocabulary() {
        let t = totals(0, 0, 1);
        let s = RevealState::at_step(2, t);
        assert_eq!(s.phase(), Phase::FirstExample);
        assert_eq!(s.button_label(t), ButtonLabel::ShowVocabulary);
    }

    #[test]
    fn queries_rederive_phase_from_current_totals() {
        // Advanced to step 3 with only two corrections, read with five.
        let state = RevealState::at_step(3, totals(2, 3, 0));
        assert_eq!(state.phase(), Phase::PartsOfSpeech);
        let t = totals(5, 3, 0);
        assert_eq!(state.phase_for(t), Phase::Corrections);
        assert_eq!(state.button_label(t).to_string(), "Correction 3/5");
        let v = state.visibility(t);
        assert_eq!((v.corrections, v.pos_tags), (3, 0));
    }

    #[test]
    fn labels_saturate_when_phase_and_step_disagree() {
        let t = totals(5, 3, 2);
        assert_eq!(
            ButtonLabel::derive(2, Phase::PartsOfSpeech, t),
            ButtonLabel::PartOfSpeech { next: 1, total: 3 }
        );
        assert_eq!(ButtonLabel::derive(4, Phase::MoreExamples, t), ButtonLabel::ShowExample(1));
    }
}
