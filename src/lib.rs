//! # worksheet_reveal
//!
//! Step-by-step reveal engine for daily grammar worksheets.
//!
//! Each lesson day holds sentences with known errors, part-of-speech tags, a
//! manipulation exercise and a vocabulary word. A learner presses one button
//! repeatedly; every press reveals the next piece: corrections one at a time,
//! then parts of speech in a fixed grammatical order, then the manipulation
//! task and its examples, then the vocabulary block.
//!
//! ## How it works
//!
//! 1. Load a [`Catalog`] from the `days.json` lesson data.
//! 2. Create a [`Session`]; it owns the catalog and a [`RevealStore`] holding
//!    one [`RevealState`] per sentence.
//! 3. Call [`Session::advance`] / [`Session::reset`] from the UI and read a
//!    [`SentenceView`] back to redraw the card. [`to_client_json`] turns a
//!    view into the JSON the web client consumes.
//!
//! ## Quick start
//!
//! ```rust
//! use worksheet_reveal::{Catalog, Session};
//!
//! let json = r#"[{"day": 1, "sentences": [{
//!     "orig": "the cat sleep", "fixed": "The cat sleeps.",
//!     "corr": [{"w": "the", "r": "The", "t": "capitalization", "e": "Capital letter."}],
//!     "pos": [{"w": "cat", "t": "N"}],
//!     "manip": {"word": "cat", "task": "Swap the noun.", "examples": ["The dog sleeps."]},
//!     "vocab": {"w": "doze", "type": "verb", "def": "sleep lightly", "simple": "nap",
//!               "examples": [], "similar": [], "antonyms": [], "nonex": [],
//!               "example": "", "starter": "", "why": ""}
//! }]}]"#;
//!
//! let mut session = Session::with_defaults(Catalog::from_json_str(json)?)?;
//! session.advance(1, 0)?;
//! let view = session.view(1, 0)?;
//! assert_eq!(view.button.to_string(), "Correction 1/1");
//! # Ok::<(), worksheet_reveal::WorksheetError>(())
//! ```

pub mod render_adapter;
pub mod worksheet_engine;

// Convenience re-exports so callers can use `worksheet_reveal::Session`
// directly without reaching into `worksheet_engine::`.
pub use render_adapter::to_client_json;
pub use worksheet_engine::{
    ButtonLabel, Catalog, Correction, CorrectionKind, LessonDay, Phase, PosType, RevealState,
    RevealStore, Sentence, SentenceKey, SentenceView, Session, SessionConfig, Totals,
    WorksheetError,
};
