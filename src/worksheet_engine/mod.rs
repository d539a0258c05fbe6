//! Core worksheet engine: annotation normalizing and the reveal state machine.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Lesson catalog types as they appear in `days.json` |
//! | `pos_types`  | Closed set of POS categories with their static metadata |
//! | `normalizer` | Caps corrections; orders, numbers and prompts POS tags |
//! | `phase`      | Phase enum, step transitions, derived visibility and button labels |
//! | `layout`     | Where corrections, labels and the highlight fall in the sentence |
//! | `store`      | Per-sentence reveal progress keyed by day + index |
//! | `session`    | Trigger interface (`advance`, `reset`, views) and day navigation |
//! | `config`     | Session settings with serde defaults |
//! | `error`      | `WorksheetError` |

pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod normalizer;
pub mod phase;
pub mod pos_types;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use error::{Result, WorksheetError};
pub use layout::SentenceDisplay;
pub use models::{
    Catalog, Correction, CorrectionKind, CorrectionTarget, LessonDay, Manipulation, PosTag,
    Sentence, Vocabulary,
};
pub use normalizer::{normalize, Annotations, OrderedPosTag, TagCount, MAX_CORRECTIONS};
pub use phase::{ButtonLabel, Phase, RevealState, Totals, Visibility};
pub use pos_types::PosType;
pub use session::{Session, SentenceView};
pub use store::{RevealStore, SentenceKey};
