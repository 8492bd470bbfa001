//! Session domain module.
//!
//! One participant's pass through the writing protocol: the ordered phases,
//! per-phase timers, free text, reflection entries, and survey answers, all
//! accumulated on a single `SessionRecord`.
//!
//! # Events
//!
//! - `Created` - a blank record was created
//! - `PhaseEntered` - the sequencer moved the record forward
//! - `TimerStarted` / `TimerClosed` - a window or stopwatch changed state
//! - `Finalized` - the record was frozen for export

mod catalog;
mod errors;
mod events;
mod identity;
mod phase;
mod record;
mod reflection;
mod sequencer;
mod survey;
mod text;
mod timer;
pub mod validator;

pub use catalog::{
    BRAINSTORM_DURATION_SECS, MAX_TEXT_CHARS, MODEL_TEXT, WRITING_TEST_DURATION_SECS,
};
pub use errors::SessionError;
pub use events::SessionEvent;
pub use identity::Identity;
pub use phase::Phase;
pub use record::SessionRecord;
pub use reflection::{CorrectionCode, ReflectionDraft, ReflectionEntry};
pub use sequencer::{PhaseSequencer, TimerPolicy};
pub use survey::{
    find_question, LikertScore, SurveyAnswers, SurveyCategory, SurveyQuestion, SURVEY_QUESTIONS,
};
pub use text::{TextField, TextStats};
pub use timer::{Stopwatch, TimedWindow};
