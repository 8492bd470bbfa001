//! Session application services.
//!
//! - `SessionDispatcher` - single writer applying commands and ticks
//! - `SessionRuntime` / `SessionHandle` - task wiring around the dispatcher
//! - `SessionView` - render view rebuilt after every message

mod commands;
mod dispatcher;
mod runtime;
mod view;

pub use commands::SessionCommand;
pub use dispatcher::SessionDispatcher;
pub use runtime::{SessionHandle, SessionRuntime};
pub use view::{
    CodeOption, FieldView, IdentityView, SessionAction, SessionView, SurveyItemView, TimerView,
};
