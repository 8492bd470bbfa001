//! Application layer - command dispatch and the session runtime.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands flow in as discrete messages; views and exports flow out.

pub mod session;

pub use session::{
    SessionAction, SessionCommand, SessionDispatcher, SessionHandle, SessionRuntime, SessionView,
};
