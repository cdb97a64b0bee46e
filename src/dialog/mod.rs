//! The conversation state machine: steps, per-session history with
//! snapshot-based undo, and the dispatcher that drives a dialog forward.

pub mod engine;
pub mod event;
pub(crate) mod handlers;
pub mod history;
pub mod prompts;
pub mod session;
pub mod step;

pub use engine::DialogEngine;
pub use event::{Command, Inbound, Keyboard, Outbound, Payload};
pub use session::{Session, SessionData};
pub use step::Step;
