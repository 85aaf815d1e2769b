// Conversation agents: mode table, intent classification, and dispatch

pub mod dispatcher;
pub mod intent;
pub mod modes;

pub use dispatcher::{DispatchError, ModeDispatcher};
pub use intent::{classify_intent, score_modes, IntentClassification};
pub use modes::{mode_spec, ModeSpec, MODE_TABLE};
