//! Preference Learner
//!
//! User interest profiles with adaptive weights learned from interaction
//! history. The learning model is a simple accumulated bias: category weights
//! drift up with engagement, risk tolerance drifts toward the risk level of
//! what the user actually engages with.

pub mod profile;
pub mod store;

pub use profile::{InteractionEvent, InteractionKind, TimeHorizon, UserProfile};
pub use store::ProfileStore;
