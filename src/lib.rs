//! Story Engine — advancement core for crowd-sourced branching stories.
//!
//! A story moves forward one chapter at a time. The next chapter is drawn
//! from audience continuations weighted by score, and a continuation may
//! carry an outcome block (`1-9: ... 10-20: ...`) settled by a die roll.
//! Fetching candidates and publishing chapters is left to the host.

pub mod core;
pub mod schema;

pub use crate::core::advancer::{advance, StoryAdvancer};
pub use crate::core::config::AdvancerConfig;
pub use crate::core::random::{RandomSource, ScriptedSource};
pub use crate::schema::candidate::Candidate;
pub use crate::schema::outcome::{OutcomeRange, ParsedBlock};
pub use crate::schema::story::{AdvancementResult, StorySnapshot};
