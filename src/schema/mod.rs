//! Plain data types passed into and out of the story core.

pub mod candidate;
pub mod outcome;
pub mod story;
