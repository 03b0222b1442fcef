pub mod advancer;
pub mod chapter;
pub mod config;
pub mod dice;
pub mod lint;
pub mod outcome;
pub mod random;
pub mod selector;
