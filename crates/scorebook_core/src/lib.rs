//! Scorebook Core Types
//!
//! This crate contains pure types and logic with no I/O.
//! All types are serializable with stable, cross-platform encoding.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cricket;
pub mod digest;
pub mod error;
pub mod id;

// Re-exports
pub use cricket::{BALLS_PER_OVER, MAX_WICKETS, format_overs, format_rate, per_over_rate};
pub use digest::Digest;
pub use error::{ScoreError, ScoreResult};
pub use id::{MatchId, PlayerName};
