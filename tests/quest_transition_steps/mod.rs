//! Step definitions for quest transition scenarios.

pub mod given;
pub mod when;
pub mod world;
