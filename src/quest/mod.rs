//! Quest status workflow for the learning tracker client.
//!
//! Quests are loaded per workspace from the backend task service, normalized
//! into view-models, and cached with explicit generations. When the backend
//! cannot supply quests, a deterministic placeholder set is shown instead.
//! User actions advance quests optimistically and roll back on failure. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - The shared collection cache in [`cache`]

pub mod adapters;
pub mod cache;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
