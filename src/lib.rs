//! Questboard: client-side core of a gamified learning tracker.
//!
//! This crate loads quest boards from a REST task service, keeps them in a
//! workspace-keyed cache, and advances quest status with optimistic updates
//! that roll back when the service refuses or is unreachable. When no quests
//! can be fetched it degrades to a fixed set of placeholder quests so the
//! board always renders.
//!
//! # Architecture
//!
//! Questboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure quest types and mappings with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the task service and the
//!   notification channel
//! - **Adapters**: Concrete implementations of ports (in-memory, tracing)
//!
//! # Modules
//!
//! - [`quest`]: Quest loading, caching, transitions and board views

pub mod quest;
