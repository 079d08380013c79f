//! Adapter implementations for quest ports.

pub mod memory;
pub mod tracing_notifier;
