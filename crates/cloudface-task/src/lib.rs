//! Pollable background task handle.
//!
//! This crate provides:
//! - `Task<T>`: spawn a fallible async job and observe it either by
//!   polling (`state`, `try_result`) or by awaiting (`join`)
//! - `TaskState`: the Running / Succeeded / Failed lifecycle
//! - Panic capture: a panicking job surfaces as a failed task, never a hang

pub mod error;
pub mod task;

pub use error::TaskError;
pub use task::{Task, TaskState, DEFAULT_POLL_INTERVAL_MS};
