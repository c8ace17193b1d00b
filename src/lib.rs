//! Brewline - production scheduling for a brewery.
//!
//! Tracks batches through their ordered production phases: the per-phase
//! review workflow, waste accounting along the chain, and completion dates
//! projected onto the plant's working hours.
//!
//! The crate is laid out hexagonally. `domain` is pure and synchronous,
//! `ports` are the async seams, `adapters` are in-memory and logging
//! implementations, and `application` holds the use-case handlers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
