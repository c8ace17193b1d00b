//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `production` - Batches, phase records, waste and the phase workflow
//! - `calendar` - Work week configuration and schedule estimation

pub mod calendar;
pub mod foundation;
pub mod production;
