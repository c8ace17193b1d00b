//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `BatchRepository` - Batches and their phase records, version-checked
//! - `ProductRepository` - Product recipes
//! - `WorkWeekRepository` - The single active work week
//!
//! ## Collaborator Ports
//!
//! - `NotificationSink` - Fire-and-forget workflow notifications
//! - `AccessPolicy` - Sector supervision and role predicates

mod access_policy;
mod batch_repository;
mod notification_sink;
mod product_repository;
mod work_week_repository;

pub use access_policy::AccessPolicy;
pub use batch_repository::BatchRepository;
pub use notification_sink::NotificationSink;
pub use product_repository::ProductRepository;
pub use work_week_repository::WorkWeekRepository;
