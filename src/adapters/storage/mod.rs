//! Storage adapters
//!
//! In-memory implementations of the persistence ports, for tests and
//! single-process embedding.

mod in_memory_batch_repository;
mod in_memory_product_repository;
mod in_memory_work_week_repository;

pub use in_memory_batch_repository::InMemoryBatchRepository;
pub use in_memory_product_repository::InMemoryProductRepository;
pub use in_memory_work_week_repository::InMemoryWorkWeekRepository;
