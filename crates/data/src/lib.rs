//! Persistence boundary for hedged LP strategies.
//!
//! The engine never touches storage. This crate supplies the repository
//! interface it is handed, an in-memory implementation, and the service
//! that resolves the previous snapshot before running the pipeline.

/// Error types.
pub mod error;
/// Repository trait and implementations.
pub mod repositories;
/// Snapshot service.
pub mod service;

pub use error::{RepositoryError, ServiceError};
pub use repositories::{InMemorySnapshotRepository, SnapshotRepository};
pub use service::SnapshotService;
