//! Store contract for destination persistence.

use crate::destinations::types::{Destination, DestinationError, NewDestination};
use thiserror::Error;
use uuid::Uuid;

/// Durable storage for [`Destination`] records.
///
/// The session controller is generic over this trait so it can be tested
/// against an in-memory fake; the production implementation is
/// [`crate::storage::Database`].
pub trait DestinationStore {
    /// Validate and persist a new destination, returning the stored record.
    fn create(&mut self, draft: NewDestination) -> Result<Destination, StoreError>;

    /// Fetch a destination by id.
    fn get(&self, id: Uuid) -> Result<Option<Destination>, StoreError>;

    /// Persist the record in place.
    ///
    /// The write must be atomic from the caller's perspective: readers see
    /// either the previous record or the whole new one.
    fn update(&mut self, destination: &Destination) -> Result<(), StoreError>;

    /// Delete the given destinations, returning how many were removed.
    fn delete(&mut self, ids: &[Uuid]) -> Result<usize, StoreError>;

    /// All destinations, sorted by name ascending.
    fn list(&self) -> Result<Vec<Destination>, StoreError>;

    /// Destinations filtered on the finished flag, sorted by name ascending.
    fn list_by_finished(&self, finished: bool) -> Result<Vec<Destination>, StoreError>;
}

/// Errors from a destination store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Rejected by field validation
    #[error("invalid destination: {0}")]
    Invalid(#[from] DestinationError),

    /// No record with the given id
    #[error("destination not found: {0}")]
    NotFound(Uuid),

    /// Failed to open the backing database
    #[error("failed to open database: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed
    #[error("migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Stored data could not be decoded
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    IoError(String),
}
