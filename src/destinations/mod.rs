//! Destinations module for the hiking catalog and its store contract.

pub mod store;
pub mod types;

pub use store::{DestinationStore, StoreError};
pub use types::{Coordinate, Destination, DestinationError, NewDestination, TrailType};
