//! Destination types for the hiking catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Trail style of a hiking destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrailType {
    /// Trail that returns to its starting point
    #[default]
    Loop,
    /// Out to a turnaround point and back the same way
    #[serde(rename = "Out-and-Back")]
    OutAndBack,
    /// Multi-day hike carrying overnight gear
    Backpacking,
    /// Day hikes from a fixed camp
    #[serde(rename = "Base-Camping")]
    BaseCamping,
    /// One section of a long-distance trail
    #[serde(rename = "Section-hiking")]
    SectionHiking,
}

impl std::fmt::Display for TrailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrailType::Loop => write!(f, "Loop"),
            TrailType::OutAndBack => write!(f, "Out-and-Back"),
            TrailType::Backpacking => write!(f, "Backpacking"),
            TrailType::BaseCamping => write!(f, "Base-Camping"),
            TrailType::SectionHiking => write!(f, "Section-hiking"),
        }
    }
}

impl FromStr for TrailType {
    type Err = DestinationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Loop" => Ok(TrailType::Loop),
            "Out-and-Back" => Ok(TrailType::OutAndBack),
            "Backpacking" => Ok(TrailType::Backpacking),
            "Base-Camping" => Ok(TrailType::BaseCamping),
            "Section-hiking" => Ok(TrailType::SectionHiking),
            other => Err(DestinationError::UnknownTrailType(other.to_string())),
        }
    }
}

/// Geographic coordinate in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude/longitude degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn in_range(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Input fields for creating a destination.
///
/// Session fields are not part of the input; they start empty and are
/// written by the session controller at stop time.
#[derive(Debug, Clone)]
pub struct NewDestination {
    /// Display name
    pub name: String,
    /// Display address of the selected map location
    pub location: String,
    /// Trail style
    pub trail_type: TrailType,
    /// Difficulty rating, 1 (easy) to 10 (hard)
    pub difficulty: u8,
    /// Free-text notes
    pub info: String,
    /// Selected map coordinate
    pub coordinate: Coordinate,
}

impl NewDestination {
    /// A plausible fixture destination, used for previews and tests.
    pub fn sample() -> Self {
        Self {
            name: "Sample Trail".to_string(),
            location: "Sample Location".to_string(),
            trail_type: TrailType::Loop,
            difficulty: 5,
            info: "Sample Trail in Sample Mountain National Park offers breathtaking \
                   panoramic views as it winds through the alpine tundra."
                .to_string(),
            coordinate: Coordinate::new(37.7749, -122.4194),
        }
    }
}

/// A hiking destination and, once hiked, its session summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Display address of the selected map location
    pub location: String,
    /// Trail style
    pub trail_type: TrailType,
    /// Difficulty rating, 1 (easy) to 10 (hard)
    pub difficulty: u8,
    /// Free-text notes
    pub info: String,
    /// Selected map coordinate
    pub coordinate: Coordinate,
    /// First session start; set once and never overwritten by a resume
    pub start_time: Option<DateTime<Utc>>,
    /// Session end; written at stop time
    pub end_time: Option<DateTime<Utc>>,
    /// Elapsed session time as `HH:MM:SS`; written at stop time
    pub total_time: Option<String>,
    /// Step count for the session window
    pub steps: f64,
    /// Distance walked in meters
    pub distance_meters: f64,
    /// Active energy burned in kilocalories
    pub calories_kcal: f64,
    /// Average speed in km/h over the session window
    pub avg_speed_kmh: f64,
    /// True once the session has been stopped and is ready to save
    pub is_finished: bool,
    /// Record creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Destination {
    /// Create a destination from validated input, with all session fields
    /// empty.
    pub fn new(draft: NewDestination) -> Result<Self, DestinationError> {
        if !(1..=10).contains(&draft.difficulty) {
            return Err(DestinationError::InvalidDifficulty(draft.difficulty));
        }
        if !draft.coordinate.in_range() {
            return Err(DestinationError::InvalidCoordinate {
                latitude: draft.coordinate.latitude,
                longitude: draft.coordinate.longitude,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: draft.name,
            location: draft.location,
            trail_type: draft.trail_type,
            difficulty: draft.difficulty,
            info: draft.info,
            coordinate: draft.coordinate,
            start_time: None,
            end_time: None,
            total_time: None,
            steps: 0.0,
            distance_meters: 0.0,
            calories_kcal: 0.0,
            avg_speed_kmh: 0.0,
            is_finished: false,
            created_at: Utc::now(),
        })
    }
}

/// Validation errors for destination fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DestinationError {
    /// Difficulty outside the 1-10 scale
    #[error("difficulty must be between 1 and 10, got {0}")]
    InvalidDifficulty(u8),

    /// Coordinate outside valid degree ranges
    #[error("coordinate out of range: {latitude}, {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Unrecognized trail style name
    #[error("unknown trail type: {0}")]
    UnknownTrailType(String),
}
