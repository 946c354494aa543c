//! Unit tests for destination types and validation.

use std::str::FromStr;
use trailtrek::destinations::{
    Coordinate, Destination, DestinationError, NewDestination, TrailType,
};

#[test]
fn test_new_destination_starts_with_empty_session_fields() {
    let destination = Destination::new(NewDestination::sample()).unwrap();

    assert!(destination.start_time.is_none());
    assert!(destination.end_time.is_none());
    assert!(destination.total_time.is_none());
    assert_eq!(destination.steps, 0.0);
    assert_eq!(destination.distance_meters, 0.0);
    assert_eq!(destination.calories_kcal, 0.0);
    assert_eq!(destination.avg_speed_kmh, 0.0);
    assert!(!destination.is_finished);
}

#[test]
fn test_difficulty_bounds() {
    for difficulty in [1, 5, 10] {
        let draft = NewDestination {
            difficulty,
            ..NewDestination::sample()
        };
        assert!(Destination::new(draft).is_ok(), "difficulty {difficulty}");
    }

    for difficulty in [0, 11, 255] {
        let draft = NewDestination {
            difficulty,
            ..NewDestination::sample()
        };
        assert_eq!(
            Destination::new(draft).unwrap_err(),
            DestinationError::InvalidDifficulty(difficulty)
        );
    }
}

#[test]
fn test_coordinate_range_is_validated() {
    let draft = NewDestination {
        coordinate: Coordinate::new(91.0, 0.0),
        ..NewDestination::sample()
    };
    assert!(matches!(
        Destination::new(draft),
        Err(DestinationError::InvalidCoordinate { .. })
    ));

    let draft = NewDestination {
        coordinate: Coordinate::new(0.0, f64::NAN),
        ..NewDestination::sample()
    };
    assert!(matches!(
        Destination::new(draft),
        Err(DestinationError::InvalidCoordinate { .. })
    ));
}

#[test]
fn test_trail_type_display_round_trips() {
    let all = [
        TrailType::Loop,
        TrailType::OutAndBack,
        TrailType::Backpacking,
        TrailType::BaseCamping,
        TrailType::SectionHiking,
    ];
    for trail_type in all {
        let text = trail_type.to_string();
        assert_eq!(TrailType::from_str(&text).unwrap(), trail_type);
    }
}

#[test]
fn test_trail_type_rejects_unknown_names() {
    assert_eq!(
        TrailType::from_str("Scrambling").unwrap_err(),
        DestinationError::UnknownTrailType("Scrambling".to_string())
    );
}

#[test]
fn test_destination_json_round_trips() {
    let destination = Destination::new(NewDestination {
        trail_type: TrailType::OutAndBack,
        ..NewDestination::sample()
    })
    .unwrap();

    let json = serde_json::to_string(&destination).unwrap();
    assert!(json.contains("Out-and-Back"));

    let decoded: Destination = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, destination);
}
