//! Database operations using rusqlite.

use crate::destinations::{
    Coordinate, Destination, DestinationStore, NewDestination, StoreError, TrailType,
};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use std::str::FromStr;
use uuid::Uuid;

const COLUMNS: &str = "id, name, location, trail_type, difficulty, info, latitude, longitude, \
                       start_time, end_time, total_time, steps, distance_meters, calories_kcal, \
                       avg_speed_kmh, is_finished, created_at";

/// SQLite-backed destination store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

        let current_version = self.schema_version()?;
        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, StoreError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(StoreError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), StoreError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        // Future migrations would go here:
        // if from_version < 2 { ... }

        Ok(())
    }

    /// Export all finished hikes as pretty-printed JSON.
    pub fn export_finished_json(&self) -> Result<String, StoreError> {
        let finished = self.list_by_finished(true)?;
        serde_json::to_string_pretty(&finished)
            .map_err(|e| StoreError::SerializationError(e.to_string()))
    }

    fn query_destinations(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Destination>, StoreError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params, read_row)
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let mut destinations = Vec::new();
        for row in rows {
            let row = row.map_err(|e| StoreError::QueryFailed(e.to_string()))?;
            destinations.push(Destination::try_from(row)?);
        }
        Ok(destinations)
    }
}

impl DestinationStore for Database {
    fn create(&mut self, draft: NewDestination) -> Result<Destination, StoreError> {
        let destination = Destination::new(draft)?;

        self.conn
            .execute(
                &format!(
                    "INSERT INTO destinations ({COLUMNS}) VALUES \
                     (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
                ),
                params![
                    destination.id.to_string(),
                    destination.name,
                    destination.location,
                    destination.trail_type.to_string(),
                    destination.difficulty,
                    destination.info,
                    destination.coordinate.latitude,
                    destination.coordinate.longitude,
                    destination.start_time.map(|t| t.to_rfc3339()),
                    destination.end_time.map(|t| t.to_rfc3339()),
                    destination.total_time,
                    destination.steps,
                    destination.distance_meters,
                    destination.calories_kcal,
                    destination.avg_speed_kmh,
                    destination.is_finished,
                    destination.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        tracing::info!(id = %destination.id, name = %destination.name, "destination created");
        Ok(destination)
    }

    fn get(&self, id: Uuid) -> Result<Option<Destination>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM destinations WHERE id = ?1"),
                params![id.to_string()],
                read_row,
            )
            .optional()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        row.map(Destination::try_from).transpose()
    }

    fn update(&mut self, destination: &Destination) -> Result<(), StoreError> {
        // a single statement keeps the write atomic from a reader's view
        let affected = self
            .conn
            .execute(
                "UPDATE destinations SET name = ?2, location = ?3, trail_type = ?4, \
                 difficulty = ?5, info = ?6, latitude = ?7, longitude = ?8, start_time = ?9, \
                 end_time = ?10, total_time = ?11, steps = ?12, distance_meters = ?13, \
                 calories_kcal = ?14, avg_speed_kmh = ?15, is_finished = ?16 WHERE id = ?1",
                params![
                    destination.id.to_string(),
                    destination.name,
                    destination.location,
                    destination.trail_type.to_string(),
                    destination.difficulty,
                    destination.info,
                    destination.coordinate.latitude,
                    destination.coordinate.longitude,
                    destination.start_time.map(|t| t.to_rfc3339()),
                    destination.end_time.map(|t| t.to_rfc3339()),
                    destination.total_time,
                    destination.steps,
                    destination.distance_meters,
                    destination.calories_kcal,
                    destination.avg_speed_kmh,
                    destination.is_finished,
                ],
            )
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        if affected == 0 {
            return Err(StoreError::NotFound(destination.id));
        }
        Ok(())
    }

    fn delete(&mut self, ids: &[Uuid]) -> Result<usize, StoreError> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let mut deleted = 0;
        for id in ids {
            deleted += tx
                .execute(
                    "DELETE FROM destinations WHERE id = ?1",
                    params![id.to_string()],
                )
                .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        tracing::info!(requested = ids.len(), deleted, "destinations deleted");
        Ok(deleted)
    }

    fn list(&self) -> Result<Vec<Destination>, StoreError> {
        self.query_destinations(
            &format!("SELECT {COLUMNS} FROM destinations ORDER BY name ASC"),
            params![],
        )
    }

    fn list_by_finished(&self, finished: bool) -> Result<Vec<Destination>, StoreError> {
        self.query_destinations(
            &format!(
                "SELECT {COLUMNS} FROM destinations WHERE is_finished = ?1 ORDER BY name ASC"
            ),
            params![finished],
        )
    }
}

/// Raw column values of one destinations row.
struct DestinationRow {
    id: String,
    name: String,
    location: String,
    trail_type: String,
    difficulty: i64,
    info: String,
    latitude: f64,
    longitude: f64,
    start_time: Option<String>,
    end_time: Option<String>,
    total_time: Option<String>,
    steps: f64,
    distance_meters: f64,
    calories_kcal: f64,
    avg_speed_kmh: f64,
    is_finished: bool,
    created_at: String,
}

fn read_row(row: &rusqlite::Row<'_>) -> SqliteResult<DestinationRow> {
    Ok(DestinationRow {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        trail_type: row.get(3)?,
        difficulty: row.get(4)?,
        info: row.get(5)?,
        latitude: row.get(6)?,
        longitude: row.get(7)?,
        start_time: row.get(8)?,
        end_time: row.get(9)?,
        total_time: row.get(10)?,
        steps: row.get(11)?,
        distance_meters: row.get(12)?,
        calories_kcal: row.get(13)?,
        avg_speed_kmh: row.get(14)?,
        is_finished: row.get(15)?,
        created_at: row.get(16)?,
    })
}

impl TryFrom<DestinationRow> for Destination {
    type Error = StoreError;

    fn try_from(row: DestinationRow) -> Result<Self, Self::Error> {
        Ok(Destination {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| StoreError::SerializationError(e.to_string()))?,
            name: row.name,
            location: row.location,
            trail_type: TrailType::from_str(&row.trail_type)
                .map_err(|e| StoreError::SerializationError(e.to_string()))?,
            difficulty: u8::try_from(row.difficulty)
                .map_err(|e| StoreError::SerializationError(e.to_string()))?,
            info: row.info,
            coordinate: Coordinate::new(row.latitude, row.longitude),
            start_time: row.start_time.as_deref().map(parse_timestamp).transpose()?,
            end_time: row.end_time.as_deref().map(parse_timestamp).transpose()?,
            total_time: row.total_time,
            steps: row.steps,
            distance_meters: row.distance_meters,
            calories_kcal: row.calories_kcal,
            avg_speed_kmh: row.avg_speed_kmh,
            is_finished: row.is_finished,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::SerializationError(e.to_string()))
}
