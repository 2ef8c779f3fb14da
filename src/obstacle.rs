use csv::ReaderBuilder;
use log::info;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not read obstacle table: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map-center header: {0:?}")]
    MalformedHeader(String),
    #[error("malformed obstacle record: {0}")]
    MalformedRecord(#[from] csv::Error),
}

/// A raw rectangular-prism obstacle: centre position and half-extents,
/// in metres relative to the map centre.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ObstacleRecord {
    pub north: f64,
    pub east: f64,
    pub alt: f64,
    pub half_north: f64,
    pub half_east: f64,
    pub half_alt: f64,
}

impl ObstacleRecord {
    pub fn new(
        north: f64,
        east: f64,
        alt: f64,
        half_north: f64,
        half_east: f64,
        half_alt: f64,
    ) -> ObstacleRecord {
        ObstacleRecord {
            north,
            east,
            alt,
            half_north,
            half_east,
            half_alt,
        }
    }

    /// Whether a horizontal slice at `altitude` cuts through the obstacle's
    /// vertical extent inflated by `safety_distance`. The interval is open:
    /// a slice exactly tangent to an inflated face does not cut it.
    pub fn crosses_altitude(&self, altitude: f64, safety_distance: f64) -> bool {
        altitude > self.alt - self.half_alt - safety_distance
            && altitude < self.alt + self.half_alt + safety_distance
    }
}

/// Geodetic map centre carried by the table's first header row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat0: f64,
    pub lon0: f64,
}

/// A parsed obstacle table: the map centre plus one record per data row.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleTable {
    pub center: MapCenter,
    pub records: Vec<ObstacleRecord>,
}

impl ObstacleTable {
    /// Loads a table from disk. The first row carries the map centre
    /// (`lat0 <v>, lon0 <v>`), the second the column names; both are
    /// consumed here so that the grid builder only ever sees fully parsed
    /// records.
    pub fn load(path: impl AsRef<Path>) -> Result<ObstacleTable, IngestError> {
        let raw = fs::read_to_string(path)?;
        ObstacleTable::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<ObstacleTable, IngestError> {
        let mut lines = raw.lines();
        let center_line = lines
            .next()
            .ok_or_else(|| IngestError::MalformedHeader(String::new()))?;
        let center = parse_map_center(center_line)?;
        // The second header row holds the column names.
        lines.next();
        let remaining = lines.collect::<Vec<_>>().join("\n");

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(remaining.as_bytes());
        let mut records = Vec::new();
        for result in csv_reader.deserialize() {
            let record: ObstacleRecord = result?;
            records.push(record);
        }
        info!(
            "loaded {} obstacle records (map centre lat0 {}, lon0 {})",
            records.len(),
            center.lat0,
            center.lon0
        );
        Ok(ObstacleTable { center, records })
    }
}

fn parse_map_center(line: &str) -> Result<MapCenter, IngestError> {
    let malformed = || IngestError::MalformedHeader(line.to_owned());
    let (lat_part, lon_part) = line.split_once(',').ok_or_else(malformed)?;
    let lat0 = header_value(lat_part, "lat0").ok_or_else(malformed)?;
    let lon0 = header_value(lon_part, "lon0").ok_or_else(malformed)?;
    Ok(MapCenter { lat0, lon0 })
}

fn header_value(part: &str, key: &str) -> Option<f64> {
    let mut tokens = part.split_whitespace();
    if tokens.next()? != key {
        return None;
    }
    tokens.next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
lat0 37.792480, lon0 -122.397450
posX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ
-310.2389,-439.2315,85.5,5,5,85.5
-300.2389,-439.2315,85.5,5,5,85.5
";

    #[test]
    fn parses_center_and_records() {
        let table = ObstacleTable::parse(TABLE).unwrap();
        assert_eq!(table.center, MapCenter { lat0: 37.792480, lon0: -122.397450 });
        assert_eq!(table.records.len(), 2);
        assert_eq!(
            table.records[0],
            ObstacleRecord::new(-310.2389, -439.2315, 85.5, 5.0, 5.0, 85.5)
        );
    }

    #[test]
    fn rejects_malformed_center() {
        let raw = "37.792480, -122.397450\nposX,posY\n";
        assert!(matches!(
            ObstacleTable::parse(raw).unwrap_err(),
            IngestError::MalformedHeader(_)
        ));
    }

    #[test]
    fn rejects_malformed_record() {
        let raw = "lat0 1.0, lon0 2.0\nposX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ\n1,2,three,4,5,6\n";
        assert!(matches!(
            ObstacleTable::parse(raw).unwrap_err(),
            IngestError::MalformedRecord(_)
        ));
    }

    #[test]
    fn empty_table_has_no_records() {
        let raw = "lat0 1.0, lon0 2.0\nposX,posY,posZ,halfSizeX,halfSizeY,halfSizeZ\n";
        let table = ObstacleTable::parse(raw).unwrap();
        assert!(table.records.is_empty());
    }

    #[test]
    fn altitude_interval_is_open() {
        let o = ObstacleRecord::new(37.0, 12.0, 8.0, 5.0, 5.0, 8.0);
        assert!(o.crosses_altitude(5.0, 3.0));
        assert!(o.crosses_altitude(-2.9, 3.0));
        assert!(!o.crosses_altitude(-3.0, 3.0));
        assert!(!o.crosses_altitude(19.0, 3.0));
        assert!(!o.crosses_altitude(20.0, 3.0));
    }
}
