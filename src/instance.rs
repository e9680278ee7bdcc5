//! Module for loading and representing TSP instances.
//!
//! Points are read from headerless CSV files, one point per record and one
//! coordinate per field. The best-known tour is persisted next to them as a
//! single comma-separated line of point indices.

use crate::error::{Result, TspError};
use crate::permutation::Permutation;
use crate::point::{distance, Point, PointSet};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// A named point set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TspInstance {
    /// Name of the instance (file stem when loaded from disk)
    pub name: String,
    /// The points to visit
    pub points: PointSet,
}

impl TspInstance {
    pub fn new(name: impl Into<String>, points: PointSet) -> Self {
        TspInstance {
            name: name.into(),
            points,
        }
    }

    /// Build an instance from raw coordinate rows
    pub fn from_coordinates(name: impl Into<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let points = PointSet::new(rows.into_iter().map(Point::new).collect())?;
        Ok(TspInstance::new(name, points))
    }

    /// Parse an instance from a headerless CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TspError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for (record_idx, record) in reader.records().enumerate() {
            let record = record?;
            let mut row = Vec::with_capacity(record.len());
            for field in record.iter() {
                let value = field
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| TspError::InvalidCoordinate {
                        record: record_idx,
                        value: field.to_string(),
                    })?;
                row.push(value);
            }
            rows.push(row);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let instance = Self::from_coordinates(name, rows)?;
        log::info!(
            "Loaded instance {} ({} points of dimension {})",
            instance.name,
            instance.num_points(),
            instance.points.dimension()
        );
        Ok(instance)
    }

    /// Number of points
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Summary of pairwise distances
    pub fn statistics(&self) -> InstanceStatistics {
        let n = self.points.len();
        let mut total = 0.0;
        let mut max_distance: f64 = 0.0;
        let mut pairs = 0usize;

        for i in 0..n {
            for j in i + 1..n {
                let d = distance(&self.points[i], &self.points[j]);
                total += d;
                max_distance = max_distance.max(d);
                pairs += 1;
            }
        }

        InstanceStatistics {
            name: self.name.clone(),
            num_points: n,
            point_dimension: self.points.dimension(),
            avg_distance: if pairs > 0 { total / pairs as f64 } else { 0.0 },
            max_distance,
        }
    }
}

/// Load a persisted tour.
///
/// A missing or empty file yields `Ok(None)`. Values that do not form a
/// permutation are an error.
pub fn load_tour<P: AsRef<Path>>(path: P) -> Result<Option<Permutation>> {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("No persisted tour at {:?}", path);
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| TspError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut values = Vec::new();
    for record in reader.records() {
        let record = record?;
        for field in record.iter().filter(|f| !f.is_empty()) {
            let value: usize = field
                .parse()
                .map_err(|_| TspError::InvalidTour(format!("{:?} is not an index", field)))?;
            values.push(value);
        }
    }

    if values.is_empty() {
        return Ok(None);
    }

    Permutation::try_from(values).map(Some)
}

/// Persist a tour as one comma-separated line
pub fn save_tour<P: AsRef<Path>>(path: P, tour: &Permutation) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| TspError::io(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(tour.iter().map(|v| v.to_string()))?;
    writer.flush().map_err(|e| TspError::io(path, e))?;
    Ok(())
}

/// Instance statistics
#[derive(Debug, Clone)]
pub struct InstanceStatistics {
    pub name: String,
    pub num_points: usize,
    pub point_dimension: usize,
    pub avg_distance: f64,
    pub max_distance: f64,
}

impl std::fmt::Display for InstanceStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instance: {}", self.name)?;
        writeln!(f, "  Points: {} (dimension {})", self.num_points, self.point_dimension)?;
        writeln!(f, "  Avg distance: {:.2}", self.avg_distance)?;
        writeln!(f, "  Max distance: {:.2}", self.max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ga-tsp-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_from_csv() {
        let path = temp_path("points.csv");
        std::fs::write(&path, "0,0\n2, 2\n3,1\n4,2\n").unwrap();

        let instance = TspInstance::from_csv(&path).unwrap();
        assert_eq!(instance.num_points(), 4);
        assert_eq!(instance.points.dimension(), 2);
        assert_eq!(instance.points[1].coords(), &[2.0, 2.0]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_csv_rejects_bad_input() {
        let empty = temp_path("empty.csv");
        std::fs::write(&empty, "").unwrap();
        assert!(matches!(TspInstance::from_csv(&empty), Err(TspError::EmptyPointSet)));

        let ragged = temp_path("ragged.csv");
        std::fs::write(&ragged, "0,0\n1,1,1\n").unwrap();
        assert!(matches!(
            TspInstance::from_csv(&ragged),
            Err(TspError::DimensionMismatch { .. })
        ));

        let garbage = temp_path("garbage.csv");
        std::fs::write(&garbage, "0,zero\n").unwrap();
        assert!(matches!(
            TspInstance::from_csv(&garbage),
            Err(TspError::InvalidCoordinate { record: 0, .. })
        ));

        for (file, contents) in [("nan.csv", "0,0\n1,NaN\n"), ("inf.csv", "0,0\n1,1\ninf,2\n")] {
            let path = temp_path(file);
            std::fs::write(&path, contents).unwrap();
            assert!(matches!(
                TspInstance::from_csv(&path),
                Err(TspError::InvalidCoordinate { .. })
            ));
            std::fs::remove_file(&path).ok();
        }

        for p in [empty, ragged, garbage] {
            std::fs::remove_file(p).ok();
        }
    }

    #[test]
    fn test_tour_round_trip_and_missing_file() {
        let path = temp_path("tour.csv");
        std::fs::remove_file(&path).ok();
        assert!(load_tour(&path).unwrap().is_none());

        let tour = Permutation::try_from(vec![2, 0, 3, 1]).unwrap();
        save_tour(&path, &tour).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "2,0,3,1");
        assert_eq!(load_tour(&path).unwrap(), Some(tour));

        std::fs::write(&path, "0,0,1\n").unwrap();
        assert!(matches!(load_tour(&path), Err(TspError::InvalidTour(_))));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_statistics() {
        let instance =
            TspInstance::from_coordinates("pair", vec![vec![0.0, 0.0], vec![3.0, 4.0]]).unwrap();
        let stats = instance.statistics();
        assert_eq!(stats.num_points, 2);
        assert!((stats.avg_distance - 5.0).abs() < 1e-10);
        assert!((stats.max_distance - 5.0).abs() < 1e-10);
    }
}
