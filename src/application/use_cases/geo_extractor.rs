use tracing::debug;

use crate::domain::table::{AnalysisConfig, Coordinate, Dataset};

/// Pull valid latitude/longitude pairs out of a dataset.
///
/// A row survives only when both cells parse as finite floats inside the
/// WGS84 ranges. Missing columns yield an empty result rather than an error.
pub fn extract_coordinates(dataset: &Dataset, config: &AnalysisConfig) -> Vec<Coordinate> {
    let schema = dataset.schema();
    let (Some(lat), Some(lon)) = (
        schema.resolve(&config.latitude_column),
        schema.resolve(&config.longitude_column),
    ) else {
        debug!(
            latitude = %config.latitude_column,
            longitude = %config.longitude_column,
            "Coordinate columns absent"
        );
        return Vec::new();
    };

    let policy = config.coercion;
    let coordinates: Vec<Coordinate> = dataset
        .rows()
        .iter()
        .filter_map(|row| {
            let latitude = policy.numeric(row.get(lat))?;
            let longitude = policy.numeric(row.get(lon))?;
            let in_range = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
            in_range.then_some(Coordinate {
                latitude,
                longitude,
            })
        })
        .collect();

    debug!(
        rows = dataset.len(),
        coordinates = coordinates.len(),
        "Coordinates extracted"
    );
    coordinates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(lat: &str, lon: &str) -> AnalysisConfig {
        AnalysisConfig {
            latitude_column: lat.to_string(),
            longitude_column: lon.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_rows_dropped() {
        let dataset = Dataset::from_records(
            &["lat", "lon"],
            &[vec!["51.5", "-0.1"], vec!["bad", "0"], vec!["52.0", ""]],
        )
        .unwrap();

        let coordinates = extract_coordinates(&dataset, &config("lat", "lon"));
        assert_eq!(
            coordinates,
            vec![Coordinate {
                latitude: 51.5,
                longitude: -0.1
            }]
        );
    }

    #[test]
    fn test_out_of_range_dropped() {
        let dataset = Dataset::from_records(
            &["Latitude", "Longitude"],
            &[vec!["91", "0"], vec!["0", "181"], vec!["-90", "180"]],
        )
        .unwrap();

        let coordinates = extract_coordinates(&dataset, &AnalysisConfig::default());
        assert_eq!(coordinates.len(), 1);
        assert_eq!(coordinates[0].latitude, -90.0);
    }

    #[test]
    fn test_absent_columns_yield_empty() {
        let dataset = Dataset::from_records(&["x"], &[vec!["1"]]).unwrap();
        assert!(extract_coordinates(&dataset, &AnalysisConfig::default()).is_empty());
    }
}
