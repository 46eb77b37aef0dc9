//! # Movement Module
//!
//! Projection between geographic positions and grid cells, used when an
//! external position feed drives the player.

use crate::game::Coordinate;
use crate::GameConfig;
use serde::{Deserialize, Serialize};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Maps geographic positions onto the grid and back.
///
/// # Examples
///
/// ```
/// use gridmerge::{Coordinate, GeoPoint, GridProjection};
///
/// let projection = GridProjection::new(GeoPoint::new(0.0, 0.0), 1e-4);
/// assert_eq!(
///     projection.to_coordinate(GeoPoint::new(0.00025, -0.00005)),
///     Some(Coordinate::new(2, -1))
/// );
/// assert_eq!(projection.to_coordinate(GeoPoint::new(f64::NAN, 0.0)), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridProjection {
    /// South-west corner of cell (0, 0)
    pub origin: GeoPoint,
    /// Cell edge length in degrees
    pub cell_degrees: f64,
}

impl GridProjection {
    pub fn new(origin: GeoPoint, cell_degrees: f64) -> Self {
        Self {
            origin,
            cell_degrees,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.origin, config.cell_degrees)
    }

    /// Returns the cell containing `point`, flooring each axis, or `None`
    /// when the point is not finite or lies beyond the addressable grid.
    pub fn to_coordinate(&self, point: GeoPoint) -> Option<Coordinate> {
        Some(Coordinate::new(
            Self::cell_index(point.lat - self.origin.lat, self.cell_degrees)?,
            Self::cell_index(point.lng - self.origin.lng, self.cell_degrees)?,
        ))
    }

    /// Returns the south-west and north-east corners of a cell.
    pub fn cell_bounds(&self, coordinate: Coordinate) -> (GeoPoint, GeoPoint) {
        let south_west = GeoPoint::new(
            self.origin.lat + f64::from(coordinate.i) * self.cell_degrees,
            self.origin.lng + f64::from(coordinate.j) * self.cell_degrees,
        );
        let north_east = GeoPoint::new(
            self.origin.lat + (f64::from(coordinate.i) + 1.0) * self.cell_degrees,
            self.origin.lng + (f64::from(coordinate.j) + 1.0) * self.cell_degrees,
        );
        (south_west, north_east)
    }

    /// Returns the center of a cell.
    pub fn cell_center(&self, coordinate: Coordinate) -> GeoPoint {
        let (south_west, north_east) = self.cell_bounds(coordinate);
        GeoPoint::new(
            (south_west.lat + north_east.lat) / 2.0,
            (south_west.lng + north_east.lng) / 2.0,
        )
    }

    fn cell_index(offset: f64, cell_degrees: f64) -> Option<i32> {
        let index = (offset / cell_degrees).floor();
        let range = f64::from(i32::MIN)..=f64::from(i32::MAX);
        // NaN fails the range check as well
        range.contains(&index).then_some(index as i32)
    }
}

impl Default for GridProjection {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin_cell() {
        let projection = GridProjection::default();
        assert_eq!(
            projection.to_coordinate(projection.origin),
            Some(Coordinate::origin())
        );
    }

    #[test]
    fn test_negative_offsets_floor_downward() {
        let projection = GridProjection::new(GeoPoint::new(0.0, 0.0), 1.0);
        assert_eq!(
            projection.to_coordinate(GeoPoint::new(-0.5, -1.5)),
            Some(Coordinate::new(-1, -2))
        );
        assert_eq!(
            projection.to_coordinate(GeoPoint::new(2.99, 0.01)),
            Some(Coordinate::new(2, 0))
        );
    }

    #[test]
    fn test_cell_center_round_trips() {
        let projection = GridProjection::default();
        for coordinate in [
            Coordinate::new(0, 0),
            Coordinate::new(-8, 7),
            Coordinate::new(123, -456),
        ] {
            let center = projection.cell_center(coordinate);
            assert_eq!(projection.to_coordinate(center), Some(coordinate));
        }
    }

    #[test]
    fn test_cell_bounds() {
        let projection = GridProjection::new(GeoPoint::new(10.0, 20.0), 0.5);
        let (sw, ne) = projection.cell_bounds(Coordinate::new(2, -1));
        assert_eq!(sw, GeoPoint::new(11.0, 19.5));
        assert_eq!(ne, GeoPoint::new(11.5, 20.0));
    }

    #[test]
    fn test_unusable_points_have_no_cell() {
        let projection = GridProjection::default();
        assert_eq!(projection.to_coordinate(GeoPoint::new(f64::NAN, f64::NAN)), None);
        assert_eq!(projection.to_coordinate(GeoPoint::new(0.0, f64::INFINITY)), None);
        // 1e6 degrees is far more than i32::MAX cells of 1e-4 degrees
        assert_eq!(projection.to_coordinate(GeoPoint::new(1e6, 0.0)), None);

        let tiny = GridProjection::new(GeoPoint::new(0.0, 0.0), 1e-12);
        assert_eq!(tiny.to_coordinate(GeoPoint::new(45.0, 0.0)), None);
    }

    #[test]
    fn test_cell_bounds_at_grid_edge() {
        let projection = GridProjection::new(GeoPoint::new(0.0, 0.0), 1.0);
        let (sw, ne) = projection.cell_bounds(Coordinate::new(i32::MAX, i32::MIN));
        assert_eq!(sw, GeoPoint::new(f64::from(i32::MAX), f64::from(i32::MIN)));
        assert_eq!(
            ne,
            GeoPoint::new(f64::from(i32::MAX) + 1.0, f64::from(i32::MIN) + 1.0)
        );
    }
}
