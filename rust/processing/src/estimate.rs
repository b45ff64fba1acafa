// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material cost estimation
//!
//! A linear pricing heuristic over the gross footprint area:
//!
//! - `netArea = max(0, footprintArea - obstaclesArea)`
//! - `heightFactor = 1 + max(0, (roofHeight - 3) * 0.1)`
//! - `tileFactor = 1 + (0.5 - tileSize)` below 0.5 m tiles, else 1
//! - `totalCost = netArea * baseRate * heightFactor * tileFactor`

use roofline_core::{Obstacle, ProjectState, Vertex2D};
use roofline_geometry::polygon_area;
use serde::{Deserialize, Serialize};

/// Roof height above which the height surcharge applies (m)
pub const BASELINE_ROOF_HEIGHT: f64 = 3.0;

/// Surcharge per meter above [`BASELINE_ROOF_HEIGHT`]
pub const HEIGHT_SURCHARGE_PER_METER: f64 = 0.1;

/// Tile edge length below which the labor factor applies (m)
pub const BASELINE_TILE_SIZE: f64 = 0.5;

/// Area and cost breakdown for one project
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    /// Gross shoelace area of the footprint (m²)
    pub footprint_area: f64,
    /// Sum of obstacle rectangles, not clipped to the footprint (m²)
    pub obstacles_area: f64,
    /// Tileable area, never negative (m²)
    pub net_area: f64,
    pub height_factor: f64,
    pub tile_factor: f64,
    /// Base rate with both factors applied (per m²)
    pub effective_rate: f64,
    pub total_cost: f64,
    /// Tiles needed to cover the net area, rounded up
    pub tile_count: u64,
}

impl Estimate {
    /// Estimate for the current project state
    pub fn from_project(state: &ProjectState) -> Self {
        let config = &state.config;
        calculate_estimate(
            &state.points,
            &state.obstacles,
            config.base_rate(),
            config.roof_height,
            config.tile_size,
        )
    }
}

/// Absolute shoelace area of the footprint ring, 0 below 3 vertices
pub fn footprint_area(points: &[Vertex2D]) -> f64 {
    let ring: Vec<_> = points.iter().map(Vertex2D::to_nalgebra).collect();
    polygon_area(&ring)
}

pub fn obstacles_area(obstacles: &[Obstacle]) -> f64 {
    obstacles.iter().map(Obstacle::area).sum()
}

#[inline]
pub fn height_factor(roof_height: f64) -> f64 {
    1.0 + ((roof_height - BASELINE_ROOF_HEIGHT) * HEIGHT_SURCHARGE_PER_METER).max(0.0)
}

#[inline]
pub fn tile_factor(tile_size: f64) -> f64 {
    if tile_size < BASELINE_TILE_SIZE {
        1.0 + (BASELINE_TILE_SIZE - tile_size)
    } else {
        1.0
    }
}

/// Relative tolerance under which a tile quotient counts as a whole number
const TILE_FIT_EPSILON: f64 = 1e-9;

/// `ceil(net_area / tile_size²)`, 0 for a non-positive tile size.
///
/// Quotients within rounding noise of a whole number are snapped first, so an
/// exact fit is not charged an extra tile.
pub fn tile_count(net_area: f64, tile_size: f64) -> u64 {
    if tile_size.is_nan() || tile_size <= 0.0 || !net_area.is_finite() {
        return 0;
    }
    let quotient = net_area / (tile_size * tile_size);
    let whole = quotient.round();
    if (quotient - whole).abs() <= TILE_FIT_EPSILON * whole.max(1.0) {
        whole as u64
    } else {
        quotient.ceil() as u64
    }
}

/// Full estimate from raw inputs
pub fn calculate_estimate(
    points: &[Vertex2D],
    obstacles: &[Obstacle],
    base_rate: f64,
    roof_height: f64,
    tile_size: f64,
) -> Estimate {
    let footprint_area = footprint_area(points);
    let obstacles_area = obstacles_area(obstacles);
    let net_area = (footprint_area - obstacles_area).max(0.0);

    let height_factor = height_factor(roof_height);
    let tile_factor = tile_factor(tile_size);
    let effective_rate = base_rate * height_factor * tile_factor;

    Estimate {
        footprint_area,
        obstacles_area,
        net_area,
        height_factor,
        tile_factor,
        effective_rate,
        total_cost: net_area * effective_rate,
        tile_count: tile_count(net_area, tile_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Vec<Vertex2D> {
        vec![
            Vertex2D::new(0.0, 0.0),
            Vertex2D::new(size, 0.0),
            Vertex2D::new(size, size),
            Vertex2D::new(0.0, size),
        ]
    }

    #[test]
    fn test_unit_square() {
        assert_relative_eq!(footprint_area(&square(1.0)), 1.0);
    }

    #[test]
    fn test_two_vertices_have_no_area() {
        assert_eq!(footprint_area(&square(1.0)[..2]), 0.0);
    }

    #[test]
    fn test_default_rate_has_no_surcharge() {
        let e = calculate_estimate(&square(10.0), &[], 50.0, 3.0, 0.5);
        assert_relative_eq!(e.footprint_area, 100.0);
        assert_eq!(e.height_factor, 1.0);
        assert_eq!(e.tile_factor, 1.0);
        assert_relative_eq!(e.effective_rate, 50.0);
        assert_relative_eq!(e.total_cost, 5000.0);
        assert_eq!(e.tile_count, 400);
    }

    #[test]
    fn test_obstacles_reduce_net_area() {
        let obstacles = [
            Obstacle::new("a", 2.0, 2.0, 1.0, 2.0),
            Obstacle::new("b", 6.0, 6.0, 1.5, 1.0),
        ];
        let e = calculate_estimate(&square(10.0), &obstacles, 50.0, 3.0, 0.5);
        assert_relative_eq!(e.obstacles_area, 3.5);
        assert_relative_eq!(e.net_area, 96.5);
    }

    #[test]
    fn test_net_area_floor() {
        let huge = [Obstacle::new("a", 0.5, 0.5, 10.0, 10.0)];
        let e = calculate_estimate(&square(1.0), &huge, 50.0, 3.0, 0.5);
        assert_eq!(e.net_area, 0.0);
        assert_eq!(e.total_cost, 0.0);
        assert_eq!(e.tile_count, 0);
    }

    #[test]
    fn test_surcharges() {
        assert_relative_eq!(height_factor(5.0), 1.2);
        assert_eq!(height_factor(2.0), 1.0);
        assert_relative_eq!(tile_factor(0.25), 1.25);
        assert_eq!(tile_factor(0.8), 1.0);

        let e = calculate_estimate(&square(2.0), &[], 50.0, 5.0, 0.25);
        assert_relative_eq!(e.effective_rate, 50.0 * 1.2 * 1.25);
    }

    #[test]
    fn test_tile_count_rounds_up() {
        assert_eq!(tile_count(1.01, 0.5), 5);
        assert_eq!(tile_count(1.0, 0.0), 0);
        assert_eq!(tile_count(1.0, -1.0), 0);
    }

    #[test]
    fn test_exact_tile_fit_is_not_overcounted() {
        let rect = |w: f64, h: f64| {
            vec![
                Vertex2D::new(0.0, 0.0),
                Vertex2D::new(w, 0.0),
                Vertex2D::new(w, h),
                Vertex2D::new(0.0, h),
            ]
        };
        let e = calculate_estimate(&rect(2.4, 3.6), &[], 50.0, 3.0, 0.3);
        assert_eq!(e.tile_count, 96);

        let e = calculate_estimate(&rect(0.3, 0.9), &[], 50.0, 3.0, 0.3);
        assert_eq!(e.tile_count, 3);

        // A sliver beyond a whole fit still needs one more tile
        let e = calculate_estimate(&rect(2.4, 3.61), &[], 50.0, 3.0, 0.3);
        assert_eq!(e.tile_count, 97);
    }

    #[test]
    fn test_serializes_camel_case() {
        let e = calculate_estimate(&square(1.0), &[], 50.0, 3.0, 0.5);
        let json = serde_json::to_value(e).unwrap();
        assert!(json.get("footprintArea").is_some());
        assert!(json.get("effectiveRate").is_some());
        assert_eq!(json["tileCount"], 4);
    }
}
