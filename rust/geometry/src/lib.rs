// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roofline Geometry
//!
//! Roof surface generation from a plan footprint: Delaunay triangulation
//! constrained to concave outlines, height lifting towards drains, ridge
//! detection and perimeter wall extrusion, using delaunator and nalgebra.

pub mod lifter;
pub mod mesh;
pub mod polygon;
pub mod ridges;
pub mod triangulation;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use lifter::{face_normal, lift_roof, RoofSurface};
pub use mesh::Mesh;
pub use polygon::{orientation, point_in_polygon, polygon_area, signed_area, Orientation};
pub use ridges::{
    extract_ridges, extract_ridges_with_threshold, EdgeAdjacency, RidgeSegment,
    RIDGE_DOT_THRESHOLD,
};
pub use triangulation::{triangulate_roof, RoofTriangulation};
pub use walls::{extrude_walls, offset_polygon_inward};

use roofline_core::{Drain, Vertex2D};

/// Triangulate and lift a roof in one step.
///
/// `None` when the footprint has fewer than 3 vertices.
pub fn build_roof(
    footprint: &[Vertex2D],
    drains: &[Drain],
    roof_height: f64,
    drain_height: f64,
) -> Option<RoofSurface> {
    triangulate_roof(footprint, drains).map(|t| lift_roof(t, roof_height, drain_height))
}
