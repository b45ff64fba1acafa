// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Constrained roof triangulation
//!
//! Delaunay over footprint vertices plus drain points, then filtered back to
//! the (possibly concave) footprint by a centroid-in-polygon test.

use nalgebra::Point2;
use roofline_core::{Drain, Vertex2D};

use crate::polygon::{point_in_polygon, triangle_centroid, triangle_cross};

/// Triangles retained inside the footprint
///
/// Index space: `0..footprint_len` are footprint vertices in ring order,
/// `footprint_len..points.len()` are drains in input order.
#[derive(Debug, Clone)]
pub struct RoofTriangulation {
    /// Combined plan points
    pub points: Vec<Point2<f64>>,
    /// Number of leading footprint vertices in `points`
    pub footprint_len: usize,
    /// Retained triangles, all wound clockwise in plan space
    pub triangles: Vec<[usize; 3]>,
}

impl RoofTriangulation {
    /// Whether combined index `i` refers to a footprint vertex
    #[inline]
    pub fn is_footprint_vertex(&self, i: usize) -> bool {
        i < self.footprint_len
    }

    /// Plan corners of a retained triangle
    #[inline]
    pub fn corners(&self, triangle: &[usize; 3]) -> [Point2<f64>; 3] {
        [
            self.points[triangle[0]],
            self.points[triangle[1]],
            self.points[triangle[2]],
        ]
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when every candidate triangle was degenerate or outside
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Triangulate a footprint together with its drain points.
///
/// Returns `None` when the footprint has fewer than 3 vertices. A collinear
/// or otherwise degenerate footprint yields `Some` with no triangles.
pub fn triangulate_roof(footprint: &[Vertex2D], drains: &[Drain]) -> Option<RoofTriangulation> {
    if footprint.len() < 3 {
        tracing::debug!(vertices = footprint.len(), "Footprint too small to triangulate");
        return None;
    }

    let ring: Vec<Point2<f64>> = footprint.iter().map(Vertex2D::to_nalgebra).collect();
    let mut points = ring.clone();
    points.extend(drains.iter().map(|d| Point2::new(d.x, d.y)));

    let coords: Vec<delaunator::Point> = points
        .iter()
        .map(|p| delaunator::Point { x: p.x, y: p.y })
        .collect();
    let delaunay = delaunator::triangulate(&coords);

    let candidates = delaunay.triangles.len() / 3;
    let mut triangles = Vec::with_capacity(candidates);

    for tri in delaunay.triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let centroid = triangle_centroid(&points[a], &points[b], &points[c]);

        // Delaunay covers the convex hull; drop what falls in concave notches
        if !point_in_polygon(&centroid, &ring) {
            continue;
        }

        // Canonical clockwise winding so lifted normals all face up
        if triangle_cross(&points[a], &points[b], &points[c]) > 0.0 {
            triangles.push([a, c, b]);
        } else {
            triangles.push([a, b, c]);
        }
    }

    tracing::debug!(
        footprint = footprint.len(),
        drains = drains.len(),
        candidates,
        retained = triangles.len(),
        "Triangulated roof"
    );

    Some(RoofTriangulation {
        points,
        footprint_len: footprint.len(),
        triangles,
    })
}
