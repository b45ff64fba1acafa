// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perimeter wall extrusion
//!
//! The footprint ring is offset inwards by the wall thickness using mitered
//! corners, then every footprint edge gets four quads between elevation 0 and
//! the roof height: outer face, inner face, top rim and bottom cap.

use nalgebra::{Point2, Point3, Vector2};
use roofline_core::Vertex2D;

use crate::mesh::Mesh;
use crate::polygon::{orientation, Orientation};

/// Bisector length under which two adjacent edge normals count as opposite
const BISECTOR_EPSILON: f64 = 1e-3;

/// Edge length under which an edge has no usable direction
const EDGE_EPSILON: f64 = 1e-10;

/// Quads emitted per footprint edge
pub const QUADS_PER_EDGE: usize = 4;

/// Unit inward normal of edge `a -> b`, `None` for a zero-length edge
#[inline]
fn inward_normal(a: &Point2<f64>, b: &Point2<f64>, clockwise: bool) -> Option<Vector2<f64>> {
    let dir = (b - a).try_normalize(EDGE_EPSILON)?;
    // Interior lies left of a counter-clockwise ring, right of a clockwise one
    Some(if clockwise {
        Vector2::new(dir.y, -dir.x)
    } else {
        Vector2::new(-dir.y, dir.x)
    })
}

/// Mitered inward offset of a closed ring, one inner point per input vertex
/// and in input order.
///
/// Orientation is detected from the signed area; zero-area rings are treated as
/// counter-clockwise. Zero-length edges contribute no normal: a vertex with a
/// single valid neighbouring normal is offset along it, one with none stays put.
pub fn offset_polygon_inward(ring: &[Point2<f64>], thickness: f64) -> Vec<Point2<f64>> {
    let n = ring.len();
    if n < 3 {
        return ring.to_vec();
    }

    let clockwise = orientation(ring) == Orientation::Clockwise;
    let normals: Vec<Option<Vector2<f64>>> = (0..n)
        .map(|i| inward_normal(&ring[i], &ring[(i + 1) % n], clockwise))
        .collect();

    let degenerate_edges = normals.iter().filter(|n| n.is_none()).count();
    if degenerate_edges > 0 {
        tracing::debug!(degenerate_edges, "Footprint has zero-length wall edges");
    }

    (0..n)
        .map(|i| {
            let p = ring[i];
            let prev = normals[(i + n - 1) % n];
            let next = normals[i];

            match (prev, next) {
                (Some(n1), Some(n2)) => {
                    let bisector = n1 + n2;
                    let len = bisector.norm();
                    if len < BISECTOR_EPSILON {
                        // Edges fold back on themselves
                        return p + n1 * thickness;
                    }
                    let dir = bisector / len;
                    let miter = thickness / n1.dot(&dir);
                    p + dir * miter
                }
                (Some(n1), None) | (None, Some(n1)) => p + n1 * thickness,
                (None, None) => p,
            }
        })
        .collect()
}

/// Extrude perimeter walls from a footprint.
///
/// Returns `None` for fewer than 3 vertices. Otherwise the indexed mesh holds
/// exactly `4 * N` quads (`8 * N` triangles), even for a zero thickness where
/// the inner ring coincides with the outer one.
pub fn extrude_walls(footprint: &[Vertex2D], height: f64, thickness: f64) -> Option<Mesh> {
    if footprint.len() < 3 {
        tracing::debug!(vertices = footprint.len(), "Footprint too small for walls");
        return None;
    }

    // Clockwise emission keeps outer faces and the top rim facing outwards/up
    let mut ring: Vec<Point2<f64>> = footprint.iter().map(Vertex2D::to_nalgebra).collect();
    if orientation(&ring) != Orientation::Clockwise {
        ring.reverse();
    }
    let inner = offset_polygon_inward(&ring, thickness);

    let n = ring.len();
    let mut mesh = Mesh::with_capacity(n * QUADS_PER_EDGE * 4, n * QUADS_PER_EDGE * 6);

    let at = |p: &Point2<f64>, h: f64| Point3::new(p.x, h, p.y);

    for i in 0..n {
        let j = (i + 1) % n;
        let (p1, p2) = (&ring[i], &ring[j]);
        let (ip1, ip2) = (&inner[i], &inner[j]);

        // Outer face
        mesh.add_quad([at(p1, 0.0), at(p2, 0.0), at(p2, height), at(p1, height)]);
        // Inner face, reversed winding
        mesh.add_quad([at(ip2, 0.0), at(ip1, 0.0), at(ip1, height), at(ip2, height)]);
        // Top rim
        mesh.add_quad([at(p1, height), at(p2, height), at(ip2, height), at(ip1, height)]);
        // Bottom cap, reversed winding
        mesh.add_quad([at(p1, 0.0), at(ip1, 0.0), at(ip2, 0.0), at(p2, 0.0)]);
    }

    tracing::debug!(
        edges = n,
        triangles = mesh.triangle_count(),
        "Extruded perimeter walls"
    );

    Some(mesh)
}
