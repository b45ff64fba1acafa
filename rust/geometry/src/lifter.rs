// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Height lifting of the roof triangulation
//!
//! Footprint vertices sit at `roof_height`, drain vertices at `drain_height`.
//! The output mesh is non-indexed: each triangle owns three vertices carrying
//! its flat face normal, with the plan coordinates as UVs.

use nalgebra::{Point2, Point3, Vector3};

use crate::mesh::Mesh;
use crate::triangulation::RoofTriangulation;

/// Lifted roof surface
#[derive(Debug, Clone)]
pub struct RoofSurface {
    /// Non-indexed render mesh, 3 vertices per retained triangle
    pub mesh: Mesh,
    /// Unit face normal per retained triangle
    pub face_normals: Vec<Vector3<f64>>,
    /// Source triangulation (plan points and retained triangles)
    pub triangulation: RoofTriangulation,
    pub roof_height: f64,
    pub drain_height: f64,
}

impl RoofSurface {
    /// Elevation of combined vertex `i`
    #[inline]
    pub fn elevation(&self, i: usize) -> f64 {
        vertex_elevation(&self.triangulation, i, self.roof_height, self.drain_height)
    }

    /// Y-up 3D position of combined vertex `i`
    #[inline]
    pub fn position(&self, i: usize) -> Point3<f64> {
        let p = self.triangulation.points[i];
        Point3::new(p.x, self.elevation(i), p.y)
    }

    /// Retained triangles as Y-up f64 corners, in triangulation order
    pub fn faces(&self) -> Vec<[Point3<f64>; 3]> {
        self.triangulation
            .triangles
            .iter()
            .map(|t| [self.position(t[0]), self.position(t[1]), self.position(t[2])])
            .collect()
    }

    pub fn triangle_count(&self) -> usize {
        self.face_normals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.face_normals.is_empty()
    }
}

#[inline]
fn vertex_elevation(tri: &RoofTriangulation, i: usize, roof_height: f64, drain_height: f64) -> f64 {
    if tri.is_footprint_vertex(i) {
        roof_height
    } else {
        drain_height
    }
}

/// Unit normal of a Y-up triangle; degenerate triangles get straight up
#[inline]
pub fn face_normal(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Vector3<f64> {
    (p1 - p0)
        .cross(&(p2 - p0))
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::y)
}

/// Lift a triangulation into a 3D roof surface
pub fn lift_roof(triangulation: RoofTriangulation, roof_height: f64, drain_height: f64) -> RoofSurface {
    let count = triangulation.triangles.len();
    let mut mesh = Mesh::with_capacity(count * 3, 0);
    let mut face_normals = Vec::with_capacity(count);

    for tri in &triangulation.triangles {
        let corners: [Point3<f64>; 3] = tri.map(|i| {
            let p = triangulation.points[i];
            let h = vertex_elevation(&triangulation, i, roof_height, drain_height);
            Point3::new(p.x, h, p.y)
        });

        let normal = face_normal(&corners[0], &corners[1], &corners[2]);
        face_normals.push(normal);

        for corner in corners {
            mesh.add_vertex(corner, normal, Point2::new(corner.x, corner.z));
        }
    }

    RoofSurface {
        mesh,
        face_normals,
        triangulation,
        roof_height,
        drain_height,
    }
}
