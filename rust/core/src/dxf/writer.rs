// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF export
//!
//! Entities: LWPOLYLINE (footprint, obstacles), CIRCLE (drains),
//! 3DFACE (lifted roof triangles).

use std::fmt::Display;

use nalgebra::Point3;

use crate::dxf::{
    DRAIN_RADIUS, LAYERS, LAYER_DRAINS, LAYER_OBSTACLES, LAYER_ROOF_BORDER, LAYER_ROOF_MESH,
};
use crate::footprint::{Drain, Obstacle, Vertex2D};

/// Incremental ASCII DXF builder
#[derive(Debug, Default)]
pub struct DxfWriter {
    out: String,
}

impl DxfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one group pair
    #[inline]
    pub fn pair(&mut self, code: i32, value: impl Display) -> &mut Self {
        self.out.push_str(&format!("{}\n{}\n", code, value));
        self
    }

    pub fn begin_section(&mut self, name: &str) -> &mut Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(&mut self) -> &mut Self {
        self.pair(0, "ENDSEC")
    }

    /// TABLES section with the fixed layer table
    pub fn layer_table(&mut self) -> &mut Self {
        self.begin_section("TABLES");
        self.pair(0, "TABLE").pair(2, "LAYER");
        for (name, color) in LAYERS {
            self.pair(0, "LAYER")
                .pair(2, name)
                .pair(70, 0)
                .pair(62, color)
                .pair(6, "CONTINUOUS");
        }
        self.pair(0, "ENDTAB");
        self.end_section()
    }

    /// Closed lightweight polyline
    pub fn closed_polyline(&mut self, layer: &str, points: &[Vertex2D]) -> &mut Self {
        self.pair(0, "LWPOLYLINE")
            .pair(8, layer)
            .pair(90, points.len())
            .pair(70, 1);
        for p in points {
            self.pair(10, p.x).pair(20, p.y);
        }
        self
    }

    pub fn circle(&mut self, layer: &str, center: Vertex2D, radius: f64) -> &mut Self {
        self.pair(0, "CIRCLE")
            .pair(8, layer)
            .pair(10, center.x)
            .pair(20, center.y)
            .pair(40, radius)
    }

    /// Triangle written as a 3DFACE whose fourth corner repeats the third.
    ///
    /// Input corners are Y-up `(plan x, elevation, plan y)`; they are written
    /// Z-up `(plan x, plan y, elevation)`.
    pub fn triangle_face(&mut self, layer: &str, corners: &[Point3<f64>; 3]) -> &mut Self {
        self.pair(0, "3DFACE").pair(8, layer);
        let quad = [corners[0], corners[1], corners[2], corners[2]];
        for (i, p) in quad.iter().enumerate() {
            let offset = i as i32;
            self.pair(10 + offset, p.x)
                .pair(20 + offset, p.z)
                .pair(30 + offset, p.y);
        }
        self
    }

    pub fn finish(mut self) -> String {
        self.pair(0, "EOF");
        self.out
    }
}

/// Write a complete project document.
///
/// `faces` are the retained roof triangles in Y-up mesh coordinates.
pub fn write_dxf(
    points: &[Vertex2D],
    obstacles: &[Obstacle],
    drains: &[Drain],
    faces: &[[Point3<f64>; 3]],
) -> String {
    let mut w = DxfWriter::new();

    w.begin_section("HEADER").end_section();
    w.layer_table();

    w.begin_section("ENTITIES");
    if !points.is_empty() {
        w.closed_polyline(LAYER_ROOF_BORDER, points);
    }
    for obstacle in obstacles {
        w.closed_polyline(LAYER_OBSTACLES, &obstacle.corners());
    }
    for drain in drains {
        w.circle(LAYER_DRAINS, drain.position(), DRAIN_RADIUS);
    }
    for face in faces {
        w.triangle_face(LAYER_ROOF_MESH, face);
    }
    w.end_section();

    w.finish()
}
