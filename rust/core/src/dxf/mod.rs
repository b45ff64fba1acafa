// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ASCII DXF interchange
//!
//! The writer emits a minimal, section-ordered document (HEADER, TABLES with
//! four layers, ENTITIES). The reader is a heuristic importer: the polyline
//! with the largest bounding box becomes the footprint, every other polyline
//! becomes an obstacle and every circle a drain.

pub mod reader;
pub mod tokenizer;
pub mod writer;

pub use reader::{read_dxf, ImportedPlan};
pub use tokenizer::{tokenize, GroupPair};
pub use writer::{write_dxf, DxfWriter};

/// Layer holding the footprint polyline
pub const LAYER_ROOF_BORDER: &str = "ROOF_BORDER";
/// Layer holding obstacle rectangles
pub const LAYER_OBSTACLES: &str = "OBSTACLES";
/// Layer holding drain circles
pub const LAYER_DRAINS: &str = "DRAINS";
/// Layer holding the lifted roof faces
pub const LAYER_ROOF_MESH: &str = "ROOF_MESH";

/// Layer table as written: (name, ACI color)
pub const LAYERS: [(&str, i32); 4] = [
    (LAYER_ROOF_BORDER, 5),
    (LAYER_OBSTACLES, 1),
    (LAYER_DRAINS, 3),
    (LAYER_ROOF_MESH, 7),
];

/// Radius of exported drain circles (discarded on import)
pub const DRAIN_RADIUS: f64 = 0.15;
