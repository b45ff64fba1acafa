// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof configuration shared by geometry generation and estimation.

use serde::{Deserialize, Serialize};

/// Roof configuration.
///
/// Serialized in camelCase so project files written by the web editor load
/// as-is. Missing fields fall back to [`RoofConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoofConfig {
    /// Elevation of every footprint vertex (eave height), in meters.
    pub roof_height: f64,
    /// Elevation shared by all drain vertices, in meters.
    pub drain_height: f64,
    /// Edge length of one roof tile, in meters.
    pub tile_size: f64,
    /// Perimeter wall thickness, in meters.
    pub wall_thickness: f64,
    /// Base material rate per square meter of tiled area.
    pub material_cost_per_sq_meter: f64,
}

impl RoofConfig {
    /// Base material rate used by the estimation engine.
    #[inline]
    pub fn base_rate(&self) -> f64 {
        self.material_cost_per_sq_meter
    }
}

impl Default for RoofConfig {
    fn default() -> Self {
        Self {
            roof_height: 3.0,
            drain_height: 2.5,
            tile_size: 0.5,
            wall_thickness: 0.2,
            material_cost_per_sq_meter: 50.0,
        }
    }
}
