// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Invoice summary data handed to the document renderer.

use roofline_core::{ProjectState, Result};
use serde::{Deserialize, Serialize};

use crate::estimate::Estimate;

/// Project figures shown on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    /// Gross footprint area (m²)
    pub total_area: f64,
    pub roof_height: f64,
    pub tile_size: f64,
    pub wall_thickness: f64,
    pub material_cost_per_sq_meter: f64,
    pub tile_count: u64,
    pub total_cost: f64,
}

impl InvoiceSummary {
    pub fn from_project(state: &ProjectState) -> Self {
        let estimate = Estimate::from_project(state);
        let config = &state.config;
        Self {
            total_area: estimate.footprint_area,
            roof_height: config.roof_height,
            tile_size: config.tile_size,
            wall_thickness: config.wall_thickness,
            material_cost_per_sq_meter: config.material_cost_per_sq_meter,
            tile_count: estimate.tile_count,
            total_cost: estimate.total_cost,
        }
    }

    /// Description/value rows, in display order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Roof Area", format!("{:.2} m²", self.total_area)),
            ("Roof Height", format!("{} m", self.roof_height)),
            ("Tile Size", format!("{} m", self.tile_size)),
            ("Wall Thickness", format!("{} m", self.wall_thickness)),
            (
                "Material Cost",
                format!("${} / m²", self.material_cost_per_sq_meter),
            ),
            ("Tiles Needed", self.tile_count.to_string()),
        ]
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofline_core::{Obstacle, Vertex2D};

    fn project() -> ProjectState {
        let mut state = ProjectState::default();
        state.set_points(vec![
            Vertex2D::new(0.0, 0.0),
            Vertex2D::new(10.0, 0.0),
            Vertex2D::new(10.0, 5.0),
            Vertex2D::new(0.0, 5.0),
        ]);
        state.add_obstacle(Obstacle::new("chimney", 2.0, 2.0, 1.0, 1.0));
        state
    }

    #[test]
    fn test_summary_figures() {
        let summary = InvoiceSummary::from_project(&project());
        assert_eq!(summary.total_area, 50.0);
        assert_eq!(summary.tile_count, 196);
        assert_eq!(summary.total_cost, 49.0 * 50.0);
    }

    #[test]
    fn test_rows() {
        let rows = InvoiceSummary::from_project(&project()).rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], ("Total Roof Area", "50.00 m²".to_string()));
        assert_eq!(rows[1], ("Roof Height", "3 m".to_string()));
        assert_eq!(rows[4], ("Material Cost", "$50 / m²".to_string()));
        assert_eq!(rows[5], ("Tiles Needed", "196".to_string()));
    }

    #[test]
    fn test_json_is_camel_case() {
        let json = InvoiceSummary::from_project(&project()).to_json().unwrap();
        assert!(json.contains("\"totalArea\": 50.0"));
        assert!(json.contains("\"materialCostPerSqMeter\""));
    }
}
