// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full roof recomputation for one project state.

use roofline_core::ProjectState;
use roofline_geometry::{build_roof, extract_ridges, extrude_walls, Mesh, RidgeSegment, RoofSurface};
use serde::{Deserialize, Serialize};

use crate::estimate::Estimate;

/// Ridge segments the renderer accepts as shader uniforms
pub const MAX_RIDGE_UNIFORMS: usize = 200;

/// Everything the rendering and UI layers need after an edit.
#[derive(Debug, Clone)]
pub struct RoofModel {
    /// Lifted roof, `None` when the footprint has fewer than 3 vertices
    pub roof: Option<RoofSurface>,
    /// Fold lines in plan space, uncapped
    pub ridges: Vec<RidgeSegment>,
    /// Perimeter walls, `None` when the footprint has fewer than 3 vertices
    pub walls: Option<Mesh>,
    pub estimate: Estimate,
    pub stats: RoofStats,
}

/// Output sizes of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoofStats {
    /// Retained roof triangles.
    pub roof_triangles: usize,
    /// Detected ridge/valley segments.
    pub ridges: usize,
    /// Wall triangles (8 per footprint edge).
    pub wall_triangles: usize,
}

impl RoofModel {
    /// Whether there is any roof geometry to render
    pub fn has_roof(&self) -> bool {
        self.roof.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Pack ridge segments as `[x1, y1, x2, y2]` for a fixed-size uniform array.
    ///
    /// Segments past `max` are dropped.
    pub fn ridge_uniforms(&self, max: usize) -> Vec<[f32; 4]> {
        self.ridges
            .iter()
            .take(max)
            .map(|r| {
                [
                    r.start.x as f32,
                    r.start.y as f32,
                    r.end.x as f32,
                    r.end.y as f32,
                ]
            })
            .collect()
    }
}

/// Recompute roof, ridges, walls and estimate from the current state.
///
/// Pure: the state is only read, and every output buffer is freshly allocated.
pub fn process_project(state: &ProjectState) -> RoofModel {
    let start = std::time::Instant::now();
    let config = &state.config;

    tracing::debug!(
        points = state.points.len(),
        obstacles = state.obstacles.len(),
        drains = state.drains.len(),
        "Starting roof processing"
    );

    let roof = build_roof(
        &state.points,
        &state.drains,
        config.roof_height,
        config.drain_height,
    );
    let ridges = roof.as_ref().map(extract_ridges).unwrap_or_default();
    let walls = extrude_walls(&state.points, config.roof_height, config.wall_thickness);
    let estimate = Estimate::from_project(state);

    if let Some(r) = roof.as_ref().filter(|r| r.is_empty()) {
        tracing::debug!(
            points = r.triangulation.footprint_len,
            "Footprint produced no roof triangles"
        );
    }

    let stats = RoofStats {
        roof_triangles: roof.as_ref().map_or(0, RoofSurface::triangle_count),
        ridges: ridges.len(),
        wall_triangles: walls.as_ref().map_or(0, Mesh::triangle_count),
    };

    tracing::debug!(
        roof_triangles = stats.roof_triangles,
        ridges = stats.ridges,
        wall_triangles = stats.wall_triangles,
        net_area = estimate.net_area,
        total_time_us = start.elapsed().as_micros() as u64,
        "Roof processing complete"
    );

    RoofModel {
        roof,
        ridges,
        walls,
        estimate,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofline_core::{Drain, Obstacle, Vertex2D};

    fn project() -> ProjectState {
        let mut state = ProjectState::default();
        state.set_points(vec![
            Vertex2D::new(0.0, 0.0),
            Vertex2D::new(4.0, 0.0),
            Vertex2D::new(4.0, 4.0),
            Vertex2D::new(0.0, 4.0),
        ]);
        state.add_drain(Drain::new("d1", 2.0, 2.0));
        state.add_obstacle(Obstacle::new("o1", 1.0, 1.0, 0.5, 0.5));
        state
    }

    #[test]
    fn test_full_pipeline() {
        let model = process_project(&project());
        assert!(model.has_roof());
        assert_eq!(model.stats.roof_triangles, 4);
        assert_eq!(model.stats.ridges, 4);
        assert_eq!(model.stats.wall_triangles, 32);
        assert_eq!(model.estimate.net_area, 15.75);
    }

    #[test]
    fn test_insufficient_footprint() {
        let mut state = ProjectState::default();
        state.add_point(Vertex2D::new(0.0, 0.0));
        state.add_point(Vertex2D::new(1.0, 0.0));

        let model = process_project(&state);
        assert!(model.roof.is_none());
        assert!(model.walls.is_none());
        assert!(model.ridges.is_empty());
        assert!(!model.has_roof());
        assert_eq!(model.estimate.footprint_area, 0.0);
        assert_eq!(model.stats, RoofStats::default());
    }

    #[test]
    fn test_ridge_uniforms_are_capped() {
        let model = process_project(&project());
        assert_eq!(model.ridge_uniforms(MAX_RIDGE_UNIFORMS).len(), 4);
        assert_eq!(model.ridge_uniforms(2).len(), 2);

        let packed = model.ridge_uniforms(1)[0];
        let r = model.ridges[0];
        assert_eq!(packed, [r.start.x as f32, r.start.y as f32, r.end.x as f32, r.end.y as f32]);
    }

    #[test]
    fn test_input_state_is_not_mutated() {
        let state = project();
        let before = state.clone();
        let _ = process_project(&state);
        assert_eq!(state, before);
    }
}
