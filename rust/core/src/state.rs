// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Caller-owned project state
//!
//! Holds everything the geometry and estimation functions read: the footprint
//! ring, obstacles, drains and the [`RoofConfig`]. Edits are plain method calls;
//! recomputation is left to the caller.

use serde::{Deserialize, Serialize};

use crate::config::RoofConfig;
use crate::dxf::{read_dxf, ImportedPlan};
use crate::error::{Error, Result};
use crate::footprint::{Drain, Obstacle, ObstacleUpdate, Vertex2D};

/// A complete roof project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectState {
    /// Ordered footprint ring (last vertex connects back to the first)
    pub points: Vec<Vertex2D>,
    pub obstacles: Vec<Obstacle>,
    pub drains: Vec<Drain>,
    #[serde(flatten)]
    pub config: RoofConfig,
}

impl ProjectState {
    pub fn new(config: RoofConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Load a project from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the project to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_point(&mut self, point: Vertex2D) {
        self.points.push(point);
    }

    /// Move a footprint vertex. Returns `false` if `index` is out of range.
    pub fn update_point(&mut self, index: usize, x: f64, y: f64) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.x = x;
                point.y = y;
                true
            }
            None => false,
        }
    }

    pub fn set_points(&mut self, points: Vec<Vertex2D>) {
        self.points = points;
    }

    pub fn add_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn update_obstacle(&mut self, id: &str, update: &ObstacleUpdate) -> Result<()> {
        let obstacle = self
            .obstacles
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| Error::UnknownObstacle(id.to_string()))?;
        obstacle.apply(update);
        Ok(())
    }

    pub fn remove_obstacle(&mut self, id: &str) -> Result<Obstacle> {
        let pos = self
            .obstacles
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| Error::UnknownObstacle(id.to_string()))?;
        Ok(self.obstacles.remove(pos))
    }

    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    pub fn add_drain(&mut self, drain: Drain) {
        self.drains.push(drain);
    }

    pub fn remove_drain(&mut self, id: &str) -> Result<Drain> {
        let pos = self
            .drains
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| Error::UnknownDrain(id.to_string()))?;
        Ok(self.drains.remove(pos))
    }

    pub fn set_drains(&mut self, drains: Vec<Drain>) {
        self.drains = drains;
    }

    /// Clear footprint, obstacles and drains. Configuration is kept.
    pub fn reset(&mut self) {
        self.points.clear();
        self.obstacles.clear();
        self.drains.clear();
    }

    /// Replace footprint, obstacles and drains with an imported plan
    pub fn apply_import(&mut self, plan: ImportedPlan) {
        self.points = plan.points;
        self.obstacles = plan.obstacles;
        self.drains = plan.drains;
    }

    /// Import a DXF document into this project.
    ///
    /// On any failure the project is left exactly as it was.
    pub fn import_dxf(&mut self, content: &str) -> Result<()> {
        match read_dxf(content) {
            Ok(plan) => {
                tracing::info!(
                    points = plan.points.len(),
                    obstacles = plan.obstacles.len(),
                    drains = plan.drains.len(),
                    "Imported DXF plan"
                );
                self.apply_import(plan);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "DXF import failed, keeping current project");
                Err(e)
            }
        }
    }
}
