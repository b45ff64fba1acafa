// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Footprint model: roof outline, obstacles and drains in plan space (meters)

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// A plan-space point
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Vertex2D {
    pub x: f64,
    pub y: f64,
}

impl Vertex2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Axis-aligned roof penetration (chimney, skylight, vent housing...)
///
/// `(x, y)` is the center; `width` spans X and `height` spans Y.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Obstacle {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Obstacle {
    pub fn new(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Plan area covered by the obstacle
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Corners in counter-clockwise order, starting bottom-left
    pub fn corners(&self) -> [Vertex2D; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [
            Vertex2D::new(self.x - hw, self.y - hh),
            Vertex2D::new(self.x + hw, self.y - hh),
            Vertex2D::new(self.x + hw, self.y + hh),
            Vertex2D::new(self.x - hw, self.y + hh),
        ]
    }

    /// Apply a partial update; unset fields keep their value
    pub fn apply(&mut self, update: &ObstacleUpdate) {
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
    }
}

/// Partial edit of an obstacle's position or size
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ObstacleUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ObstacleUpdate {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }
}

/// Interior drainage point. Its elevation is the shared `drain_height`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drain {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

impl Drain {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Vertex2D {
        Vertex2D::new(self.x, self.y)
    }
}

/// Axis-aligned plan bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Bounds2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds2D {
    /// Bounds of a point set, `None` when empty
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vertex2D>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Bounds2D {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(iter.fold(init, |b, p| Bounds2D {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Vertex2D {
        Vertex2D::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }
}
