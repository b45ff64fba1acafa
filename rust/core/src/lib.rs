// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Roofline Core
//!
//! Data model and interchange for the roof planner.
//!
//! ## Overview
//!
//! - **Footprint model**: the roof outline ring, obstacle rectangles and drain
//!   points, all in plan-space meters
//! - **Configuration**: roof/drain elevations, tile size, wall thickness and
//!   material rate ([`RoofConfig`])
//! - **Project state**: a caller-owned [`ProjectState`] with edit operations
//!   and JSON persistence
//! - **DXF interchange**: a nom-based group-pair tokenizer, a heuristic
//!   importer and a minimal section-ordered writer
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roofline_core::{ProjectState, Vertex2D, Drain};
//!
//! let mut state = ProjectState::default();
//! state.set_points(vec![
//!     Vertex2D::new(0.0, 0.0),
//!     Vertex2D::new(8.0, 0.0),
//!     Vertex2D::new(8.0, 6.0),
//!     Vertex2D::new(0.0, 6.0),
//! ]);
//! state.add_drain(Drain::new("d1", 4.0, 3.0));
//!
//! // Importing keeps the current project untouched on failure
//! if let Err(e) = state.import_dxf(&content) {
//!     eprintln!("import failed: {}", e);
//! }
//! ```

pub mod config;
pub mod dxf;
pub mod error;
pub mod footprint;
pub mod state;

pub use config::RoofConfig;
pub use dxf::{read_dxf, write_dxf, ImportedPlan};
pub use error::{Error, Result};
pub use footprint::{Bounds2D, Drain, Obstacle, ObstacleUpdate, Vertex2D};
pub use state::ProjectState;
