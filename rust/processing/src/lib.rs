// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roofline processing
//!
//! Shared pipeline used by the interactive surface and the document layer:
//! recompute the roof model from a [`ProjectState`](roofline_core::ProjectState),
//! estimate material cost, and move projects in and out of DXF.

pub mod estimate;
pub mod interchange;
pub mod invoice;
pub mod pipeline;

pub use estimate::{calculate_estimate, footprint_area, obstacles_area, Estimate};
pub use interchange::{export_dxf, import_dxf};
pub use invoice::InvoiceSummary;
pub use pipeline::{process_project, RoofModel, RoofStats, MAX_RIDGE_UNIFORMS};
