// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Export a project to DXF and read it back.
//!
//! Import rebuilds obstacles from their bounding boxes, so only centers and
//! counts are expected to survive exactly; the trip is lossy by design.

use approx::assert_relative_eq;
use roofline_core::{Bounds2D, Drain, Obstacle, ProjectState, Vertex2D};
use roofline_processing::{export_dxf, import_dxf};

fn square_project() -> ProjectState {
    let mut state = ProjectState::default();
    state.set_points(vec![
        Vertex2D::new(0.0, 0.0),
        Vertex2D::new(5.0, 0.0),
        Vertex2D::new(5.0, 5.0),
        Vertex2D::new(0.0, 5.0),
    ]);
    state.add_obstacle(Obstacle::new("o1", 2.5, 2.5, 1.0, 1.0));
    state.add_drain(Drain::new("d1", 2.5, 2.5));
    state
}

#[test]
fn test_square_round_trip() {
    let original = square_project();
    let plan = import_dxf(&export_dxf(&original)).expect("round trip should import");

    let before = Bounds2D::from_points(&original.points).unwrap();
    let after = Bounds2D::from_points(&plan.points).unwrap();
    assert_eq!(before, after);

    assert_eq!(plan.obstacles.len(), original.obstacles.len());
    assert_eq!(plan.drains.len(), original.drains.len());

    let obstacle = &plan.obstacles[0];
    assert_relative_eq!(obstacle.x, 2.5, epsilon = 1e-9);
    assert_relative_eq!(obstacle.y, 2.5, epsilon = 1e-9);
    assert_relative_eq!(obstacle.width, 1.0, epsilon = 1e-9);
    assert_relative_eq!(obstacle.height, 1.0, epsilon = 1e-9);

    let drain = &plan.drains[0];
    assert_relative_eq!(drain.x, 2.5, epsilon = 1e-9);
    assert_relative_eq!(drain.y, 2.5, epsilon = 1e-9);
}

#[test]
fn test_import_into_state_replaces_plan_keeps_config() {
    let mut state = ProjectState::default();
    state.config.roof_height = 4.5;
    state.add_point(Vertex2D::new(9.0, 9.0));

    state.import_dxf(&export_dxf(&square_project())).unwrap();

    assert_eq!(state.points.len(), 4);
    assert_eq!(state.obstacles.len(), 1);
    assert_eq!(state.drains.len(), 1);
    assert_eq!(state.config.roof_height, 4.5);
}

#[test]
fn test_failed_import_keeps_state() {
    let mut state = square_project();
    let before = state.clone();

    let err = state.import_dxf("0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n").unwrap_err();
    assert!(err.is_import_failure());

    let err = state.import_dxf("0\nSECTION\nnot-a-code\n").unwrap_err();
    assert!(err.is_import_failure());

    assert_eq!(state, before);
}
