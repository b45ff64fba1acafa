// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF export and import over a whole project.

use roofline_core::{read_dxf, write_dxf, ImportedPlan, ProjectState, Result};
use roofline_geometry::build_roof;

/// Serialize the project as DXF, including the retained roof triangles as
/// `3DFACE` entities on the mesh layer.
pub fn export_dxf(state: &ProjectState) -> String {
    let config = &state.config;
    let faces = build_roof(
        &state.points,
        &state.drains,
        config.roof_height,
        config.drain_height,
    )
    .map(|roof| roof.faces())
    .unwrap_or_default();

    tracing::debug!(
        points = state.points.len(),
        obstacles = state.obstacles.len(),
        drains = state.drains.len(),
        faces = faces.len(),
        "Exporting DXF"
    );

    write_dxf(&state.points, &state.obstacles, &state.drains, &faces)
}

/// Read a DXF document into a plan without touching any project.
///
/// Parse failures and empty results are both logged; callers that only need
/// the "import failed" outcome can check [`roofline_core::Error::is_import_failure`].
pub fn import_dxf(content: &str) -> Result<ImportedPlan> {
    read_dxf(content).map_err(|e| {
        tracing::warn!(error = %e, content_size = content.len(), "DXF import failed");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use roofline_core::{Drain, Error, Vertex2D};

    fn square_project() -> ProjectState {
        let mut state = ProjectState::default();
        state.set_points(vec![
            Vertex2D::new(0.0, 0.0),
            Vertex2D::new(4.0, 0.0),
            Vertex2D::new(4.0, 4.0),
            Vertex2D::new(0.0, 4.0),
        ]);
        state.add_drain(Drain::new("d1", 2.0, 2.0));
        state
    }

    #[test]
    fn test_export_contains_mesh_faces() {
        let dxf = export_dxf(&square_project());
        assert_eq!(dxf.matches("\n3DFACE\n").count(), 4);
        assert_eq!(dxf.matches("\nLWPOLYLINE\n").count(), 1);
        assert_eq!(dxf.matches("\nCIRCLE\n").count(), 1);
        assert!(dxf.ends_with("EOF\n"));
    }

    #[test]
    fn test_export_empty_project() {
        let dxf = export_dxf(&ProjectState::default());
        assert!(!dxf.contains("3DFACE"));
        assert!(!dxf.contains("LWPOLYLINE"));
        assert!(dxf.contains("ENTITIES"));
    }

    #[test]
    fn test_import_rejects_empty_document() {
        let empty = "0\nSECTION\n2\nENTITIES\n0\nENDSEC\n0\nEOF\n";
        let err = import_dxf(empty).unwrap_err();
        assert!(matches!(err, Error::ImportRejected));
        assert!(err.is_import_failure());
    }

    #[test]
    fn test_import_ignores_mesh_faces() {
        let plan = import_dxf(&export_dxf(&square_project())).unwrap();
        assert_eq!(plan.points.len(), 4);
        assert!(plan.obstacles.is_empty());
        assert_eq!(plan.drains.len(), 1);
    }
}
