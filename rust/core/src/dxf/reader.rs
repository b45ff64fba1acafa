// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DXF import
//!
//! Reconstruction is lossy: obstacles come back as the bounding box of their
//! polyline, drains lose their radius, and mesh faces are ignored.

use crate::dxf::tokenizer::{tokenize, GroupPair};
use crate::error::{Error, Result};
use crate::footprint::{Bounds2D, Drain, Obstacle, Vertex2D};

/// Footprint, obstacles and drains recovered from a DXF document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedPlan {
    pub points: Vec<Vertex2D>,
    pub obstacles: Vec<Obstacle>,
    pub drains: Vec<Drain>,
}

impl ImportedPlan {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.obstacles.is_empty() && self.drains.is_empty()
    }
}

/// Entity kinds the importer understands
#[derive(Debug, Clone, PartialEq)]
enum DxfEntity {
    Polyline(Vec<Vertex2D>),
    Circle(Vertex2D),
}

/// Raw entity: its type name and the pairs following the `0` marker
struct RawEntity<'a> {
    kind: &'a str,
    pairs: Vec<GroupPair<'a>>,
}

/// Parse a DXF document into an [`ImportedPlan`].
///
/// Returns [`Error::Parse`] for malformed content and
/// [`Error::ImportRejected`] when nothing usable was found.
pub fn read_dxf(content: &str) -> Result<ImportedPlan> {
    let pairs = tokenize(content)?;
    let raw = split_entities(&pairs);
    let entities = decode_entities(&raw)?;

    tracing::debug!(
        pairs = pairs.len(),
        raw_entities = raw.len(),
        usable = entities.len(),
        "Decoded DXF entities"
    );

    let plan = build_plan(entities);
    if plan.is_empty() {
        return Err(Error::ImportRejected);
    }
    Ok(plan)
}

/// Collect the entities of the ENTITIES section
fn split_entities<'a>(pairs: &[GroupPair<'a>]) -> Vec<RawEntity<'a>> {
    let mut entities: Vec<RawEntity<'a>> = Vec::new();
    let mut in_entities = false;
    let mut iter = pairs.iter().peekable();

    while let Some(pair) = iter.next() {
        if pair.is_marker("EOF") {
            break;
        }
        if pair.is_marker("SECTION") {
            in_entities = iter
                .next_if(|p| p.code == 2)
                .is_some_and(|name| name.value.eq_ignore_ascii_case("ENTITIES"));
            continue;
        }
        if pair.is_marker("ENDSEC") {
            in_entities = false;
            continue;
        }
        if !in_entities {
            continue;
        }

        if pair.code == 0 {
            entities.push(RawEntity {
                kind: pair.value,
                pairs: Vec::new(),
            });
        } else if let Some(current) = entities.last_mut() {
            current.pairs.push(*pair);
        }
    }

    entities
}

fn decode_entities(raw: &[RawEntity<'_>]) -> Result<Vec<DxfEntity>> {
    let mut entities = Vec::new();
    // Open legacy POLYLINE collecting VERTEX entities until SEQEND
    let mut open_polyline: Option<Vec<Vertex2D>> = None;

    for entity in raw {
        let kind = entity.kind.to_ascii_uppercase();

        if open_polyline.is_some() {
            if kind == "VERTEX" {
                let point = read_point(&entity.pairs, 10, 20)?;
                if let (Some(vertices), Some(v)) = (open_polyline.as_mut(), point) {
                    vertices.push(v);
                }
                continue;
            }
            // SEQEND, or a writer that forgot it
            if let Some(vertices) = open_polyline.take() {
                entities.push(DxfEntity::Polyline(vertices));
            }
            if kind == "SEQEND" {
                continue;
            }
        }

        match kind.as_str() {
            "LWPOLYLINE" => {
                entities.push(DxfEntity::Polyline(read_lwpolyline_vertices(&entity.pairs)?));
            }
            // Header coordinates of POLYLINE are a dummy point, skip them
            "POLYLINE" => open_polyline = Some(Vec::new()),
            "CIRCLE" => {
                if let Some(center) = read_point(&entity.pairs, 10, 20)? {
                    entities.push(DxfEntity::Circle(center));
                }
            }
            _ => {}
        }
    }

    if let Some(vertices) = open_polyline {
        entities.push(DxfEntity::Polyline(vertices));
    }

    Ok(entities)
}

/// LWPOLYLINE vertices: each code 10 opens a vertex, the following 20 completes it
fn read_lwpolyline_vertices(pairs: &[GroupPair<'_>]) -> Result<Vec<Vertex2D>> {
    let mut partial: Vec<(f64, Option<f64>)> = Vec::new();

    for pair in pairs {
        match pair.code {
            10 => partial.push((pair.as_f64()?, None)),
            20 => {
                if let Some(last) = partial.last_mut() {
                    last.1 = Some(pair.as_f64()?);
                }
            }
            _ => {}
        }
    }

    Ok(partial
        .into_iter()
        .filter_map(|(x, y)| y.map(|y| Vertex2D::new(x, y)))
        .collect())
}

/// First point given by an (x code, y code) pair, if both are present
fn read_point(pairs: &[GroupPair<'_>], x_code: i32, y_code: i32) -> Result<Option<Vertex2D>> {
    let mut x = None;
    let mut y = None;
    for pair in pairs {
        if pair.code == x_code && x.is_none() {
            x = Some(pair.as_f64()?);
        } else if pair.code == y_code && y.is_none() {
            y = Some(pair.as_f64()?);
        }
    }
    Ok(x.zip(y).map(|(x, y)| Vertex2D::new(x, y)))
}

fn build_plan(entities: Vec<DxfEntity>) -> ImportedPlan {
    let mut polylines: Vec<(Vec<Vertex2D>, Bounds2D)> = Vec::new();
    let mut drains = Vec::new();

    for entity in entities {
        match entity {
            DxfEntity::Polyline(vertices) => {
                if let Some(bounds) = Bounds2D::from_points(&vertices) {
                    polylines.push((vertices, bounds));
                }
            }
            DxfEntity::Circle(center) => {
                drains.push(Drain::new(
                    format!("drain-{}", drains.len() + 1),
                    center.x,
                    center.y,
                ));
            }
        }
    }

    // Largest bounding box wins; strict comparison keeps the earliest on ties
    let mut footprint_index = None;
    let mut max_area = f64::NEG_INFINITY;
    for (i, (_, bounds)) in polylines.iter().enumerate() {
        if bounds.area() > max_area {
            max_area = bounds.area();
            footprint_index = Some(i);
        }
    }

    let mut points = Vec::new();
    let mut obstacles = Vec::new();
    for (i, (vertices, bounds)) in polylines.into_iter().enumerate() {
        if Some(i) == footprint_index {
            points = vertices;
            continue;
        }
        let center = bounds.center();
        obstacles.push(Obstacle::new(
            format!("obstacle-{}", obstacles.len() + 1),
            center.x,
            center.y,
            non_degenerate(bounds.width()),
            non_degenerate(bounds.height()),
        ));
    }

    ImportedPlan {
        points,
        obstacles,
        drains,
    }
}

#[inline]
fn non_degenerate(extent: f64) -> f64 {
    if extent > 0.0 {
        extent
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entities(body: &str) -> String {
        format!("0\nSECTION\n2\nENTITIES\n{}0\nENDSEC\n0\nEOF\n", body)
    }

    fn lwpolyline(points: &[(f64, f64)]) -> String {
        let mut s = format!("0\nLWPOLYLINE\n8\n0\n90\n{}\n70\n1\n", points.len());
        for (x, y) in points {
            s.push_str(&format!("10\n{}\n20\n{}\n", x, y));
        }
        s
    }

    #[test]
    fn test_largest_polyline_is_footprint() {
        let body = format!(
            "{}{}",
            lwpolyline(&[(1.0, 1.0), (2.0, 1.0), (2.0, 3.0), (1.0, 3.0)]),
            lwpolyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 8.0), (0.0, 8.0)])
        );
        let plan = read_dxf(&entities(&body)).unwrap();

        assert_eq!(plan.points.len(), 4);
        assert_eq!(plan.points[2], Vertex2D::new(10.0, 8.0));
        assert_eq!(plan.obstacles.len(), 1);

        let obs = &plan.obstacles[0];
        assert_eq!(obs.id, "obstacle-1");
        assert_eq!((obs.x, obs.y, obs.width, obs.height), (1.5, 2.0, 1.0, 2.0));
    }

    #[test]
    fn test_bounding_box_tie_keeps_earliest() {
        let body = format!(
            "{}{}",
            lwpolyline(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]),
            lwpolyline(&[(5.0, 5.0), (7.0, 5.0), (7.0, 7.0), (5.0, 7.0)])
        );
        let plan = read_dxf(&entities(&body)).unwrap();
        assert_eq!(plan.points[0], Vertex2D::new(0.0, 0.0));
        assert_eq!(plan.obstacles[0].x, 6.0);
    }

    #[test]
    fn test_degenerate_obstacle_extent_defaults_to_one() {
        let body = format!(
            "{}{}",
            lwpolyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]),
            lwpolyline(&[(3.0, 4.0), (5.0, 4.0)])
        );
        let plan = read_dxf(&entities(&body)).unwrap();
        let obs = &plan.obstacles[0];
        assert_eq!((obs.width, obs.height), (2.0, 1.0));
        assert_eq!((obs.x, obs.y), (4.0, 4.0));
    }

    #[test]
    fn test_circles_become_drains() {
        let body = "0\nCIRCLE\n8\nDRAINS\n10\n2.5\n20\n3.5\n40\n0.15\n0\nCIRCLE\n10\n1\n20\n1\n";
        let plan = read_dxf(&entities(body)).unwrap();
        assert!(plan.points.is_empty());
        assert_eq!(plan.drains.len(), 2);
        assert_eq!(plan.drains[0].position(), Vertex2D::new(2.5, 3.5));
        assert_eq!(plan.drains[1].id, "drain-2");
    }

    #[test]
    fn test_legacy_polyline_with_vertices() {
        let body = "0\nPOLYLINE\n8\n0\n66\n1\n10\n0.0\n20\n0.0\n30\n0.0\n70\n1\n\
                    0\nVERTEX\n10\n0\n20\n0\n\
                    0\nVERTEX\n10\n4\n20\n0\n\
                    0\nVERTEX\n10\n4\n20\n3\n\
                    0\nSEQEND\n";
        let plan = read_dxf(&entities(body)).unwrap();
        assert_eq!(
            plan.points,
            vec![
                Vertex2D::new(0.0, 0.0),
                Vertex2D::new(4.0, 0.0),
                Vertex2D::new(4.0, 3.0)
            ]
        );
    }

    #[test]
    fn test_faces_and_tables_are_ignored() {
        let doc = "0\nSECTION\n2\nTABLES\n0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nROOF_MESH\n0\nENDTAB\n0\nENDSEC\n\
                   0\nSECTION\n2\nENTITIES\n0\n3DFACE\n8\nROOF_MESH\n10\n0\n20\n0\n30\n3\n0\nENDSEC\n0\nEOF\n";
        assert!(matches!(read_dxf(doc), Err(Error::ImportRejected)));
    }

    #[test]
    fn test_malformed_coordinate_is_parse_error() {
        let body = "0\nCIRCLE\n10\nnope\n20\n1\n";
        assert!(matches!(read_dxf(&entities(body)), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_non_finite_coordinates_are_parse_errors() {
        let nan_drain = "0\nCIRCLE\n10\nnan\n20\n1\n";
        assert!(matches!(
            read_dxf(&entities(nan_drain)),
            Err(Error::Parse { line: 8, .. })
        ));

        let huge_vertex = "0\nLWPOLYLINE\n10\n0\n20\n1e400\n10\n5\n20\n5\n10\n0\n20\n5\n";
        assert!(matches!(
            read_dxf(&entities(huge_vertex)),
            Err(Error::Parse { .. })
        ));
    }

    #[test]
    fn test_vertex_without_y_is_skipped() {
        let body = "0\nLWPOLYLINE\n10\n0\n20\n0\n10\n5\n10\n5\n20\n5\n";
        let plan = read_dxf(&entities(body)).unwrap();
        assert_eq!(
            plan.points,
            vec![Vertex2D::new(0.0, 0.0), Vertex2D::new(5.0, 5.0)]
        );
    }
}
