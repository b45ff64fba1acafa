// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ridge and valley detection
//!
//! An interior edge shared by exactly two retained triangles is a ridge (or
//! valley) when the dot product of their face normals drops below
//! [`RIDGE_DOT_THRESHOLD`]. Boundary edges are never ridges.

use nalgebra::{Point2, Vector3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::lifter::RoofSurface;

/// Normal dot product below which a shared edge is a fold (about 2.6 degrees)
pub const RIDGE_DOT_THRESHOLD: f64 = 0.999;

/// One fold line in plan space. Endpoint order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RidgeSegment {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl RidgeSegment {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Undirected edge key, smaller index first
#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Edge adjacency over triangles given as vertex index triples.
///
/// Edges are kept in first-seen order so downstream output is deterministic.
#[derive(Debug, Default)]
pub struct EdgeAdjacency {
    edges: Vec<((usize, usize), SmallVec<[usize; 2]>)>,
    lookup: FxHashMap<(usize, usize), usize>,
}

impl EdgeAdjacency {
    pub fn build(triangles: &[[usize; 3]]) -> Self {
        let mut adjacency = Self {
            edges: Vec::with_capacity(triangles.len() * 2),
            lookup: FxHashMap::default(),
        };
        for (t, tri) in triangles.iter().enumerate() {
            adjacency.insert(edge_key(tri[0], tri[1]), t);
            adjacency.insert(edge_key(tri[1], tri[2]), t);
            adjacency.insert(edge_key(tri[2], tri[0]), t);
        }
        adjacency
    }

    fn insert(&mut self, key: (usize, usize), triangle: usize) {
        let slot = match self.lookup.get(&key) {
            Some(&slot) => slot,
            None => {
                self.edges.push((key, SmallVec::new()));
                self.lookup.insert(key, self.edges.len() - 1);
                self.edges.len() - 1
            }
        };
        self.edges[slot].1.push(triangle);
    }

    /// Triangles touching the edge (a, b), in either direction
    pub fn triangles_of(&self, a: usize, b: usize) -> &[usize] {
        self.lookup
            .get(&edge_key(a, b))
            .map(|&slot| self.edges[slot].1.as_slice())
            .unwrap_or(&[])
    }

    /// Edges with exactly two adjacent triangles
    pub fn interior_edges(&self) -> impl Iterator<Item = ((usize, usize), [usize; 2])> + '_ {
        self.edges.iter().filter_map(|(key, tris)| match tris.as_slice() {
            &[t0, t1] => Some((*key, [t0, t1])),
            _ => None,
        })
    }

    /// Edges touched by a single triangle
    pub fn boundary_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .filter(|(_, tris)| tris.len() == 1)
            .map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[inline]
fn normals_diverge(n0: &Vector3<f64>, n1: &Vector3<f64>, threshold: f64) -> bool {
    n0.dot(n1) < threshold
}

/// Extract fold lines with the default threshold
pub fn extract_ridges(surface: &RoofSurface) -> Vec<RidgeSegment> {
    extract_ridges_with_threshold(surface, RIDGE_DOT_THRESHOLD)
}

/// Extract fold lines whose adjacent face normals satisfy `dot < threshold`
pub fn extract_ridges_with_threshold(surface: &RoofSurface, threshold: f64) -> Vec<RidgeSegment> {
    let tri = &surface.triangulation;
    let adjacency = EdgeAdjacency::build(&tri.triangles);

    let ridges: Vec<RidgeSegment> = adjacency
        .interior_edges()
        .filter(|(_, [t0, t1])| {
            normals_diverge(&surface.face_normals[*t0], &surface.face_normals[*t1], threshold)
        })
        .map(|((a, b), _)| RidgeSegment::new(tri.points[a], tri.points[b]))
        .collect();

    tracing::debug!(
        edges = adjacency.len(),
        ridges = ridges.len(),
        "Extracted roof ridges"
    );

    ridges
}
