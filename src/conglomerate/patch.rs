// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Input patches and the topology seam
//!
//! A [`Triangulation`] is one independently tessellated surface region. In shape
//! mode each triangulation arrives wrapped in a [`ShapeFace`] carrying its
//! placement, orientation and boundary polylines; owner-face counts for the
//! topological edges come from a [`TopologySource`].

use super::LocalId;
use ahash::{AHashSet, RandomState};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key naming one topological edge of the source body.
pub type EdgeId = usize;

/// Node positions plus triangles over local node indices.
///
/// Also the bare indexed output of a merge, where indices are global ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangulation {
    pub nodes: Vec<Point3<f64>>,
    pub triangles: Vec<[usize; 3]>,
}

impl Triangulation {
    pub fn new(nodes: Vec<Point3<f64>>, triangles: Vec<[usize; 3]>) -> Self {
        Self { nodes, triangles }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// A triangulation without nodes or triangles contributes nothing to a merge.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.triangles.is_empty()
    }
}

/// Placement of a patch in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placement {
    matrix: Option<Matrix4<f64>>,
}

impl Placement {
    /// Patch coordinates are already world coordinates.
    pub fn identity() -> Self {
        Self { matrix: None }
    }

    /// Apply `matrix` to every node. An identity matrix is stored as no placement.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        if matrix == Matrix4::identity() {
            Self::identity()
        } else {
            Self {
                matrix: Some(matrix),
            }
        }
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Self::from_matrix(Matrix4::new_translation(&nalgebra::Vector3::new(x, y, z)))
    }

    pub fn is_identity(&self) -> bool {
        self.matrix.is_none()
    }

    pub fn matrix(&self) -> Option<&Matrix4<f64>> {
        self.matrix.as_ref()
    }

    /// Map a local point to world space.
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        match &self.matrix {
            Some(matrix) => matrix.transform_point(point),
            None => *point,
        }
    }
}

/// Orientation of a face relative to its underlying surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Forward,
    /// Triangle winding must be flipped to keep outward normals
    Reversed,
}

impl Orientation {
    pub fn is_reversed(self) -> bool {
        self == Orientation::Reversed
    }

    /// Order the corners of a local triangle for emission.
    pub fn orient(self, [n1, n2, n3]: [LocalId; 3]) -> [LocalId; 3] {
        match self {
            Orientation::Forward => [n1, n2, n3],
            Orientation::Reversed => [n1, n3, n2],
        }
    }
}

/// Borrowed view of one patch as the welder sees it.
#[derive(Debug, Clone, Copy)]
pub struct LocalPatch<'a> {
    pub triangulation: &'a Triangulation,
    pub placement: Placement,
    pub orientation: Orientation,
}

impl<'a> LocalPatch<'a> {
    /// Patch in world coordinates with forward orientation, as in raw-list mode.
    pub fn raw(triangulation: &'a Triangulation) -> Self {
        Self {
            triangulation,
            placement: Placement::identity(),
            orientation: Orientation::Forward,
        }
    }

    /// World-space positions of every local node.
    pub fn world_positions(&self) -> Vec<Point3<f64>> {
        self.triangulation
            .nodes
            .iter()
            .map(|p| self.placement.apply(p))
            .collect()
    }
}

/// Polyline of one face along one topological edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryEdge {
    pub edge: EdgeId,
    /// Ordered local node indices sampled along the edge
    pub nodes: Vec<LocalId>,
}

impl BoundaryEdge {
    pub fn new(edge: EdgeId, nodes: Vec<LocalId>) -> Self {
        Self { edge, nodes }
    }
}

/// One face of a body, as handed over by the topology collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShapeFace {
    /// `None` when the face was never tessellated
    pub triangulation: Option<Triangulation>,
    pub placement: Placement,
    pub orientation: Orientation,
    pub boundary: Vec<BoundaryEdge>,
}

impl ShapeFace {
    pub fn new(triangulation: Triangulation) -> Self {
        Self {
            triangulation: Some(triangulation),
            ..Self::default()
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_boundary(mut self, boundary: Vec<BoundaryEdge>) -> Self {
        self.boundary = boundary;
        self
    }

    /// The face as a weldable patch, or `None` if there is nothing to weld.
    pub fn patch(&self) -> Option<LocalPatch<'_>> {
        let triangulation = self.triangulation.as_ref()?;
        if triangulation.is_empty() {
            return None;
        }
        Some(LocalPatch {
            triangulation,
            placement: self.placement,
            orientation: self.orientation,
        })
    }
}

/// Edge id -> number of faces owning that edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeOwners {
    counts: HashMap<EdgeId, usize, RandomState>,
}

impl EdgeOwners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count, for every edge id, the distinct faces whose boundary references it.
    pub fn from_faces(faces: &[ShapeFace]) -> Self {
        let mut owners = Self::new();
        for face in faces {
            let edges: AHashSet<EdgeId> = face.boundary.iter().map(|b| b.edge).collect();
            for edge in edges {
                *owners.counts.entry(edge).or_insert(0) += 1;
            }
        }
        owners
    }

    pub fn set(&mut self, edge: EdgeId, owner_faces: usize) {
        self.counts.insert(edge, owner_faces);
    }

    pub fn get(&self, edge: EdgeId) -> Option<usize> {
        self.counts.get(&edge).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl FromIterator<(EdgeId, usize)> for EdgeOwners {
    fn from_iter<I: IntoIterator<Item = (EdgeId, usize)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Supplies the faces of a body and the owner-face count of its edges.
///
/// Implemented by CAD adapters; [`Shape`] is the in-memory implementation.
pub trait TopologySource {
    fn faces(&self) -> &[ShapeFace];

    /// Number of faces sharing `edge`, or `None` if the edge is unknown.
    fn owner_face_count(&self, edge: EdgeId) -> Option<usize>;
}

/// A body as a list of faces plus an explicit edge ownership table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shape {
    pub faces: Vec<ShapeFace>,
    pub owners: EdgeOwners,
}

impl Shape {
    /// Build a shape whose ownership table is derived from the faces' boundaries.
    pub fn from_faces(faces: Vec<ShapeFace>) -> Self {
        let owners = EdgeOwners::from_faces(&faces);
        Self { faces, owners }
    }

    pub fn with_owners(faces: Vec<ShapeFace>, owners: EdgeOwners) -> Self {
        Self { faces, owners }
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl TopologySource for Shape {
    fn faces(&self) -> &[ShapeFace] {
        &self.faces
    }

    fn owner_face_count(&self, edge: EdgeId) -> Option<usize> {
        self.owners.get(edge)
    }
}
