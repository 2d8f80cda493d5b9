// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Append-only store for the merged mesh

use super::{GlobalId, Triangulation};
use nalgebra::Point3;

/// Dense node array indexed by global id plus triangles over global ids.
///
/// Nodes are never moved or removed; the array index of a node is its id.
/// Triangles with a repeated corner are rejected on insertion.
#[derive(Debug, Clone, Default)]
pub struct ConglomerateMesh {
    nodes: Vec<Point3<f64>>,
    triangles: Vec<[GlobalId; 3]>,
}

impl ConglomerateMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(node_count: usize, triangle_count: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Id the next call to [`add_node`](Self::add_node) must use.
    pub fn next_id(&self) -> GlobalId {
        self.nodes.len()
    }

    /// Append a node. `id` must equal [`next_id`](Self::next_id).
    pub fn add_node(&mut self, id: GlobalId, position: Point3<f64>) {
        debug_assert_eq!(id, self.nodes.len(), "global ids must be allocated sequentially");
        self.nodes.push(position);
    }

    /// Append a triangle in the given corner order.
    ///
    /// Returns `false` and stores nothing if two corners share an id.
    pub fn add_triangle(&mut self, a: GlobalId, b: GlobalId, c: GlobalId) -> bool {
        if a == b || b == c || a == c {
            return false;
        }
        self.triangles.push([a, b, c]);
        true
    }

    pub fn node(&self, id: GlobalId) -> Option<&Point3<f64>> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Point3<f64>] {
        &self.nodes
    }

    pub fn triangles(&self) -> &[[GlobalId; 3]] {
        &self.triangles
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> Triangulation {
        Triangulation::new(self.nodes.clone(), self.triangles.clone())
    }

    /// Consume the store and hand over its arrays.
    pub fn into_triangulation(self) -> Triangulation {
        Triangulation::new(self.nodes, self.triangles)
    }
}
