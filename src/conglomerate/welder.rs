// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Per-patch vertex welding against the running global node set

use super::{ConglomerateMesh, GlobalId, LocalId, Placement, SpatialHashIndex};
use nalgebra::Point3;

/// Local node index -> global node id for one patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalToGlobalMap {
    ids: Vec<GlobalId>,
}

impl LocalToGlobalMap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    /// Global id of `local`, or `None` if the patch has no such node.
    pub fn get(&self, local: LocalId) -> Option<GlobalId> {
        self.ids.get(local).copied()
    }

    /// Translate a local triangle. `None` if any corner is out of range.
    pub fn triangle(&self, [a, b, c]: [LocalId; 3]) -> Option<[GlobalId; 3]> {
        Some([self.get(a)?, self.get(b)?, self.get(c)?])
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[GlobalId] {
        &self.ids
    }

    fn push(&mut self, id: GlobalId) {
        self.ids.push(id);
    }
}

/// Assigns global ids to patch nodes, reusing ids of coincident nodes.
///
/// Borrows the session's index and store for the duration of one patch so
/// the id counter and the spatial index can never drift apart.
pub struct NodeWelder<'s> {
    index: &'s mut SpatialHashIndex,
    mesh: &'s mut ConglomerateMesh,
}

impl<'s> NodeWelder<'s> {
    pub fn new(index: &'s mut SpatialHashIndex, mesh: &'s mut ConglomerateMesh) -> Self {
        Self { index, mesh }
    }

    /// Weld every node of a patch, applying its placement first.
    pub fn weld_patch(&mut self, nodes: &[Point3<f64>], placement: &Placement) -> LocalToGlobalMap {
        self.weld_world(nodes.iter().map(|p| placement.apply(p)))
    }

    /// Weld nodes whose positions are already in world space.
    pub fn weld_world<I>(&mut self, positions: I) -> LocalToGlobalMap
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let positions = positions.into_iter();
        let mut map = LocalToGlobalMap::with_capacity(positions.size_hint().0);
        for world in positions {
            map.push(self.weld_point(world));
        }
        map
    }

    /// Global id for one world-space point, allocating a node if nothing is within tolerance.
    pub fn weld_point(&mut self, world: Point3<f64>) -> GlobalId {
        if let Some(existing) = self.index.find_near(&world) {
            return existing;
        }
        let id = self.mesh.next_id();
        self.mesh.add_node(id, world);
        self.index.insert(world, id);
        id
    }
}
