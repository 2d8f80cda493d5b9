// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boundary link classification by owner-face count

use super::{GlobalId, LocalId, LocalToGlobalMap};
use serde::{Deserialize, Serialize};

/// Valence class of a topological edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkClass {
    /// Edge owned by a single face
    Free,
    /// Edge shared by exactly two faces
    Manifold,
    /// Edge shared by more than two faces
    NonManifold,
}

impl LinkClass {
    /// Class of an edge owned by `owner_faces` faces. An edge with no owners has no class.
    pub fn from_owner_count(owner_faces: usize) -> Option<Self> {
        match owner_faces {
            0 => None,
            1 => Some(LinkClass::Free),
            2 => Some(LinkClass::Manifold),
            _ => Some(LinkClass::NonManifold),
        }
    }
}

/// One boundary segment between two consecutive welded nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub a: GlobalId,
    pub b: GlobalId,
}

impl Link {
    pub fn new(a: GlobalId, b: GlobalId) -> Self {
        Self { a, b }
    }

    /// Whether both links join the same two nodes, in either direction.
    pub fn same_nodes(&self, other: &Link) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

/// Free, manifold and non-manifold links in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSets {
    pub free: Vec<Link>,
    pub manifold: Vec<Link>,
    pub non_manifold: Vec<Link>,
}

impl LinkSets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, class: LinkClass, link: Link) {
        self.get_mut(class).push(link);
    }

    pub fn get(&self, class: LinkClass) -> &[Link] {
        match class {
            LinkClass::Free => &self.free,
            LinkClass::Manifold => &self.manifold,
            LinkClass::NonManifold => &self.non_manifold,
        }
    }

    fn get_mut(&mut self, class: LinkClass) -> &mut Vec<Link> {
        match class {
            LinkClass::Free => &mut self.free,
            LinkClass::Manifold => &mut self.manifold,
            LinkClass::NonManifold => &mut self.non_manifold,
        }
    }

    pub fn total(&self) -> usize {
        self.free.len() + self.manifold.len() + self.non_manifold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Emit the links of one boundary polyline into `sets`.
///
/// Each consecutive pair of local nodes is translated through `map`; pairs
/// touching a node the patch does not have are skipped. Returns the number
/// of links emitted.
pub fn classify_polyline(
    polyline: &[LocalId],
    class: LinkClass,
    map: &LocalToGlobalMap,
    sets: &mut LinkSets,
) -> usize {
    let mut emitted = 0;
    for pair in polyline.windows(2) {
        let (Some(prev), Some(curr)) = (map.get(pair[0]), map.get(pair[1])) else {
            continue;
        };
        sets.push(class, Link::new(prev, curr));
        emitted += 1;
    }
    emitted
}
