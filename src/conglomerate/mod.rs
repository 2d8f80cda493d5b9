// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conglomeration of tessellated patches into one welded mesh

mod config;
mod error;
mod links;
mod patch;
mod report;
mod session;
mod spatial_hash;
mod store;
mod welder;

/// Dense id of a node in the merged mesh.
pub type GlobalId = usize;

/// Index of a node within one patch.
pub type LocalId = usize;

pub use config::{MergeConfig, OutputMode, DEFAULT_CONFIG_FILE, DEFAULT_TOLERANCE};
pub use error::{MergeError, MergeResult};
pub use links::{classify_polyline, Link, LinkClass, LinkSets};
pub use patch::{
    BoundaryEdge, EdgeId, EdgeOwners, LocalPatch, Orientation, Placement, Shape, ShapeFace,
    TopologySource, Triangulation,
};
pub use report::MergeReport;
pub use session::{merge_shape, merge_triangulations, MergeOutcome, MergeOutput, MergeSession};
pub use spatial_hash::SpatialHashIndex;
pub use store::ConglomerateMesh;
pub use welder::{LocalToGlobalMap, NodeWelder};
