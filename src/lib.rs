// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polymerge
//!
//! Merges the per-face triangulations of a tessellated body into one
//! watertight mesh. Coincident boundary nodes are welded through a spatial
//! hash, reversed faces are re-wound, and boundary polylines can optionally
//! be classified into free, manifold and non-manifold links.

pub mod conglomerate;
pub mod geometry;

pub use conglomerate::{
    merge_shape, merge_triangulations, LinkClass, LinkSets, MergeConfig, MergeError,
    MergeOutcome, MergeOutput, MergeReport, MergeResult, MergeSession, OutputMode, Shape,
    ShapeFace, TopologySource, Triangulation,
};
pub use geometry::{Mesh, Primitive};
