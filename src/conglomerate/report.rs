// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Merge statistics

use super::error::MergeResult;
use serde::{Deserialize, Serialize};

/// Counters collected while merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Patches that contributed nodes
    pub patches_merged: usize,
    /// Patches without a usable triangulation
    pub patches_skipped: usize,
    /// Merged patches whose triangles were flipped
    pub reversed_patches: usize,
    /// Nodes across all merged patches before welding
    pub source_nodes: usize,
    /// Distinct nodes after welding
    pub global_nodes: usize,
    pub triangles_emitted: usize,
    /// Triangles collapsed by welding
    pub degenerate_triangles: usize,
    /// Triangles referencing a node the patch does not have
    pub invalid_triangles: usize,
    pub free_links: usize,
    pub manifold_links: usize,
    pub non_manifold_links: usize,
    /// Boundary edges with no usable owner-face count
    pub unclassified_edges: usize,
}

impl MergeReport {
    /// Source nodes that were folded onto an existing global node.
    pub fn welded_nodes(&self) -> usize {
        self.source_nodes.saturating_sub(self.global_nodes)
    }

    pub fn total_links(&self) -> usize {
        self.free_links + self.manifold_links + self.non_manifold_links
    }

    pub fn to_json(&self) -> MergeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
