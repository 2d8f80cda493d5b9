// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh validation utilities

use super::Mesh;
use std::collections::{HashMap, HashSet};

/// Undirected edge, smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub v0: usize,
    pub v1: usize,
}

impl Edge {
    pub fn new(v0: usize, v1: usize) -> Self {
        // Always store edges with smaller index first for consistent hashing
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }
}

/// Number of triangles using each undirected edge
pub fn build_edge_counts(mesh: &Mesh) -> HashMap<Edge, u32> {
    let mut edge_counts: HashMap<Edge, u32> = HashMap::new();

    for triangle in &mesh.triangles {
        for (a, b) in triangle.edges() {
            *edge_counts.entry(Edge::new(a, b)).or_insert(0) += 1;
        }
    }

    edge_counts
}

/// Check if mesh is manifold (each edge shared by at most 2 triangles)
pub fn is_manifold(mesh: &Mesh) -> bool {
    build_edge_counts(mesh).values().all(|&count| count <= 2)
}

/// Check if mesh is closed (each edge shared by exactly 2 triangles)
pub fn is_closed(mesh: &Mesh) -> bool {
    let counts = build_edge_counts(mesh);
    !counts.is_empty() && counts.values().all(|&count| count == 2)
}

/// Check that neighbouring triangles agree on orientation.
///
/// Two consistently wound triangles traverse their shared edge in opposite
/// directions, so no directed edge may appear twice.
pub fn has_consistent_winding(mesh: &Mesh) -> bool {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    mesh.triangles
        .iter()
        .flat_map(|t| t.edges())
        .all(|directed| seen.insert(directed))
}

/// Find all boundary edges (edges shared by exactly 1 triangle)
pub fn find_boundary_edges(mesh: &Mesh) -> HashSet<Edge> {
    build_edge_counts(mesh)
        .into_iter()
        .filter(|&(_, count)| count == 1)
        .map(|(edge, _)| edge)
        .collect()
}

/// Get mesh validation report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshValidation {
    pub is_manifold: bool,
    pub is_closed: bool,
    pub has_consistent_winding: bool,
    pub has_degenerate_triangles: bool,
    pub edge_count: usize,
    pub boundary_edge_count: usize,
}

pub fn validate_mesh(mesh: &Mesh) -> MeshValidation {
    let edge_counts = build_edge_counts(mesh);

    let boundary_edges = edge_counts
        .values()
        .filter(|&&count| count == 1)
        .count();

    MeshValidation {
        is_manifold: edge_counts.values().all(|&count| count <= 2),
        is_closed: !edge_counts.is_empty() && edge_counts.values().all(|&count| count == 2),
        has_consistent_winding: has_consistent_winding(mesh),
        has_degenerate_triangles: mesh.triangles.iter().any(|t| {
            let [a, b, c] = t.indices;
            a == b || b == c || a == c
        }),
        edge_count: edge_counts.len(),
        boundary_edge_count: boundary_edges,
    }
}
