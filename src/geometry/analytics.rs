// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry analytics and statistics

use super::mesh_utils::is_closed;
use super::Mesh;
use serde::{Deserialize, Serialize};

/// Geometry statistics and analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryStats {
    /// Signed enclosed volume; positive when triangles wind outward
    pub signed_volume: f64,
    /// Total surface area in square units
    pub surface_area: f64,
    /// Bounding box [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Mean vertex position [x, y, z]
    pub centroid: [f64; 3],
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of triangles
    pub triangle_count: usize,
    /// Is the mesh watertight (every edge shared by exactly two triangles)?
    pub is_watertight: bool,
}

impl GeometryStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            signed_volume: 0.0,
            surface_area: 0.0,
            bbox: [0.0; 6],
            centroid: [0.0; 3],
            vertex_count: 0,
            triangle_count: 0,
            is_watertight: false,
        }
    }

    pub fn volume(&self) -> f64 {
        self.signed_volume.abs()
    }
}

/// Analyze mesh geometry and compute statistics
pub fn analyze(mesh: &Mesh) -> GeometryStats {
    let vertex_count = mesh.vertices.len();
    let triangle_count = mesh.triangles.len();

    if vertex_count == 0 || triangle_count == 0 {
        return GeometryStats::empty();
    }

    let bbox = mesh.bounding_box();

    GeometryStats {
        signed_volume: signed_volume(mesh),
        surface_area: surface_area(mesh),
        bbox: [
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
        ],
        centroid: centroid(mesh),
        vertex_count,
        triangle_count,
        is_watertight: is_closed(mesh),
    }
}

/// Sum of signed tetrahedron volumes against the origin
pub fn signed_volume(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .filter_map(|t| corners(mesh, t.indices))
        .map(|[v0, v1, v2]| v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0)
        .sum()
}

/// Calculate total surface area
pub fn surface_area(mesh: &Mesh) -> f64 {
    mesh.triangles
        .iter()
        .filter_map(|t| corners(mesh, t.indices))
        .map(|[v0, v1, v2]| (v1 - v0).cross(&(v2 - v0)).norm() / 2.0)
        .sum()
}

fn centroid(mesh: &Mesh) -> [f64; 3] {
    let sum = mesh
        .vertices
        .iter()
        .fold(nalgebra::Vector3::zeros(), |acc, v| acc + v.position.coords);
    let mean = sum / mesh.vertices.len() as f64;
    [mean.x, mean.y, mean.z]
}

fn corners(mesh: &Mesh, [a, b, c]: [usize; 3]) -> Option<[nalgebra::Point3<f64>; 3]> {
    Some([
        mesh.vertices.get(a)?.position,
        mesh.vertices.get(b)?.position,
        mesh.vertices.get(c)?.position,
    ])
}
