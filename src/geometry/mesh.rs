// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use crate::conglomerate::Triangulation;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    pub fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }
}

/// Triangle defined by three vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Triangle {
    pub indices: [usize; 3],
}

impl Triangle {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }

    /// The three directed edges in winding order.
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.indices;
        [(a, b), (b, c), (c, a)]
    }
}

/// Triangular mesh with per-vertex normals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }

    /// Wrap an indexed triangulation, deriving vertex normals from its winding.
    pub fn from_triangulation(triangulation: Triangulation) -> Self {
        let Triangulation { nodes, triangles } = triangulation;
        let mut mesh = Self {
            vertices: nodes
                .into_iter()
                .map(|p| Vertex::new(p, Vector3::zeros()))
                .collect(),
            triangles: triangles.into_iter().map(Triangle::new).collect(),
        };
        mesh.recompute_normals();
        mesh
    }

    /// Drop normals and return the bare triangulation.
    pub fn to_triangulation(&self) -> Triangulation {
        Triangulation::new(
            self.vertices.iter().map(|v| v.position).collect(),
            self.triangles.iter().map(|t| t.indices).collect(),
        )
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Recompute vertex normals from triangle geometry
    /// This calculates face normals and averages them at shared vertices
    pub fn recompute_normals(&mut self) {
        if self.vertices.is_empty() {
            return;
        }

        let mut normal_sums: Vec<Vector3<f64>> = vec![Vector3::zeros(); self.vertices.len()];

        for triangle in &self.triangles {
            let [i0, i1, i2] = triangle.indices;
            let (Some(v0), Some(v1), Some(v2)) = (
                self.vertices.get(i0),
                self.vertices.get(i1),
                self.vertices.get(i2),
            ) else {
                continue;
            };

            // Unnormalized cross product weights each face by its area
            let face_normal = (v1.position - v0.position).cross(&(v2.position - v0.position));
            if face_normal.norm() > 1e-12 {
                for idx in triangle.indices {
                    normal_sums[idx] += face_normal;
                }
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(normal_sums) {
            vertex.normal = sum
                .try_normalize(1e-12)
                .unwrap_or_else(|| Vector3::new(0.0, 0.0, 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tetrahedron() -> Triangulation {
        Triangulation::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
        )
    }

    #[test]
    fn test_from_triangulation_normals() {
        let mesh = Mesh::from_triangulation(tetrahedron());

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 4);
        assert!(mesh.vertices.iter().all(|v| {
            let norm = v.normal.norm();
            norm > 0.9 && norm < 1.1
        }));

        // Apex normal leans outward, away from the origin
        let apex = &mesh.vertices[3];
        assert!(apex.normal.z > 0.0);
        // Origin corner normal points back into the negative octant
        let origin = &mesh.vertices[0];
        assert!(origin.normal.x < 0.0 && origin.normal.y < 0.0 && origin.normal.z < 0.0);
    }

    #[test]
    fn test_triangulation_roundtrip() {
        let tri = tetrahedron();
        let mesh = Mesh::from_triangulation(tri.clone());
        assert_eq!(mesh.to_triangulation(), tri);
    }

    #[test]
    fn test_unreferenced_vertex_gets_default_normal() {
        let mut tri = tetrahedron();
        tri.nodes.push(Point3::new(5.0, 5.0, 5.0));
        let mesh = Mesh::from_triangulation(tri);
        assert_relative_eq!(mesh.vertices[4].normal, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_bounding_box() {
        let bbox = Mesh::from_triangulation(tetrahedron()).bounding_box();
        assert_relative_eq!(bbox.min, Point3::new(0.0, 0.0, 0.0));
        assert_relative_eq!(bbox.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_triangle_edges() {
        let t = Triangle::new([4, 5, 6]);
        assert_eq!(t.edges(), [(4, 5), (5, 6), (6, 4)]);
    }
}
