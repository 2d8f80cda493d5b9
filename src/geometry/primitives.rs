// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tessellated primitive bodies
//!
//! Each primitive is produced the way a CAD kernel hands over a body: one
//! independently gridded patch per face, placed by a translation, with
//! boundary polylines keyed by topological edge.

use crate::conglomerate::{
    BoundaryEdge, EdgeId, LocalId, Orientation, Placement, Shape, ShapeFace, Triangulation,
};
use nalgebra::{Point3, Vector3};

/// Primitive bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box with one corner at the origin
    Box { size: Vector3<f64>, divisions: usize },
    /// Single square face in the xy plane, normal +z
    Square {
        origin: Point3<f64>,
        size: f64,
        divisions: usize,
    },
}

impl Primitive {
    pub fn cuboid(size: Vector3<f64>, divisions: usize) -> Self {
        Self::Box {
            size,
            divisions: divisions.max(1),
        }
    }

    pub fn square(origin: Point3<f64>, size: f64, divisions: usize) -> Self {
        Self::Square {
            origin,
            size,
            divisions: divisions.max(1),
        }
    }

    pub fn to_shape(&self) -> Shape {
        match *self {
            Self::Box { size, divisions } => Shape::from_faces(box_faces(size, divisions.max(1))),
            Self::Square {
                origin,
                size,
                divisions,
            } => Shape::from_faces(vec![square_face(origin, size, divisions.max(1))]),
        }
    }
}

/// Axes of a box face: unit-cube origin, grid u direction, grid v direction.
/// Forward faces have u x v pointing outward; the opposite faces reuse the
/// same axes and are marked reversed.
const BOX_FACES: [([f64; 3], [f64; 3], [f64; 3], Orientation); 6] = [
    ([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], Orientation::Forward),
    ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0], Orientation::Reversed),
    ([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], Orientation::Forward),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0], Orientation::Reversed),
    ([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], Orientation::Forward),
    ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], Orientation::Reversed),
];

fn box_faces(size: Vector3<f64>, n: usize) -> Vec<ShapeFace> {
    BOX_FACES
        .iter()
        .map(|&(origin, u, v, orientation)| {
            let origin = Vector3::from(origin);
            let u = Vector3::from(u);
            let v = Vector3::from(v);

            let corners = [origin, origin + u, origin + u + v, origin + v].map(corner_index);
            let boundary = grid_sides(n)
                .into_iter()
                .enumerate()
                .map(|(side, nodes)| {
                    BoundaryEdge::new(box_edge(corners[side], corners[(side + 1) % 4]), nodes)
                })
                .collect();

            let placement = origin.component_mul(&size);
            ShapeFace::new(grid(u.component_mul(&size), v.component_mul(&size), n))
                .with_placement(Placement::translation(placement.x, placement.y, placement.z))
                .with_orientation(orientation)
                .with_boundary(boundary)
        })
        .collect()
}

fn square_face(origin: Point3<f64>, size: f64, n: usize) -> ShapeFace {
    let boundary = grid_sides(n)
        .into_iter()
        .enumerate()
        .map(|(side, nodes)| BoundaryEdge::new(side, nodes))
        .collect();

    ShapeFace::new(grid(Vector3::x() * size, Vector3::y() * size, n))
        .with_placement(Placement::translation(origin.x, origin.y, origin.z))
        .with_boundary(boundary)
}

/// Unit-cube corner index, x + 2y + 4z.
fn corner_index(corner: Vector3<f64>) -> usize {
    (corner.x as usize) + 2 * (corner.y as usize) + 4 * (corner.z as usize)
}

fn box_edge(a: usize, b: usize) -> EdgeId {
    a.min(b) * 8 + a.max(b)
}

/// `(n+1)^2` nodes spanning `u` and `v`, node `(i, j)` at index `j*(n+1)+i`.
fn grid(u: Vector3<f64>, v: Vector3<f64>, n: usize) -> Triangulation {
    let stride = n + 1;
    let mut nodes = Vec::with_capacity(stride * stride);
    for j in 0..=n {
        for i in 0..=n {
            let s = i as f64 / n as f64;
            let t = j as f64 / n as f64;
            nodes.push(Point3::from(u * s + v * t));
        }
    }

    let mut triangles = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let a = j * stride + i;
            let b = a + 1;
            let c = b + stride;
            let d = a + stride;
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    Triangulation::new(nodes, triangles)
}

/// Bottom, right, top and left sides of a grid, walking counter-clockwise in (u, v).
fn grid_sides(n: usize) -> [Vec<LocalId>; 4] {
    let stride = n + 1;
    let at = |i: usize, j: usize| j * stride + i;
    [
        (0..=n).map(|i| at(i, 0)).collect(),
        (0..=n).map(|j| at(n, j)).collect(),
        (0..=n).rev().map(|i| at(i, n)).collect(),
        (0..=n).rev().map(|j| at(0, j)).collect(),
    ]
}
