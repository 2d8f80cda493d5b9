// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! End-to-end merges of small hand-built bodies

use anyhow::Result;
use nalgebra::{Point3, Vector3};
use polymerge::conglomerate::{BoundaryEdge, Link, LinkClass, Orientation, Placement};
use polymerge::geometry::Primitive;
use polymerge::{merge_shape, merge_triangulations, MergeConfig, Shape, ShapeFace, Triangulation};

const SHARED_EDGE: usize = 11;

/// Two unit squares side by side sharing edge 11 at x = 1.
/// The right square's copies of the shared nodes are nudged by less than the tolerance.
fn two_squares() -> Shape {
    let left = ShapeFace::new(Triangulation::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    ))
    .with_boundary(vec![
        BoundaryEdge::new(10, vec![0, 1]),
        BoundaryEdge::new(SHARED_EDGE, vec![1, 2]),
        BoundaryEdge::new(12, vec![2, 3]),
        BoundaryEdge::new(13, vec![3, 0]),
    ]);

    let right = ShapeFace::new(Triangulation::new(
        vec![
            Point3::new(1.0 + 5e-8, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0 - 8e-8, 3e-8),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    ))
    .with_boundary(vec![
        BoundaryEdge::new(20, vec![0, 1]),
        BoundaryEdge::new(21, vec![1, 2]),
        BoundaryEdge::new(22, vec![2, 3]),
        BoundaryEdge::new(SHARED_EDGE, vec![3, 0]),
    ]);

    Shape::from_faces(vec![left, right])
}

#[test]
fn test_adjacent_squares_weld_along_shared_edge() -> Result<()> {
    let shape = two_squares();
    assert_eq!(shape.owners.get(SHARED_EDGE), Some(2));
    assert_eq!(shape.owners.get(10), Some(1));

    let outcome = merge_shape(&shape, &MergeConfig::new(1e-6).with_links(true))?;

    assert_eq!(outcome.output.node_count(), 6);
    assert_eq!(outcome.output.triangle_count(), 4);
    assert_eq!(outcome.report.welded_nodes(), 2);

    // One manifold link per patch, both joining the welded nodes 1 and 2
    let manifold = outcome.links.get(LinkClass::Manifold);
    assert_eq!(manifold.len(), 2);
    assert!(manifold.iter().all(|l| l.same_nodes(&Link::new(1, 2))));

    assert_eq!(outcome.links.free.len(), 6);
    assert!(outcome.links.non_manifold.is_empty());
    assert!(!outcome
        .links
        .free
        .iter()
        .any(|l| l.same_nodes(&Link::new(1, 2))));
    Ok(())
}

#[test]
fn test_merged_squares_keep_winding() -> Result<()> {
    let outcome = merge_shape(&two_squares(), &MergeConfig::default())?;
    let merged = outcome.output.into_triangulation();

    assert_eq!(merged.triangles, vec![[0, 1, 2], [0, 2, 3], [1, 4, 5], [1, 5, 2]]);
    // Welded nodes keep the first-seen position
    assert_eq!(merged.nodes[1], Point3::new(1.0, 0.0, 0.0));
    assert!(outcome.links.is_empty());
    Ok(())
}

#[test]
fn test_lone_square_is_all_free() -> Result<()> {
    let shape = Primitive::square(Point3::origin(), 1.0, 3).to_shape();
    let outcome = merge_shape(&shape, &MergeConfig::default().with_links(true))?;

    assert_eq!(outcome.output.node_count(), 16);
    assert_eq!(outcome.links.free.len(), 12);
    assert!(outcome.links.manifold.is_empty());
    assert!(outcome.links.non_manifold.is_empty());
    assert_eq!(outcome.report.free_links, 12);
    Ok(())
}

#[test]
fn test_three_faces_on_one_edge_are_non_manifold() -> Result<()> {
    let fin = |z: f64| {
        ShapeFace::new(Triangulation::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.5, 1.0, z),
            ],
            vec![[0, 1, 2]],
        ))
        .with_boundary(vec![BoundaryEdge::new(0, vec![0, 1])])
    };
    let shape = Shape::from_faces(vec![fin(-1.0), fin(0.0), fin(1.0)]);

    let outcome = merge_shape(&shape, &MergeConfig::default().with_links(true))?;

    assert_eq!(outcome.output.node_count(), 5);
    assert_eq!(outcome.links.non_manifold.len(), 3);
    assert_eq!(outcome.report.non_manifold_links, 3);
    Ok(())
}

#[test]
fn test_placed_and_reversed_face() -> Result<()> {
    let face = ShapeFace::new(Triangulation::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    ))
    .with_placement(Placement::translation(0.0, 0.0, 4.0))
    .with_orientation(Orientation::Reversed);

    let outcome = merge_shape(&Shape::from_faces(vec![face]), &MergeConfig::default())?;
    let merged = outcome.output.into_triangulation();

    assert_eq!(merged.triangles, vec![[0, 2, 1]]);
    assert!(merged.nodes.iter().all(|p| p.z == 4.0));
    assert_eq!(outcome.report.reversed_patches, 1);
    Ok(())
}

#[test]
fn test_raw_triangulations_merge_without_links() -> Result<()> {
    let shape = Primitive::cuboid(Vector3::new(1.0, 1.0, 1.0), 2).to_shape();

    // Raw mode ignores placement and orientation, so bake the placement in
    let patches: Vec<Triangulation> = shape
        .faces
        .iter()
        .filter_map(|face| face.patch())
        .map(|patch| {
            Triangulation::new(
                patch.world_positions(),
                patch.triangulation.triangles.clone(),
            )
        })
        .collect();

    let outcome = merge_triangulations(&patches, &MergeConfig::default().with_links(true))?;

    assert_eq!(outcome.output.node_count(), 26);
    assert_eq!(outcome.output.triangle_count(), 48);
    assert!(outcome.links.is_empty());
    assert_eq!(outcome.report.reversed_patches, 0);
    Ok(())
}

#[test]
fn test_empty_input() -> Result<()> {
    let outcome = merge_triangulations(&[], &MergeConfig::default())?;
    assert_eq!(outcome.output.node_count(), 0);
    assert_eq!(outcome.output.triangle_count(), 0);

    let outcome = merge_shape(&Shape::default(), &MergeConfig::default())?;
    assert_eq!(outcome.output.node_count(), 0);
    Ok(())
}

#[test]
fn test_report_serializes() -> Result<()> {
    let outcome = merge_shape(&two_squares(), &MergeConfig::default().with_links(true))?;
    let json: serde_json::Value = serde_json::from_str(&outcome.report.to_json()?)?;

    assert_eq!(json["global_nodes"], 6);
    assert_eq!(json["manifold_links"], 2);
    assert_eq!(json["free_links"], 6);
    Ok(())
}
