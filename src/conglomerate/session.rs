// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Merge session: folds patches into one conglomerate mesh
//!
//! A [`MergeSession`] owns everything that lives for the duration of one
//! merge: the spatial index, the growing node and triangle store, the three
//! link collections and the report counters. Patches are added one at a time;
//! [`MergeSession::finish`] packages the result.

use super::links::classify_polyline;
use super::{
    BoundaryEdge, ConglomerateMesh, EdgeId, LinkClass, LinkSets, LocalPatch, LocalToGlobalMap,
    MergeConfig, MergeReport, MergeResult, NodeWelder, OutputMode, ShapeFace, SpatialHashIndex,
    TopologySource, Triangulation,
};
use crate::geometry::Mesh;
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Merged mesh, packaged per [`OutputMode`].
#[derive(Debug, Clone)]
pub enum MergeOutput {
    Triangulation(Triangulation),
    Mesh(Mesh),
}

impl MergeOutput {
    pub fn node_count(&self) -> usize {
        match self {
            MergeOutput::Triangulation(t) => t.node_count(),
            MergeOutput::Mesh(m) => m.vertex_count(),
        }
    }

    pub fn triangle_count(&self) -> usize {
        match self {
            MergeOutput::Triangulation(t) => t.triangle_count(),
            MergeOutput::Mesh(m) => m.triangle_count(),
        }
    }

    /// The result as a mesh wrapper, computing normals if it was a bare triangulation.
    pub fn into_mesh(self) -> Mesh {
        match self {
            MergeOutput::Triangulation(t) => Mesh::from_triangulation(t),
            MergeOutput::Mesh(m) => m,
        }
    }

    /// The result as a bare triangulation.
    pub fn into_triangulation(self) -> Triangulation {
        match self {
            MergeOutput::Triangulation(t) => t,
            MergeOutput::Mesh(m) => m.to_triangulation(),
        }
    }
}

/// Everything a merge hands back.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub output: MergeOutput,
    pub links: LinkSets,
    pub report: MergeReport,
}

/// State of one merge call.
#[derive(Debug)]
pub struct MergeSession {
    config: MergeConfig,
    index: SpatialHashIndex,
    mesh: ConglomerateMesh,
    links: LinkSets,
    report: MergeReport,
}

impl MergeSession {
    /// Start a merge. Fails if the configured tolerance is unusable.
    pub fn new(config: MergeConfig) -> MergeResult<Self> {
        config.validate()?;
        let index = SpatialHashIndex::new(config.tolerance)?;
        Ok(Self {
            config,
            index,
            mesh: ConglomerateMesh::new(),
            links: LinkSets::new(),
            report: MergeReport::default(),
        })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn mesh(&self) -> &ConglomerateMesh {
        &self.mesh
    }

    pub fn links(&self) -> &LinkSets {
        &self.links
    }

    pub fn report(&self) -> &MergeReport {
        &self.report
    }

    /// Fold one face into the mesh.
    ///
    /// `owner_face_count` resolves the boundary edges' owner counts; it is only
    /// consulted when link collection is enabled.
    pub fn add_face<F>(&mut self, face: &ShapeFace, owner_face_count: F)
    where
        F: Fn(EdgeId) -> Option<usize>,
    {
        self.add_face_with_world(face, None, owner_face_count);
    }

    /// Fold one triangulation into the mesh as-is: no placement, no
    /// orientation, no boundary links.
    pub fn add_triangulation(&mut self, triangulation: &Triangulation) {
        if triangulation.is_empty() {
            debug!("Skipping empty triangulation");
            self.report.patches_skipped += 1;
            return;
        }
        let patch = LocalPatch::raw(triangulation);
        let map = self.weld(&patch, None);
        self.emit_triangles(&patch, &map);
    }

    /// `world` carries precomputed world positions for the face's nodes.
    fn add_face_with_world<F>(
        &mut self,
        face: &ShapeFace,
        world: Option<Vec<Point3<f64>>>,
        owner_face_count: F,
    ) where
        F: Fn(EdgeId) -> Option<usize>,
    {
        let Some(patch) = face.patch() else {
            debug!("Skipping face without triangulation");
            self.report.patches_skipped += 1;
            return;
        };

        let map = self.weld(&patch, world);
        if patch.orientation.is_reversed() {
            self.report.reversed_patches += 1;
        }
        self.emit_triangles(&patch, &map);

        if self.config.collect_links {
            self.classify_boundary(&face.boundary, &map, owner_face_count);
        }
    }

    fn weld(
        &mut self,
        patch: &LocalPatch<'_>,
        world: Option<Vec<Point3<f64>>>,
    ) -> LocalToGlobalMap {
        let before = self.mesh.node_count();
        let mut welder = NodeWelder::new(&mut self.index, &mut self.mesh);
        let map = match world {
            Some(world) => welder.weld_world(world),
            None => welder.weld_patch(&patch.triangulation.nodes, &patch.placement),
        };

        self.report.patches_merged += 1;
        self.report.source_nodes += map.len();
        self.report.global_nodes = self.mesh.node_count();
        debug!(
            "Welded {} nodes into {} new global nodes",
            map.len(),
            self.mesh.node_count() - before
        );
        map
    }

    fn emit_triangles(&mut self, patch: &LocalPatch<'_>, map: &LocalToGlobalMap) {
        for &local in &patch.triangulation.triangles {
            let Some([a, b, c]) = map.triangle(patch.orientation.orient(local)) else {
                self.report.invalid_triangles += 1;
                continue;
            };
            if self.mesh.add_triangle(a, b, c) {
                self.report.triangles_emitted += 1;
            } else {
                self.report.degenerate_triangles += 1;
            }
        }
    }

    fn classify_boundary<F>(
        &mut self,
        boundary: &[BoundaryEdge],
        map: &LocalToGlobalMap,
        owner_face_count: F,
    ) where
        F: Fn(EdgeId) -> Option<usize>,
    {
        for edge in boundary {
            let owners = owner_face_count(edge.edge);
            let Some(class) = owners.and_then(LinkClass::from_owner_count) else {
                warn!("Boundary edge {} has no owner faces ({:?}); skipped", edge.edge, owners);
                self.report.unclassified_edges += 1;
                continue;
            };

            let emitted = classify_polyline(&edge.nodes, class, map, &mut self.links);
            match class {
                LinkClass::Free => self.report.free_links += emitted,
                LinkClass::Manifold => self.report.manifold_links += emitted,
                LinkClass::NonManifold => self.report.non_manifold_links += emitted,
            }
        }
    }

    /// Close the session and package the merged mesh.
    pub fn finish(mut self) -> MergeOutcome {
        self.report.global_nodes = self.mesh.node_count();

        info!(
            "Merged {} patches ({} skipped): {} nodes ({} welded), {} triangles, {} links",
            self.report.patches_merged,
            self.report.patches_skipped,
            self.report.global_nodes,
            self.report.welded_nodes(),
            self.report.triangles_emitted,
            self.report.total_links()
        );

        let triangulation = self.mesh.into_triangulation();
        let output = match self.config.output {
            OutputMode::Triangulation => MergeOutput::Triangulation(triangulation),
            OutputMode::Mesh => MergeOutput::Mesh(Mesh::from_triangulation(triangulation)),
        };

        MergeOutcome {
            output,
            links: self.links,
            report: self.report,
        }
    }
}

/// Merge every face of a body into one mesh.
pub fn merge_shape<S>(source: &S, config: &MergeConfig) -> MergeResult<MergeOutcome>
where
    S: TopologySource + ?Sized,
{
    let mut session = MergeSession::new(config.clone())?;
    let faces = source.faces();
    let owners = |edge: EdgeId| source.owner_face_count(edge);

    if config.parallel_transforms {
        // Placement runs on the pool; welding stays serial and in face order
        let world: Vec<Option<Vec<Point3<f64>>>> = faces
            .par_iter()
            .map(|face| face.patch().map(|patch| patch.world_positions()))
            .collect();
        for (face, world) in faces.iter().zip(world) {
            session.add_face_with_world(face, world, owners);
        }
    } else {
        for face in faces {
            session.add_face(face, owners);
        }
    }

    Ok(session.finish())
}

/// Merge a plain list of triangulations. Never produces links.
pub fn merge_triangulations(
    triangulations: &[Triangulation],
    config: &MergeConfig,
) -> MergeResult<MergeOutcome> {
    let mut session = MergeSession::new(config.clone())?;
    for triangulation in triangulations {
        session.add_triangulation(triangulation);
    }
    Ok(session.finish())
}
