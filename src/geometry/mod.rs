// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, fixtures and checks

mod analytics;
mod bbox;
mod mesh;
pub mod mesh_utils;
mod primitives;

pub use analytics::{analyze, signed_volume, surface_area, GeometryStats};
pub use bbox::BoundingBox;
pub use mesh::{Mesh, Triangle, Vertex};
pub use primitives::Primitive;
