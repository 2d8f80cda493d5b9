// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Merge configuration

use super::error::{check_tolerance, MergeError, MergeResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Weld tolerance used when none is configured.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Configuration file picked up by [`MergeConfig::load`].
pub const DEFAULT_CONFIG_FILE: &str = "merge.toml";

/// Shape of the merged mesh handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Bare node array plus triangle index array
    #[default]
    Triangulation,
    /// [`Mesh`](crate::geometry::Mesh) wrapper with per-vertex normals
    Mesh,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triangulation" => Ok(OutputMode::Triangulation),
            "mesh" => Ok(OutputMode::Mesh),
            other => Err(format!("unknown output mode: {}", other)),
        }
    }
}

/// Merge configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Weld distance; also the spatial hash cell size
    pub tolerance: f64,
    /// Classify boundary polylines into free / manifold / non-manifold links
    pub collect_links: bool,
    /// Output packaging
    pub output: OutputMode,
    /// Compute placed node positions on the rayon pool before welding
    pub parallel_transforms: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            collect_links: false,
            output: OutputMode::Triangulation,
            parallel_transforms: false,
        }
    }
}

impl MergeConfig {
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    pub fn with_links(mut self, collect_links: bool) -> Self {
        self.collect_links = collect_links;
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn with_parallel_transforms(mut self, parallel: bool) -> Self {
        self.parallel_transforms = parallel;
        self
    }

    /// Reject configurations a merge cannot run with.
    pub fn validate(&self) -> MergeResult<()> {
        check_tolerance(self.tolerance).map(|_| ())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> MergeResult<Self> {
        let config: MergeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> MergeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load `merge.toml` if present, then apply environment variable overrides.
    pub fn load() -> MergeResult<Self> {
        let mut config = if PathBuf::from(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `POLYMERGE_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> MergeResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("POLYMERGE_TOLERANCE") {
            self.tolerance = parse_override("POLYMERGE_TOLERANCE", &value)?;
        }

        if let Some(value) = lookup("POLYMERGE_COLLECT_LINKS") {
            self.collect_links = parse_override("POLYMERGE_COLLECT_LINKS", &value)?;
        }

        if let Some(value) = lookup("POLYMERGE_OUTPUT") {
            self.output = parse_override("POLYMERGE_OUTPUT", &value)?;
        }

        if let Some(value) = lookup("POLYMERGE_PARALLEL") {
            self.parallel_transforms = parse_override("POLYMERGE_PARALLEL", &value)?;
        }

        Ok(())
    }

    pub fn to_toml_string(&self) -> MergeResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> MergeResult<T> {
    value.trim().parse().map_err(|_| MergeError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}
