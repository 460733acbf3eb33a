// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bundwerk join pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A pair of pixel measurements — either a width × height dimension or a
/// horizontal × vertical density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPair {
    pub x: u32,
    pub y: u32,
}

impl PixelPair {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// The larger of the two axes.  Density comparisons throughout the
    /// pipeline use an image's own larger axis.
    pub fn max(&self) -> u32 {
        self.x.max(self.y)
    }
}

impl std::fmt::Display for PixelPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \u{d7} {}", self.x, self.y)
    }
}

/// An input file that has not yet been inspected.
///
/// Only a successful probe turns this into an [`ImageDescriptor`]; the join
/// pipeline never accepts an `UnprobedImage`, so normalizing an uninspected
/// file is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnprobedImage {
    path: PathBuf,
}

impl UnprobedImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Attach probed metadata, completing the two-phase construction.
    pub fn into_descriptor(self, dimension: PixelPair, density: PixelPair) -> ImageDescriptor {
        ImageDescriptor {
            path: self.path,
            dimension,
            density,
        }
    }
}

/// Metadata for one input image: where it lives, how large it is in pixels,
/// and its horizontal/vertical density.  Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub path: PathBuf,
    pub dimension: PixelPair,
    pub density: PixelPair,
}

/// The common width and density every staged page is normalized to.
///
/// Derived fresh for every join invocation — the input set can change
/// between calls, so a target is never cached or reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationTarget {
    /// Minimum width across all inputs.
    pub width: u32,
    /// Maximum, across all inputs, of each image's own larger density axis.
    pub density: u32,
}

/// A normalized copy of one input, staged in the scratch area and awaiting
/// the merge step.  `index` is the position in the join order and determines
/// the page order of the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub index: usize,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_pair_max_picks_larger_axis() {
        assert_eq!(PixelPair::new(72, 150).max(), 150);
        assert_eq!(PixelPair::new(300, 96).max(), 300);
        assert_eq!(PixelPair::new(100, 100).max(), 100);
    }

    #[test]
    fn pixel_pair_display_uses_multiplication_sign() {
        assert_eq!(PixelPair::new(800, 600).to_string(), "800 \u{d7} 600");
    }

    #[test]
    fn probe_completes_two_phase_construction() {
        let unprobed = UnprobedImage::new("/photos/a.jpg");
        let descriptor =
            unprobed.into_descriptor(PixelPair::new(1000, 750), PixelPair::new(72, 72));
        assert_eq!(descriptor.path, PathBuf::from("/photos/a.jpg"));
        assert_eq!(descriptor.dimension.x, 1000);
        assert_eq!(descriptor.density.max(), 72);
    }
}
