// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Normalization target computation.  Pure — no I/O.
//
// Target width is the minimum width across inputs; target density is the
// maximum, across inputs, of each image's own larger density axis.  The
// density policy deliberately compares axis-maxima per image rather than
// taking a per-axis maximum across images.

use bundwerk_core::error::{BundwerkError, Result};
use bundwerk_core::{ImageDescriptor, NormalizationTarget};

/// Compute the common target for a join invocation.
///
/// Recomputed fresh on every call — targets are never cached because the
/// input set can change between joins.  An empty slice is an `EmptyInput`
/// error.
pub fn compute_target(descriptors: &[ImageDescriptor]) -> Result<NormalizationTarget> {
    let width = descriptors
        .iter()
        .map(|d| d.dimension.x)
        .min()
        .ok_or(BundwerkError::EmptyInput)?;

    let density = descriptors
        .iter()
        .map(|d| d.density.max())
        .max()
        .ok_or(BundwerkError::EmptyInput)?;

    Ok(NormalizationTarget { width, density })
}

/// Whether this descriptor needs a resampling transform to reach the target.
///
/// An exact match on both width and axis-max density is the only case where
/// a raw byte copy suffices.
pub fn needs_resample(descriptor: &ImageDescriptor, target: NormalizationTarget) -> bool {
    descriptor.dimension.x != target.width || descriptor.density.max() != target.density
}
