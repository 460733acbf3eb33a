// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Join orchestration — compute the normalization target, stage every input
// in order, merge the staged pages into the output document, and clean up
// the scratch area on every exit path.
//
// One join per `DocumentJoiner` at a time; concurrent joins are a caller
// concern.  All external invocations are blocking, so latency-sensitive
// callers run the join off their own hot thread.

use std::path::{Path, PathBuf};

use bundwerk_core::error::{BundwerkError, Result};
use bundwerk_core::{ImageDescriptor, JoinConfig, NormalizationTarget, StagedFile};
use tracing::{info, instrument, warn};

use crate::normalize;
use crate::resample::ImageResampler;
use crate::scratch::ScratchArea;
use crate::tool::ImageTool;

/// Orchestrates the normalization-and-join pipeline.
pub struct DocumentJoiner<T: ImageTool> {
    tool: T,
    scratch: ScratchArea,
}

impl<T: ImageTool> DocumentJoiner<T> {
    /// Joiner with the configured scratch area under the platform temp dir.
    pub fn new(tool: T, config: &JoinConfig) -> Self {
        Self {
            tool,
            scratch: ScratchArea::from_config(config),
        }
    }

    /// Joiner with an explicit scratch area (tests use this).
    pub fn with_scratch(tool: T, scratch: ScratchArea) -> Self {
        Self { tool, scratch }
    }

    /// Join the probed inputs, in order, into one document at `output`.
    ///
    /// The first probe-stage or merge failure aborts the join; no partial
    /// document is ever produced.  The scratch area is cleaned up on every
    /// exit path, and a cleanup failure never overrides an otherwise
    /// successful result — it is logged and swallowed.
    #[instrument(skip_all, fields(inputs = descriptors.len(), output = %output.display()))]
    pub fn join(&self, descriptors: &[ImageDescriptor], output: &Path) -> Result<PathBuf> {
        if descriptors.is_empty() {
            // Checked before `ensure`, so an empty join never creates the
            // scratch directory.
            return Err(BundwerkError::EmptyInput);
        }

        let target = normalize::compute_target(descriptors)?;
        info!(
            width = target.width,
            density = target.density,
            "normalization target computed"
        );

        let result = self.stage_and_merge(descriptors, target, output);

        if let Err(cleanup_err) = self.scratch.cleanup() {
            warn!(error = %cleanup_err, "scratch cleanup failed");
        }

        match &result {
            Ok(path) => info!(output = %path.display(), "join complete"),
            Err(err) => warn!(error = %err, "join failed"),
        }
        result
    }

    /// Steps 3–5: ensure scratch, stage in input order, merge.  The caller
    /// runs cleanup regardless of this function's outcome.
    fn stage_and_merge(
        &self,
        descriptors: &[ImageDescriptor],
        target: NormalizationTarget,
        output: &Path,
    ) -> Result<PathBuf> {
        self.scratch.ensure()?;

        let resampler = ImageResampler::new(&self.tool);
        let mut staged = Vec::with_capacity(descriptors.len());
        for (index, descriptor) in descriptors.iter().enumerate() {
            let path = self.scratch.allocate(index);
            resampler.stage(descriptor, target, &path)?;
            staged.push(StagedFile { index, path });
        }

        // Merge only ever sees the fully-staged ordered list.
        let pages: Vec<PathBuf> = staged.into_iter().map(|s| s.path).collect();
        self.tool.merge(&pages, output)?;
        Ok(output.to_path_buf())
    }
}
