// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Staging step — produce a normalized copy of one input at a destination
// path: a byte-for-byte copy when the input already matches the target, a
// resampling transform via the external tool otherwise.

use std::fs;
use std::path::Path;

use bundwerk_core::error::{BundwerkError, Result};
use bundwerk_core::{ImageDescriptor, NormalizationTarget};
use tracing::debug;

use crate::normalize::needs_resample;
use crate::tool::ImageTool;

/// Stages one image into the scratch area via the external tool.
pub struct ImageResampler<T: ImageTool> {
    tool: T,
}

impl<T: ImageTool> ImageResampler<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    /// Produce the normalized copy of `descriptor` at `destination`.
    ///
    /// The resize ratio and density setting are independent adjustments:
    /// each is passed to the tool only when the descriptor differs from the
    /// target on that axis.  Any failure aborts the whole join — no partial
    /// documents.
    pub fn stage(
        &self,
        descriptor: &ImageDescriptor,
        target: NormalizationTarget,
        destination: &Path,
    ) -> Result<()> {
        if !needs_resample(descriptor, target) {
            debug!(
                source = %descriptor.path.display(),
                destination = %destination.display(),
                "exact match, copying verbatim"
            );
            fs::copy(&descriptor.path, destination).map_err(|e| {
                BundwerkError::Resample(format!("copy {}: {e}", descriptor.path.display()))
            })?;
            return Ok(());
        }

        let width_percent = (descriptor.dimension.x != target.width)
            .then(|| resize_percent(target.width, descriptor.dimension.x));
        let density = (descriptor.density.max() != target.density).then_some(target.density);

        debug!(
            source = %descriptor.path.display(),
            destination = %destination.display(),
            ?width_percent,
            ?density,
            "resampling"
        );
        self.tool
            .resample(&descriptor.path, destination, width_percent, density)
    }
}

/// Resize ratio as a whole percentage, rounded.
fn resize_percent(target_width: u32, source_width: u32) -> u32 {
    (f64::from(target_width) / f64::from(source_width) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundwerk_core::PixelPair;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Fake tool recording every resample invocation.
    #[derive(Default)]
    struct RecordingTool {
        calls: RefCell<Vec<(PathBuf, PathBuf, Option<u32>, Option<u32>)>>,
    }

    impl ImageTool for RecordingTool {
        fn identify(&self, _path: &Path) -> Result<String> {
            unreachable!("staging never identifies")
        }

        fn resample(
            &self,
            source: &Path,
            destination: &Path,
            width_percent: Option<u32>,
            density: Option<u32>,
        ) -> Result<()> {
            self.calls.borrow_mut().push((
                source.to_path_buf(),
                destination.to_path_buf(),
                width_percent,
                density,
            ));
            Ok(())
        }

        fn merge(&self, _inputs: &[PathBuf], _output: &Path) -> Result<()> {
            unreachable!("staging never merges")
        }

        fn version(&self) -> Result<String> {
            Ok("RecordingTool 1.0".into())
        }
    }

    fn descriptor(path: &Path, width: u32, density: u32) -> ImageDescriptor {
        ImageDescriptor {
            path: path.to_path_buf(),
            dimension: PixelPair::new(width, width * 3 / 4),
            density: PixelPair::new(density, density),
        }
    }

    #[test]
    fn exact_match_is_copied_verbatim() {
        let tmp = TempDir::new().expect("tempdir");
        let source = tmp.path().join("b.jpg");
        std::fs::write(&source, b"original bytes").expect("write source");
        let destination = tmp.path().join("file-000.jpg");

        let tool = RecordingTool::default();
        let resampler = ImageResampler::new(&tool);
        let target = NormalizationTarget {
            width: 800,
            density: 150,
        };

        resampler
            .stage(&descriptor(&source, 800, 150), target, &destination)
            .expect("stage");

        assert!(tool.calls.borrow().is_empty());
        assert_eq!(
            std::fs::read(&destination).expect("read staged"),
            b"original bytes"
        );
    }

    #[test]
    fn width_mismatch_passes_rounded_percent_only() {
        let tool = RecordingTool::default();
        let resampler = ImageResampler::new(&tool);
        let target = NormalizationTarget {
            width: 800,
            density: 150,
        };

        resampler
            .stage(
                &descriptor(Path::new("/photos/a.jpg"), 1200, 150),
                target,
                Path::new("/scratch/file-000.jpg"),
            )
            .expect("stage");

        let calls = tool.calls.borrow();
        // 800/1200 = 66.67% → rounds to 67; density matches so it is omitted.
        assert_eq!(calls[0].2, Some(67));
        assert_eq!(calls[0].3, None);
    }

    #[test]
    fn density_mismatch_passes_density_only() {
        let tool = RecordingTool::default();
        let resampler = ImageResampler::new(&tool);
        let target = NormalizationTarget {
            width: 800,
            density: 150,
        };

        resampler
            .stage(
                &descriptor(Path::new("/photos/a.jpg"), 800, 72),
                target,
                Path::new("/scratch/file-000.jpg"),
            )
            .expect("stage");

        let calls = tool.calls.borrow();
        assert_eq!(calls[0].2, None);
        assert_eq!(calls[0].3, Some(150));
    }

    #[test]
    fn both_adjustments_apply_simultaneously() {
        let tool = RecordingTool::default();
        let resampler = ImageResampler::new(&tool);
        let target = NormalizationTarget {
            width: 800,
            density: 150,
        };

        resampler
            .stage(
                &descriptor(Path::new("/photos/a.jpg"), 1000, 72),
                target,
                Path::new("/scratch/file-000.jpg"),
            )
            .expect("stage");

        let calls = tool.calls.borrow();
        assert_eq!(calls[0].2, Some(80));
        assert_eq!(calls[0].3, Some(150));
    }

    #[test]
    fn copy_failure_is_a_resample_error() {
        let tmp = TempDir::new().expect("tempdir");
        let tool = RecordingTool::default();
        let resampler = ImageResampler::new(&tool);
        let target = NormalizationTarget {
            width: 800,
            density: 150,
        };

        // Source does not exist, so the verbatim copy fails.
        let missing = tmp.path().join("missing.jpg");
        let err = resampler
            .stage(
                &descriptor(&missing, 800, 150),
                target,
                &tmp.path().join("file-000.jpg"),
            )
            .unwrap_err();
        assert!(matches!(err, BundwerkError::Resample(_)));
    }

    #[test]
    fn resize_percent_rounds_to_nearest() {
        assert_eq!(resize_percent(800, 1000), 80);
        assert_eq!(resize_percent(800, 1200), 67);
        assert_eq!(resize_percent(1, 3), 33);
        assert_eq!(resize_percent(2, 3), 67);
    }
}
