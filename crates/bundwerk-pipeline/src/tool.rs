// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External image tool capability.
//
// The pipeline needs exactly three operations from an image tool — inspect,
// resample, merge — plus a version banner for the CLI's availability check.
// `Magick` is the real implementation, spawning ImageMagick's `identify` and
// `convert`; tests substitute fakes so no external program is ever required.

use std::path::{Path, PathBuf};
use std::process::Command;

use bundwerk_core::error::{BundwerkError, Result};
use bundwerk_core::JoinConfig;
use tracing::debug;

/// The three logical operations the pipeline requires from an external image
/// tool, plus a version probe.  All calls are blocking.
pub trait ImageTool {
    /// Inspect an image.  The returned string must contain four numeric
    /// tokens: width, height, horizontal density, vertical density.
    fn identify(&self, path: &Path) -> Result<String>;

    /// Resample `source` into `destination`.  `width_percent` and `density`
    /// are independent, optional adjustments; both may apply at once.
    fn resample(
        &self,
        source: &Path,
        destination: &Path,
        width_percent: Option<u32>,
        density: Option<u32>,
    ) -> Result<()>;

    /// Combine the ordered `inputs` into one document at `output`.
    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()>;

    /// First line of the tool's version banner.
    fn version(&self) -> Result<String>;
}

impl<T: ImageTool + ?Sized> ImageTool for &T {
    fn identify(&self, path: &Path) -> Result<String> {
        (**self).identify(path)
    }

    fn resample(
        &self,
        source: &Path,
        destination: &Path,
        width_percent: Option<u32>,
        density: Option<u32>,
    ) -> Result<()> {
        (**self).resample(source, destination, width_percent, density)
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        (**self).merge(inputs, output)
    }

    fn version(&self) -> Result<String> {
        (**self).version()
    }
}

/// ImageMagick-backed implementation of [`ImageTool`].
#[derive(Debug, Clone)]
pub struct Magick {
    identify_program: String,
    convert_program: String,
}

impl Magick {
    pub fn new(config: &JoinConfig) -> Self {
        Self {
            identify_program: config.identify_program.clone(),
            convert_program: config.convert_program.clone(),
        }
    }

    /// Run a command to completion and return its captured stdout.
    ///
    /// A non-zero exit status is an error; stderr is folded into the error
    /// message so the caller can classify it.
    fn run(&self, program: &str, args: &[String]) -> std::result::Result<String, String> {
        debug!(program, ?args, "executing command");
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| format!("{program}: {e}"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ImageTool for Magick {
    fn identify(&self, path: &Path) -> Result<String> {
        let args = vec![
            "-format".to_string(),
            "%w %h %x %y".to_string(),
            path.display().to_string(),
        ];
        self.run(&self.identify_program, &args)
            .map_err(BundwerkError::Probe)
    }

    fn resample(
        &self,
        source: &Path,
        destination: &Path,
        width_percent: Option<u32>,
        density: Option<u32>,
    ) -> Result<()> {
        let mut args = vec![source.display().to_string()];
        if let Some(percent) = width_percent {
            args.push("-resize".to_string());
            args.push(format!("{percent}%"));
        }
        if let Some(density) = density {
            args.push("-density".to_string());
            args.push(density.to_string());
        }
        args.push(destination.display().to_string());

        self.run(&self.convert_program, &args)
            .map(|_| ())
            .map_err(BundwerkError::Resample)
    }

    fn merge(&self, inputs: &[PathBuf], output: &Path) -> Result<()> {
        let mut args: Vec<String> = inputs.iter().map(|p| p.display().to_string()).collect();
        args.push(output.display().to_string());

        self.run(&self.convert_program, &args)
            .map(|_| ())
            .map_err(BundwerkError::Merge)
    }

    fn version(&self) -> Result<String> {
        let banner = self
            .run(&self.identify_program, &["-version".to_string()])
            .map_err(BundwerkError::Probe)?;
        banner
            .lines()
            .next()
            .map(str::to_string)
            .ok_or_else(|| BundwerkError::Probe("empty version banner".into()))
    }
}
