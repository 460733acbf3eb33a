// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image inspection — turns an `UnprobedImage` into an `ImageDescriptor` by
// parsing the external tool's identify output (width, height, x-density,
// y-density).

use bundwerk_core::error::{BundwerkError, Result};
use bundwerk_core::{ImageDescriptor, PixelPair, UnprobedImage};
use tracing::debug;

use crate::tool::ImageTool;

/// Inspects input files via the external tool.
pub struct ImageProbe<T: ImageTool> {
    tool: T,
}

impl<T: ImageTool> ImageProbe<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    /// Probe one file, completing the two-phase descriptor construction.
    ///
    /// Any malformed or incomplete identify output is a `Probe` error, never
    /// a panic.
    pub fn probe(&self, image: UnprobedImage) -> Result<ImageDescriptor> {
        let output = self.tool.identify(image.path())?;
        let (dimension, density) = parse_identify_output(&output).map_err(|detail| {
            BundwerkError::Probe(format!("{}: {detail}", image.path().display()))
        })?;

        debug!(
            path = %image.path().display(),
            %dimension,
            %density,
            "image probed"
        );
        Ok(image.into_descriptor(dimension, density))
    }
}

/// Parse identify output into (dimension, density).
///
/// Expects four whitespace-separated numeric tokens.  Density tokens may
/// carry a fractional part (ImageMagick reports e.g. "72.009") and are
/// truncated to whole units.
fn parse_identify_output(output: &str) -> std::result::Result<(PixelPair, PixelPair), String> {
    let tokens: Vec<&str> = output.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(format!(
            "expected 4 numeric tokens, got {}: {output:?}",
            tokens.len()
        ));
    }

    let width = parse_pixel_token(tokens[0])?;
    let height = parse_pixel_token(tokens[1])?;
    let density_x = parse_density_token(tokens[2])?;
    let density_y = parse_density_token(tokens[3])?;

    Ok((
        PixelPair::new(width, height),
        PixelPair::new(density_x, density_y),
    ))
}

fn parse_pixel_token(token: &str) -> std::result::Result<u32, String> {
    let value: u32 = token
        .parse()
        .map_err(|_| format!("invalid pixel value {token:?}"))?;
    if value == 0 {
        return Err(format!("pixel value must be positive, got {token:?}"));
    }
    Ok(value)
}

fn parse_density_token(token: &str) -> std::result::Result<u32, String> {
    let value: f64 = token
        .parse()
        .map_err(|_| format!("invalid density value {token:?}"))?;
    if !value.is_finite() || value < 1.0 {
        return Err(format!("density must be positive, got {token:?}"));
    }
    // Fractional densities are truncated, not rounded.
    Ok(value as u32)
}
