// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bundwerk-pipeline — Normalization-and-join pipeline for Bundwerk.
//
// Probes each input image's dimensions and density, computes a common target
// width and density across the set, stages a normalized copy of every image
// in a scratch directory (raw byte copy when no transform is needed), and
// invokes an external merge capability to combine the staged pages into one
// output document.  All image work is delegated to an external tool behind
// the `ImageTool` trait.

pub mod join;
pub mod normalize;
pub mod probe;
pub mod resample;
pub mod scratch;
pub mod tool;

// Re-export the primary structs so callers can use `bundwerk_pipeline::DocumentJoiner` etc.
pub use join::DocumentJoiner;
pub use probe::ImageProbe;
pub use resample::ImageResampler;
pub use scratch::ScratchArea;
pub use tool::{ImageTool, Magick};
