// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bundwerk.

use thiserror::Error;

/// Top-level error type for all Bundwerk operations.
#[derive(Debug, Error)]
pub enum BundwerkError {
    // -- Pipeline errors --
    #[error("no input images supplied")]
    EmptyInput,

    #[error("image inspection failed: {0}")]
    Probe(String),

    #[error("image resampling failed: {0}")]
    Resample(String),

    #[error("document merge failed: {0}")]
    Merge(String),

    #[error("scratch directory error: {0}")]
    Scratch(String),

    // -- Filesystem --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BundwerkError>;
