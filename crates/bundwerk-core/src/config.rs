// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the join pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Name of the scratch subdirectory under the platform temp directory.
    pub scratch_dir_name: String,
    /// Program used for image inspection (`identify -format "%w %h %x %y"`).
    pub identify_program: String,
    /// Program used for resampling and merging.
    pub convert_program: String,
}

impl JoinConfig {
    /// Full path of the scratch directory: platform temp dir + configured name.
    pub fn scratch_dir(&self) -> PathBuf {
        std::env::temp_dir().join(&self.scratch_dir_name)
    }
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            scratch_dir_name: "bundwerk-temp".into(),
            identify_program: "identify".into(),
            convert_program: "convert".into(),
        }
    }
}
