// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages.
//
// Every technical error is mapped to plain English with a clear suggestion,
// so the CLI (or any other front end) never shows a raw tool stderr dump.

use crate::error::BundwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk or tool hiccup — retrying the join may work.
    Transient,
    /// User must do something (install the tool, free disk space, pick files).
    ActionRequired,
    /// Cannot be fixed by retrying — unreadable or unsupported input.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying the same join might succeed.
    pub retriable: bool,
    /// Severity level (drives presentation).
    pub severity: Severity,
}

/// Convert a `BundwerkError` into a `HumanError`.
pub fn humanize_error(err: &BundwerkError) -> HumanError {
    match err {
        BundwerkError::EmptyInput => HumanError {
            message: "No images to join.".into(),
            suggestion: "Add at least one image file, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BundwerkError::Probe(detail) => {
            if detail.contains("No such file") || detail.contains("not found") {
                HumanError {
                    message: "The image tool isn't available.".into(),
                    suggestion: "Install ImageMagick (or another tool providing \
                                 `identify` and `convert`), then try again."
                        .into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "One of the images couldn't be read.".into(),
                    suggestion: format!(
                        "Check that every input is a valid image file. ({detail})"
                    ),
                    retriable: false,
                    severity: Severity::Permanent,
                }
            }
        }

        BundwerkError::Resample(detail) => HumanError {
            message: "An image couldn't be converted.".into(),
            suggestion: format!(
                "Make sure there is free disk space and the file is readable. ({detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        BundwerkError::Merge(detail) => HumanError {
            message: "The final document couldn't be created.".into(),
            suggestion: format!(
                "Check that the destination folder is writable. ({detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        BundwerkError::Scratch(detail) => HumanError {
            message: "The temporary work folder had a problem.".into(),
            suggestion: format!(
                "Check free space and permissions on the system temp directory. ({detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        BundwerkError::Io(detail) => HumanError {
            message: "A file couldn't be read or written.".into(),
            suggestion: format!("Check file permissions and disk space. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
