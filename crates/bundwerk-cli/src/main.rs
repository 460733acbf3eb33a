// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bundwerk — join images into one multi-page document.
//
// Entry point.  Initialises logging, probes every input in order, runs the
// join pipeline, and prints the output path.  This is the thin caller layer:
// all decision logic lives in bundwerk-pipeline.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use bundwerk_core::error::Result;
use bundwerk_core::human_errors::humanize_error;
use bundwerk_core::{ImageDescriptor, JoinConfig, UnprobedImage};
use bundwerk_pipeline::{DocumentJoiner, ImageProbe, ImageTool, Magick};

/// Join image files into one multi-page document, normalizing width and
/// density across the set first.
#[derive(Debug, Parser)]
#[command(name = "bundwerk", version, about)]
struct Cli {
    /// Input images, in page order.
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Destination path of the joined document.
    #[arg(short, long)]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => println!("{}", output.display()),
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("{}", human.message);
            eprintln!("{}", human.suggestion);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let config = JoinConfig::default();
    let magick = Magick::new(&config);

    // Availability check: log the tool's banner, or warn early so a missing
    // install is obvious before the first probe fails.
    match magick.version() {
        Ok(banner) => info!(tool = %banner, "image tool available"),
        Err(err) => warn!(error = %err, "image tool not detected"),
    }

    let probe = ImageProbe::new(&magick);
    let mut descriptors: Vec<ImageDescriptor> = Vec::with_capacity(cli.images.len());
    for path in &cli.images {
        let descriptor = probe.probe(UnprobedImage::new(path))?;
        info!(
            path = %descriptor.path.display(),
            dimension = %descriptor.dimension,
            density = %descriptor.density,
            "probed"
        );
        descriptors.push(descriptor);
    }

    let joiner = DocumentJoiner::new(&magick, &config);
    joiner.join(&descriptors, &cli.output)
}
