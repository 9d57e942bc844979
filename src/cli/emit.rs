// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use patchbed::{emit, Fixture, Platform};

/// Render the canonical assembly listing for a fixture.
#[derive(Args, Debug)]
pub struct Options {
    /// Fixture to render.
    #[clap(value_name = "FIXTURE")]
    fixture: Fixture,

    /// Target platform (defaults to the host).
    #[clap(long, value_name = "PLATFORM")]
    platform: Option<Platform>,

    /// Write the listing to a file instead of stdout.
    #[clap(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,
}

impl Options {
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        let platform = self.platform.unwrap_or_else(Platform::host);
        let listing = emit::render(self.fixture, platform)?;

        match self.output {
            Some(path) => fs::write(&path, listing)
                .with_context(|| format!("failed to write `{path}`"))?,
            None => print!("{listing}"),
        }
        Ok(ExitCode::SUCCESS)
    }
}
