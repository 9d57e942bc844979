// SPDX-License-Identifier: Apache-2.0

use std::process::{Command, ExitCode};

use anyhow::{ensure, Context};
use camino::Utf8PathBuf;
use clap::Args;
use patchbed::{elf, oracle, Fixture, Platform};
use tracing::debug;

/// Run a fixture binary and verify its oracle line.
#[derive(Args, Debug)]
pub struct Options {
    /// Fixture binary to run.
    #[clap(value_name = "BINARY")]
    binary: Utf8PathBuf,

    /// The fixture family the binary was built from.
    #[clap(value_name = "FIXTURE")]
    fixture: Fixture,

    /// Expect the post-patch oracle instead of the unpatched one.
    #[clap(long)]
    patched: bool,

    /// Also validate the marker symbol layout against the template (ELF only).
    #[clap(long)]
    verify_markers: bool,
}

impl Options {
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        let output = Command::new(self.binary.as_std_path())
            .output()
            .with_context(|| format!("failed to run `{}`", self.binary))?;
        ensure!(
            output.status.success(),
            "fixture exited with {}",
            output.status
        );

        let stdout = String::from_utf8(output.stdout).context("fixture wrote non-UTF-8 output")?;
        let line = stdout.lines().next().context("fixture printed nothing")?;
        debug!(line, "fixture oracle");

        let (a, b, result) = oracle::parse(line)?;
        let (want_a, want_b) = self.fixture.operands();
        ensure!(
            (a, b) == (want_a, want_b),
            "unexpected operands: got calc({a}, {b}), want calc({want_a}, {want_b})"
        );

        let want = if self.patched {
            self.fixture.patched()
        } else {
            self.fixture.unpatched()
        };
        ensure!(result == want, "oracle mismatch: got {result}, want {want}");

        if self.verify_markers {
            self.verify_layout()?;
        }

        println!("ok: {line}");
        Ok(ExitCode::SUCCESS)
    }

    fn verify_layout(&self) -> anyhow::Result<()> {
        let platform = Platform::host();
        let layout = elf::read(&self.binary)?;
        layout.validate()?;

        for marker in self.fixture.markers(platform) {
            ensure!(
                layout.marker_offset(marker).is_some(),
                "marker `{marker}` missing from `{}`",
                self.binary
            );
        }
        if let Some(template) = self.fixture.template(platform) {
            for (marker, offset) in template.markers() {
                let found = layout.marker_offset(marker);
                ensure!(
                    found == Some(offset as u64),
                    "marker `{marker}` at offset {found:?}, template says {offset:#x}"
                );
            }
        }
        Ok(())
    }
}
