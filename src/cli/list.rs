// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use clap::Args;
use patchbed::{Fixture, Platform};

/// List the fixture corpus.
#[derive(Args, Debug)]
pub struct Options {
    /// Platform whose marker contract to show (defaults to the host).
    #[clap(long, value_name = "PLATFORM")]
    platform: Option<Platform>,
}

impl Options {
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        let platform = self.platform.unwrap_or_else(Platform::host);

        println!("fixtures for {platform}:");
        for fixture in Fixture::ALL {
            let (a, b) = fixture.operands();
            let markers = fixture.markers(platform).join(", ");
            let pinned = if fixture.template(platform).is_some() {
                "pinned"
            } else {
                "compiler-scheduled"
            };
            println!(
                "  {fixture}: calc({a}, {b}) = {} (patched: {}), markers: [{markers}], {pinned}",
                fixture.unpatched(),
                fixture.patched(),
            );
        }
        Ok(ExitCode::SUCCESS)
    }
}
