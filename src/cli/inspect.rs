// SPDX-License-Identifier: Apache-2.0

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Args;
use patchbed::elf;

/// Resolve `calc` and marker symbols in a compiled fixture.
#[derive(Args, Debug)]
pub struct Options {
    /// Compiled fixture to inspect (ELF only).
    #[clap(value_name = "BINARY")]
    binary: Utf8PathBuf,

    /// Emit JSON instead of a plain listing.
    #[clap(long)]
    json: bool,
}

impl Options {
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        let layout = elf::read(&self.binary)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&layout)?);
        } else {
            println!(
                "calc: {:#x} ({} bytes)",
                layout.calc.addr, layout.calc.size
            );
            for marker in &layout.markers {
                let offset = marker.addr.wrapping_sub(layout.calc.addr);
                println!("  {} = calc+{offset:#x}", marker.name);
            }
            match &layout.magic {
                Some(magic) => println!("g_magic: {:#x}", magic.addr),
                None => println!("g_magic: absent"),
            }
        }

        layout.validate()?;
        Ok(ExitCode::SUCCESS)
    }
}
