// SPDX-License-Identifier: Apache-2.0

//! Renders a fixture template to a canonical GNU assembly listing.
//!
//! The listing mirrors what the corresponding `global_asm!` body assembles
//! to, directive for directive, so it doubles as documentation of the exact
//! byte layout an external patcher will encounter.

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::arch::Platform;
use crate::fixture::Fixture;
use crate::template::SYM_CALC;

/// Renders the `calc` listing for `fixture` on `platform`.
///
/// Fails for variants without a fixed template (the portable fallback and
/// the compiler-scheduled with-original x86-64 body).
pub fn render(fixture: Fixture, platform: Platform) -> Result<String> {
    let template = fixture
        .template(platform)
        .with_context(|| format!("{fixture} has no fixed instruction template on {platform}"))?;

    let calc = platform.symbol(SYM_CALC);
    let mut out = String::new();

    writeln!(out, "    .text")?;
    writeln!(out, "    .global {calc}")?;
    for (marker, _) in template.markers() {
        writeln!(out, "    .global {}", platform.symbol(marker))?;
    }
    if platform.is_elf() {
        let kind = match platform {
            Platform::LinuxAarch64 => "%function",
            _ => "@function",
        };
        writeln!(out, "    .type {calc}, {kind}")?;
    }
    writeln!(out, "{calc}:")?;
    for insn in template.insns {
        if let Some(marker) = insn.marker {
            writeln!(out, "{}:", platform.symbol(marker))?;
        }
        writeln!(out, "    {}", insn.text)?;
    }
    if platform.is_elf() {
        writeln!(out, "    .size {calc}, .-{calc}")?;
    }

    Ok(out)
}
