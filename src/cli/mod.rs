// SPDX-License-Identifier: Apache-2.0

//! CLI surface: enumerate, render, inspect and verify fixtures.

mod check;
mod emit;
mod inspect;
mod list;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Fixture toolkit for binary patchers and instrumenters.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the fixture corpus with operands and expected oracle values.
    List(list::Options),
    /// Render the canonical assembly listing for a fixture.
    Emit(emit::Options),
    /// Resolve `calc` and marker symbols in a compiled fixture.
    Inspect(inspect::Options),
    /// Run a fixture binary and verify its oracle line.
    Check(check::Options),
}

impl Options {
    pub fn execute(self) -> anyhow::Result<ExitCode> {
        match self.cmd {
            Command::List(opts) => opts.execute(),
            Command::Emit(opts) => opts.execute(),
            Command::Inspect(opts) => opts.execute(),
            Command::Check(opts) => opts.execute(),
        }
    }
}
