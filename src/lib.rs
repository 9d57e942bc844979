// SPDX-License-Identifier: Apache-2.0

//! Deterministic `calc` target fixtures for binary patchers and instrumenters.
//!
//! A fixture is a tiny executable exposing `calc(a, b)` whose machine code is
//! pinned at the source level, with globally visible marker symbols
//! (`calc_add_insn`, `calc_adrp_insn`) anchoring the instructions an external
//! patcher rewrites or hooks. Each fixture prints `calc(A, B) = R` with fixed
//! literal operands; that line is the oracle a harness compares before and
//! after patching.
//!
//! This crate carries three things:
//!
//! - the fixture binaries themselves (`src/bin/*`), built from the
//!   [`define_calc!`] macro arms in [`targets`];
//! - the code-generation table behind them: per-platform instruction
//!   templates ([`template`]), fixture metadata ([`fixture`]), replacement
//!   opcodes ([`patch`]) and an assembly renderer ([`emit`]);
//! - inspection tooling: oracle parsing ([`oracle`]) and ELF symbol-layout
//!   validation ([`elf`]), surfaced through the `patchbed` CLI.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(rust_2018_idioms)]

pub mod arch;
pub mod elf;
pub mod emit;
pub mod fixture;
pub mod oracle;
pub mod patch;
pub mod targets;
pub mod template;

pub use arch::Platform;
pub use fixture::Fixture;
