// SPDX-License-Identifier: Apache-2.0

//! The fixture registry: operands, expected results and marker contracts.
//!
//! Operands are chosen so that a semantics-changing patch is always visible
//! in the oracle (`a + b != a * b` for every pair) and a misapplied patch
//! never lands on the right answer by coincidence.

use core::fmt;
use core::str::FromStr;

use anyhow::bail;

use crate::arch::Platform;
use crate::template::{
    CalcTemplate, ADD_GENERIC_AARCH64, ADD_LINUX_AARCH64, ADD_LINUX_X86_64, ADD_MACOS_X86_64,
    ADRP_LINUX_AARCH64, MUL_REGS_LINUX_X86_64, MUL_REGS_MACOS_X86_64, SYM_ADD_INSN, SYM_ADRP_INSN,
};
use crate::oracle;

/// Initial value of the `g_magic` global in the ADRP fixture family.
pub const G_MAGIC: i32 = 30;

/// One fixture family in the corpus.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Fixture {
    /// Instrument-only target: hook at the marked add, never call back.
    InstrumentNoOriginal,
    /// Instrumentation that re-invokes the original add; result is preserved.
    InstrumentWithOriginal,
    /// Reads `g_magic` through a marked `adrp` pair; result is `a + b + g_magic`.
    InstrumentAdrpNoOriginal,
    /// add→mul patch target, aarch64-oriented (same-width substitution).
    PatchcodeAddToMul,
    /// add→mul patch target, x86-64-oriented (distinct registers, slack no-ops).
    PatchcodeAddToMulRegs,
}

impl Fixture {
    /// Every fixture family.
    pub const ALL: [Fixture; 5] = [
        Fixture::InstrumentNoOriginal,
        Fixture::InstrumentWithOriginal,
        Fixture::InstrumentAdrpNoOriginal,
        Fixture::PatchcodeAddToMul,
        Fixture::PatchcodeAddToMulRegs,
    ];

    /// The literal arguments `main` passes to `calc`.
    pub fn operands(self) -> (i32, i32) {
        match self {
            Fixture::InstrumentNoOriginal => (4, 5),
            Fixture::InstrumentWithOriginal => (1, 2),
            Fixture::InstrumentAdrpNoOriginal => (5, 7),
            Fixture::PatchcodeAddToMul | Fixture::PatchcodeAddToMulRegs => (6, 7),
        }
    }

    /// The oracle value of the unpatched binary.
    pub fn unpatched(self) -> i32 {
        let (a, b) = self.operands();
        if self.uses_magic() {
            a + b + G_MAGIC
        } else {
            a + b
        }
    }

    /// The oracle value after the fixture's intended patch is applied.
    ///
    /// Instrumentation families are semantics-preserving, so this matches
    /// [`Fixture::unpatched`]; the patchcode families flip add to mul.
    pub fn patched(self) -> i32 {
        match self {
            Fixture::PatchcodeAddToMul | Fixture::PatchcodeAddToMulRegs => {
                let (a, b) = self.operands();
                a * b
            }
            _ => self.unpatched(),
        }
    }

    /// Whether the intended patch changes the printed result.
    pub fn changes_semantics(self) -> bool {
        self.patched() != self.unpatched()
    }

    /// Whether `calc` reads the `g_magic` global.
    pub fn uses_magic(self) -> bool {
        self == Fixture::InstrumentAdrpNoOriginal
    }

    /// The fixed instruction template for `platform`, if the fixture pins one.
    ///
    /// `None` means the compiler schedules the body on that platform (the
    /// portable fallback, or the hand-guarded with-original x86-64 variant);
    /// such binaries still honor the oracle but have no byte-exact layout.
    pub fn template(self, platform: Platform) -> Option<&'static CalcTemplate> {
        match (self, platform) {
            (Fixture::InstrumentNoOriginal, Platform::LinuxAarch64) => Some(&ADD_LINUX_AARCH64),
            (Fixture::InstrumentNoOriginal, Platform::LinuxX86_64) => Some(&ADD_LINUX_X86_64),
            (Fixture::InstrumentNoOriginal, Platform::MacosX86_64) => Some(&ADD_MACOS_X86_64),
            (Fixture::InstrumentNoOriginal, Platform::GenericAarch64) => Some(&ADD_GENERIC_AARCH64),
            (Fixture::InstrumentWithOriginal, Platform::LinuxAarch64) => Some(&ADD_LINUX_AARCH64),
            (Fixture::InstrumentWithOriginal, Platform::GenericAarch64) => {
                Some(&ADD_GENERIC_AARCH64)
            }
            (Fixture::InstrumentAdrpNoOriginal, Platform::LinuxAarch64) => {
                Some(&ADRP_LINUX_AARCH64)
            }
            (Fixture::PatchcodeAddToMul, Platform::LinuxAarch64) => Some(&ADD_LINUX_AARCH64),
            (Fixture::PatchcodeAddToMul, Platform::GenericAarch64) => Some(&ADD_GENERIC_AARCH64),
            (Fixture::PatchcodeAddToMulRegs, Platform::LinuxX86_64) => {
                Some(&MUL_REGS_LINUX_X86_64)
            }
            (Fixture::PatchcodeAddToMulRegs, Platform::MacosX86_64) => {
                Some(&MUL_REGS_MACOS_X86_64)
            }
            _ => None,
        }
    }

    /// The marker symbols the compiled fixture exports on `platform`.
    ///
    /// The with-original x86-64 variant exports `calc_add_insn` from an
    /// embedded assembly label even though it has no fixed template.
    pub fn markers(self, platform: Platform) -> &'static [&'static str] {
        match (self, platform) {
            (Fixture::InstrumentNoOriginal, Platform::LinuxAarch64)
            | (Fixture::InstrumentWithOriginal, Platform::LinuxAarch64)
            | (Fixture::InstrumentWithOriginal, Platform::LinuxX86_64)
            | (Fixture::PatchcodeAddToMul, Platform::LinuxAarch64)
            | (Fixture::PatchcodeAddToMulRegs, Platform::LinuxX86_64) => &[SYM_ADD_INSN],
            (Fixture::InstrumentAdrpNoOriginal, Platform::LinuxAarch64) => &[SYM_ADRP_INSN],
            _ => &[],
        }
    }

    /// The exact line the fixture prints, pre- or post-patch.
    pub fn oracle_line(self, patched: bool) -> String {
        let (a, b) = self.operands();
        let result = if patched { self.patched() } else { self.unpatched() };
        oracle::render(a, b, result)
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fixture::InstrumentNoOriginal => "instrument_no_original",
            Fixture::InstrumentWithOriginal => "instrument_with_original",
            Fixture::InstrumentAdrpNoOriginal => "instrument_adrp_no_original",
            Fixture::PatchcodeAddToMul => "patchcode_add_to_mul",
            Fixture::PatchcodeAddToMulRegs => "patchcode_add_to_mul_regs",
        };
        f.write_str(name)
    }
}

impl FromStr for Fixture {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instrument_no_original" => Ok(Fixture::InstrumentNoOriginal),
            "instrument_with_original" => Ok(Fixture::InstrumentWithOriginal),
            "instrument_adrp_no_original" => Ok(Fixture::InstrumentAdrpNoOriginal),
            "patchcode_add_to_mul" => Ok(Fixture::PatchcodeAddToMul),
            "patchcode_add_to_mul_regs" => Ok(Fixture::PatchcodeAddToMulRegs),
            _ => bail!("unknown fixture `{s}`"),
        }
    }
}
