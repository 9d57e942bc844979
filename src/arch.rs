// SPDX-License-Identifier: Apache-2.0

//! The closed set of `calc` encodings and host detection.
//!
//! Fixture dispatch is resolved at compile time: exactly one `calc` body is
//! compiled per target, so a platform here names an instruction encoding, not
//! a runtime branch. Anything outside the specialized set takes [`Platform::Fallback`],
//! a plain compiler-generated addition that keeps the oracle correct but is
//! useless for instruction-level patch testing.

use core::fmt;
use core::str::FromStr;

use anyhow::bail;

/// A `calc` encoding variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Platform {
    /// Linux (or Android) on aarch64; full ELF directives and marker symbols.
    LinuxAarch64,
    /// Linux on x86-64; ELF directives, variable-width instructions.
    LinuxX86_64,
    /// macOS on x86-64; Mach-O underscore-prefixed globals, no size directives.
    MacosX86_64,
    /// Any other aarch64 target; a naked function with the portable add sequence.
    GenericAarch64,
    /// Everything else; compiler-generated addition, no pinned instructions.
    Fallback,
}

impl Platform {
    /// Every platform variant, in dispatch order.
    pub const ALL: [Platform; 5] = [
        Platform::LinuxAarch64,
        Platform::LinuxX86_64,
        Platform::MacosX86_64,
        Platform::GenericAarch64,
        Platform::Fallback,
    ];

    /// The platform the current build targets.
    pub fn host() -> Platform {
        if cfg!(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        )) {
            Platform::LinuxAarch64
        } else if cfg!(all(target_os = "linux", target_arch = "x86_64")) {
            Platform::LinuxX86_64
        } else if cfg!(all(target_os = "macos", target_arch = "x86_64")) {
            Platform::MacosX86_64
        } else if cfg!(target_arch = "aarch64") {
            Platform::GenericAarch64
        } else {
            Platform::Fallback
        }
    }

    /// Whether the platform uses ELF assembler directives (`.type`, `.size`).
    pub fn is_elf(self) -> bool {
        matches!(self, Platform::LinuxAarch64 | Platform::LinuxX86_64)
    }

    /// Decorates `name` the way the platform's object format expects.
    ///
    /// Mach-O prepends an underscore to C-visible symbols; everything else
    /// uses the name as written.
    pub fn symbol(self, name: &str) -> String {
        match self {
            Platform::MacosX86_64 => format!("_{name}"),
            _ => name.to_string(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::LinuxAarch64 => "linux-aarch64",
            Platform::LinuxX86_64 => "linux-x86_64",
            Platform::MacosX86_64 => "macos-x86_64",
            Platform::GenericAarch64 => "generic-aarch64",
            Platform::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux-aarch64" => Ok(Platform::LinuxAarch64),
            "linux-x86_64" => Ok(Platform::LinuxX86_64),
            "macos-x86_64" => Ok(Platform::MacosX86_64),
            "generic-aarch64" => Ok(Platform::GenericAarch64),
            "fallback" => Ok(Platform::Fallback),
            _ => bail!("unknown platform `{s}`"),
        }
    }
}
