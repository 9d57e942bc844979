// SPDX-License-Identifier: Apache-2.0

//! ELF symbol-layout inspection for compiled fixtures.
//!
//! A patcher resolves its anchors by symbol lookup, never by scanning bytes,
//! so the whole contract lives in the symbol table: `calc` with a valid size,
//! each marker strictly inside `[calc, calc + size)`, and `g_magic` where the
//! fixture family reads it.

use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use goblin::elf::Elf;
use serde::Serialize;
use tracing::debug;

use crate::template::{SYM_ADD_INSN, SYM_ADRP_INSN, SYM_CALC, SYM_MAGIC};

/// A resolved symbol.
#[derive(Clone, Debug, Serialize)]
pub struct Symbol {
    /// Symbol name as stored in the symtab.
    pub name: String,
    /// Virtual address.
    pub addr: u64,
    /// Recorded size in bytes; zero for plain labels.
    pub size: u64,
}

/// The symbol layout of one compiled fixture.
#[derive(Clone, Debug, Serialize)]
pub struct CalcLayout {
    /// The `calc` function symbol.
    pub calc: Symbol,
    /// Marker symbols, in address order.
    pub markers: Vec<Symbol>,
    /// The `g_magic` global, if the fixture exports one.
    pub magic: Option<Symbol>,
}

impl CalcLayout {
    /// Byte offset of the named marker from the start of `calc`.
    pub fn marker_offset(&self, name: &str) -> Option<u64> {
        self.markers
            .iter()
            .find(|marker| marker.name == name)
            .map(|marker| marker.addr.wrapping_sub(self.calc.addr))
    }

    /// Enforces the marker-extent invariant.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.calc.size > 0, "`{SYM_CALC}` has no recorded size");
        let end = self.calc.addr + self.calc.size;
        for marker in &self.markers {
            ensure!(
                self.calc.addr <= marker.addr && marker.addr < end,
                "marker `{}` at {:#x} falls outside `{SYM_CALC}` [{:#x}, {:#x})",
                marker.name,
                marker.addr,
                self.calc.addr,
                end,
            );
        }
        Ok(())
    }
}

/// Parses an ELF image and resolves the fixture symbol contract.
pub fn inspect(bytes: &[u8]) -> Result<CalcLayout> {
    let elf = Elf::parse(bytes).context("failed to parse ELF image")?;

    let mut calc = None;
    let mut markers = Vec::new();
    let mut magic = None;
    for sym in elf.syms.iter() {
        let Some(name) = elf.strtab.get_at(sym.st_name) else {
            continue;
        };
        match name {
            SYM_CALC if calc.is_none() => {
                debug!(addr = sym.st_value, size = sym.st_size, "found calc");
                calc = Some(Symbol {
                    name: name.to_string(),
                    addr: sym.st_value,
                    size: sym.st_size,
                });
            }
            SYM_ADD_INSN | SYM_ADRP_INSN => {
                debug!(addr = sym.st_value, name, "found marker");
                markers.push(Symbol {
                    name: name.to_string(),
                    addr: sym.st_value,
                    size: sym.st_size,
                });
            }
            SYM_MAGIC if magic.is_none() => {
                magic = Some(Symbol {
                    name: name.to_string(),
                    addr: sym.st_value,
                    size: sym.st_size,
                });
            }
            _ => {}
        }
    }

    let Some(calc) = calc else {
        bail!("no `{SYM_CALC}` symbol in image");
    };
    markers.sort_by_key(|marker| marker.addr);
    Ok(CalcLayout {
        calc,
        markers,
        magic,
    })
}

/// Reads `path` and inspects it as an ELF fixture.
pub fn read(path: impl AsRef<Path>) -> Result<CalcLayout> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    inspect(&bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    fn layout(calc_size: u64, marker_addr: u64) -> CalcLayout {
        CalcLayout {
            calc: Symbol {
                name: SYM_CALC.to_string(),
                addr: 0x1000,
                size: calc_size,
            },
            markers: vec![Symbol {
                name: SYM_ADD_INSN.to_string(),
                addr: marker_addr,
                size: 0,
            }],
            magic: None,
        }
    }

    #[test]
    fn marker_inside_extent_passes() {
        layout(28, 0x1014).validate().unwrap();
    }

    #[test]
    fn marker_at_calc_end_is_out_of_range() {
        assert!(layout(28, 0x101C).validate().is_err());
        assert!(layout(28, 0xFFF).validate().is_err());
    }

    #[test]
    fn sizeless_calc_is_rejected() {
        assert!(layout(0, 0x1000).validate().is_err());
    }

    #[test]
    fn marker_offsets_are_calc_relative() {
        assert_eq!(layout(28, 0x1014).marker_offset(SYM_ADD_INSN), Some(0x14));
        assert_eq!(layout(28, 0x1014).marker_offset(SYM_ADRP_INSN), None);
    }

    #[test]
    fn garbage_is_not_an_elf() {
        assert!(inspect(b"\x7fELF but not really").is_err());
        assert!(inspect(&[]).is_err());
    }
}
