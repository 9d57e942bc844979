// SPDX-License-Identifier: Apache-2.0

//! Per-platform instruction templates for `calc`.
//!
//! A template is the source of truth for a fixture's pinned machine code: an
//! ordered instruction list with encoded byte lengths, marker bindings and
//! padding slots. The `global_asm!` bodies in [`crate::targets`] must stay in
//! lockstep with these tables; the integration tests enforce that by reading
//! the compiled fixtures back with [`crate::elf`] and comparing offsets.

use crate::arch::Platform;

/// Symbol name of the fixture entry point.
pub const SYM_CALC: &str = "calc";
/// Marker bound to the addition instruction (or its patch slot).
pub const SYM_ADD_INSN: &str = "calc_add_insn";
/// Marker bound to the page-address materialization instruction.
pub const SYM_ADRP_INSN: &str = "calc_adrp_insn";
/// The process-wide magic value read by the ADRP fixture family.
pub const SYM_MAGIC: &str = "g_magic";

/// One instruction in a `calc` template.
#[derive(Clone, Copy, Debug)]
pub struct Insn {
    /// Assembly text, without label lines.
    pub text: &'static str,
    /// Encoded length in bytes.
    pub len: usize,
    /// Marker symbol bound to this instruction's address, if any.
    pub marker: Option<&'static str>,
    /// Whether this is a deliberate no-op slot reserved for a patcher.
    pub padding: bool,
}

impl Insn {
    const fn new(text: &'static str, len: usize) -> Insn {
        Insn {
            text,
            len,
            marker: None,
            padding: false,
        }
    }

    const fn marked(text: &'static str, len: usize, marker: &'static str) -> Insn {
        Insn {
            text,
            len,
            marker: Some(marker),
            padding: false,
        }
    }

    const fn pad(text: &'static str, len: usize) -> Insn {
        Insn {
            text,
            len,
            marker: None,
            padding: true,
        }
    }
}

/// A fixed `calc` instruction sequence for one platform.
#[derive(Clone, Copy, Debug)]
pub struct CalcTemplate {
    /// The encoding this template is valid for.
    pub platform: Platform,
    /// The instructions, in address order.
    pub insns: &'static [Insn],
}

impl CalcTemplate {
    /// Total encoded size of `calc` in bytes.
    pub fn size(&self) -> usize {
        self.insns.iter().map(|insn| insn.len).sum()
    }

    /// Byte offset of `marker` from the start of `calc`, if bound.
    pub fn marker_offset(&self, marker: &str) -> Option<usize> {
        let mut offset = 0;
        for insn in self.insns {
            if insn.marker == Some(marker) {
                return Some(offset);
            }
            offset += insn.len;
        }
        None
    }

    /// All marker bindings with their byte offsets, in address order.
    pub fn markers(&self) -> Vec<(&'static str, usize)> {
        let mut found = Vec::new();
        let mut offset = 0;
        for insn in self.insns {
            if let Some(marker) = insn.marker {
                found.push((marker, offset));
            }
            offset += insn.len;
        }
        found
    }

    /// Bytes of deliberate no-op padding available to a patcher.
    pub fn padding_bytes(&self) -> usize {
        self.insns
            .iter()
            .filter(|insn| insn.padding)
            .map(|insn| insn.len)
            .sum()
    }
}

/// aarch64 add sequence with three insertion no-ops and a marked add.
pub static ADD_LINUX_AARCH64: CalcTemplate = CalcTemplate {
    platform: Platform::LinuxAarch64,
    insns: &[
        Insn::new("mov x8, x0", 4),
        Insn::new("mov x9, x1", 4),
        Insn::pad("nop", 4),
        Insn::pad("nop", 4),
        Insn::pad("nop", 4),
        Insn::marked("add w0, w8, w9", 4, SYM_ADD_INSN),
        Insn::new("ret", 4),
    ],
};

/// The same add sequence for non-Linux aarch64; no exported markers.
pub static ADD_GENERIC_AARCH64: CalcTemplate = CalcTemplate {
    platform: Platform::GenericAarch64,
    insns: &[
        Insn::new("mov x8, x0", 4),
        Insn::new("mov x9, x1", 4),
        Insn::pad("nop", 4),
        Insn::pad("nop", 4),
        Insn::pad("nop", 4),
        Insn::new("add w0, w8, w9", 4),
        Insn::new("ret", 4),
    ],
};

/// Minimal x86-64 add with one trailing no-op slot.
pub static ADD_LINUX_X86_64: CalcTemplate = CalcTemplate {
    platform: Platform::LinuxX86_64,
    insns: &[
        Insn::new("mov eax, edi", 2),
        Insn::new("add eax, esi", 2),
        Insn::pad("nop", 1),
        Insn::new("ret", 1),
    ],
};

/// The macOS rendition of [`ADD_LINUX_X86_64`]; underscore symbols, no markers.
pub static ADD_MACOS_X86_64: CalcTemplate = CalcTemplate {
    platform: Platform::MacosX86_64,
    insns: &[
        Insn::new("mov eax, edi", 2),
        Insn::new("add eax, esi", 2),
        Insn::pad("nop", 1),
        Insn::new("ret", 1),
    ],
};

/// aarch64 sequence loading `g_magic` through a marked page-relative pair.
///
/// The marker pins the `adrp` specifically: its encoding is position
/// dependent, so a patcher that relocates or overwrites it without emulating
/// the page computation corrupts the reference.
pub static ADRP_LINUX_AARCH64: CalcTemplate = CalcTemplate {
    platform: Platform::LinuxAarch64,
    insns: &[
        Insn::new("mov x8, x0", 4),
        Insn::new("mov x9, x1", 4),
        Insn::marked("adrp x10, g_magic", 4, SYM_ADRP_INSN),
        Insn::new("add x10, x10, :lo12:g_magic", 4),
        Insn::new("ldr w10, [x10]", 4),
        Insn::new("add w0, w8, w9", 4),
        Insn::new("add w0, w0, w10", 4),
        Insn::new("ret", 4),
    ],
};

/// x86-64 add→mul patch target: operands in distinct registers, slack no-ops.
///
/// `add eax, ecx` is two bytes and `imul eax, ecx` is three; the marked add
/// plus the first slack no-op give a patcher a fixed-width substitution slot
/// without touching register allocation or addressing modes.
pub static MUL_REGS_LINUX_X86_64: CalcTemplate = CalcTemplate {
    platform: Platform::LinuxX86_64,
    insns: &[
        Insn::new("mov eax, edi", 2),
        Insn::new("mov ecx, esi", 2),
        Insn::marked("add eax, ecx", 2, SYM_ADD_INSN),
        Insn::pad("nop", 1),
        Insn::pad("nop", 1),
        Insn::pad("nop", 1),
        Insn::new("ret", 1),
    ],
};

/// The macOS rendition of [`MUL_REGS_LINUX_X86_64`]; no exported markers.
pub static MUL_REGS_MACOS_X86_64: CalcTemplate = CalcTemplate {
    platform: Platform::MacosX86_64,
    insns: &[
        Insn::new("mov eax, edi", 2),
        Insn::new("mov ecx, esi", 2),
        Insn::new("add eax, ecx", 2),
        Insn::pad("nop", 1),
        Insn::pad("nop", 1),
        Insn::pad("nop", 1),
        Insn::new("ret", 1),
    ],
};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn add_marker_sits_after_the_padding() {
        assert_eq!(ADD_LINUX_AARCH64.marker_offset(SYM_ADD_INSN), Some(20));
        assert_eq!(ADD_LINUX_AARCH64.size(), 28);
        assert_eq!(ADD_LINUX_AARCH64.padding_bytes(), 12);
    }

    #[test]
    fn adrp_marker_pins_the_page_instruction() {
        assert_eq!(ADRP_LINUX_AARCH64.marker_offset(SYM_ADRP_INSN), Some(8));
        assert_eq!(ADRP_LINUX_AARCH64.marker_offset(SYM_ADD_INSN), None);
        assert_eq!(ADRP_LINUX_AARCH64.size(), 32);
    }

    #[test]
    fn x86_patch_target_leaves_slack_after_the_add() {
        assert_eq!(MUL_REGS_LINUX_X86_64.marker_offset(SYM_ADD_INSN), Some(4));
        assert_eq!(MUL_REGS_LINUX_X86_64.size(), 10);
        assert_eq!(MUL_REGS_LINUX_X86_64.padding_bytes(), 3);
    }

    #[test]
    fn generic_and_macos_templates_export_nothing() {
        assert!(ADD_GENERIC_AARCH64.markers().is_empty());
        assert!(ADD_MACOS_X86_64.markers().is_empty());
        assert!(MUL_REGS_MACOS_X86_64.markers().is_empty());
    }

    #[test]
    fn markers_report_address_order() {
        let markers = ADD_LINUX_AARCH64.markers();
        assert_eq!(markers, vec![(SYM_ADD_INSN, 20)]);
    }
}
