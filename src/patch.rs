// SPDX-License-Identifier: Apache-2.0

//! Replacement opcodes for the add→mul patch scenarios.
//!
//! These are the encodings an external patcher writes over the marked add.
//! On aarch64 the substitution is width-preserving; on x86-64 the three-byte
//! `imul` spills into the slack no-op that follows the marked add.

/// `add w0, w8, w9` — the instruction at `calc_add_insn` on aarch64.
pub const ADD_W0_W8_W9: u32 = 0x0B09_0100;

/// `mul w0, w8, w9` — what a correct add→mul patch writes on aarch64.
pub const MUL_W0_W8_W9: u32 = 0x1B09_7D00;

/// aarch64 `nop`, the padding filler.
pub const NOP_AARCH64: u32 = 0xD503_201F;

/// `add eax, ecx` — the instruction at `calc_add_insn` on x86-64.
pub const ADD_EAX_ECX: [u8; 2] = [0x01, 0xC8];

/// `imul eax, ecx` — what a correct add→mul patch writes on x86-64.
pub const IMUL_EAX_ECX: [u8; 3] = [0x0F, 0xAF, 0xC1];

/// x86-64 `nop`, the padding filler.
pub const NOP_X86_64: u8 = 0x90;
