// SPDX-License-Identifier: Apache-2.0

//! add→mul patch target, x86-64-oriented: operands sit in `eax`/`ecx` and
//! three slack no-ops follow the marked add, so the three-byte `imul` fits
//! over add-plus-one-nop without new registers or addressing modes.

patchbed::define_calc!(mul_patch_regs);

fn main() {
    println!("calc(6, 7) = {}", calc(6, 7));
}
