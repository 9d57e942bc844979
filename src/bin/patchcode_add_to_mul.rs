// SPDX-License-Identifier: Apache-2.0

//! add→mul patch target, aarch64-oriented: `mul w0, w8, w9` is a same-width
//! substitution for the marked add, flipping the oracle from 13 to 42.

patchbed::define_calc!(mul_patch);

fn main() {
    println!("calc(6, 7) = {}", calc(6, 7));
}
