// SPDX-License-Identifier: Apache-2.0

//! ADRP target: `calc` loads `g_magic` through a marked page-relative pair,
//! so a patcher must emulate the position-dependent `adrp` it displaces.
//! Unpatched oracle: 5 + 7 + 30 = 42.

patchbed::define_calc!(adrp);

fn main() {
    println!("calc(5, 7) = {}", calc(5, 7));
}
