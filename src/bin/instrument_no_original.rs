// SPDX-License-Identifier: Apache-2.0

//! Instrument-only target: `calc` adds its operands, with three no-op slots
//! ahead of the marked add so a hook can be inserted without relocation.

patchbed::define_calc!(add);

fn main() {
    println!("calc(4, 5) = {}", calc(4, 5));
}
