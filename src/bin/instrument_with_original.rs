// SPDX-License-Identifier: Apache-2.0

//! Patch-with-preservation target: the original add stays reachable, so an
//! instrumenter that calls back into it must leave the oracle at `1 + 2`.

patchbed::define_calc!(add_preserving);

fn main() {
    println!("calc(1, 2) = {}", calc(1, 2));
}
