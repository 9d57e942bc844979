// SPDX-License-Identifier: Apache-2.0

//! Validates the compiled fixtures' symbol layout against the template table.
//!
//! ELF only; on other hosts the fixtures are exercised through the oracle
//! tests alone.

#![cfg(target_os = "linux")]

use patchbed::{elf, Fixture, Platform};

fn fixture_bins() -> [(Fixture, &'static str); 5] {
    [
        (
            Fixture::InstrumentNoOriginal,
            env!("CARGO_BIN_EXE_instrument_no_original"),
        ),
        (
            Fixture::InstrumentWithOriginal,
            env!("CARGO_BIN_EXE_instrument_with_original"),
        ),
        (
            Fixture::InstrumentAdrpNoOriginal,
            env!("CARGO_BIN_EXE_instrument_adrp_no_original"),
        ),
        (
            Fixture::PatchcodeAddToMul,
            env!("CARGO_BIN_EXE_patchcode_add_to_mul"),
        ),
        (
            Fixture::PatchcodeAddToMulRegs,
            env!("CARGO_BIN_EXE_patchcode_add_to_mul_regs"),
        ),
    ]
}

#[test]
fn markers_stay_inside_calc() {
    for (fixture, exe) in fixture_bins() {
        let layout = elf::read(exe).expect("failed to inspect fixture");
        layout.validate().unwrap_or_else(|err| panic!("{fixture}: {err}"));
    }
}

#[test]
fn exported_markers_match_the_contract() {
    let platform = Platform::host();
    for (fixture, exe) in fixture_bins() {
        let layout = elf::read(exe).expect("failed to inspect fixture");
        let got: Vec<&str> = layout
            .markers
            .iter()
            .map(|marker| marker.name.as_str())
            .collect();
        assert_eq!(got, fixture.markers(platform), "{fixture}");
    }
}

#[test]
fn marker_offsets_match_the_template() {
    let platform = Platform::host();
    for (fixture, exe) in fixture_bins() {
        let Some(template) = fixture.template(platform) else {
            continue;
        };
        let layout = elf::read(exe).expect("failed to inspect fixture");
        assert_eq!(
            layout.calc.size,
            template.size() as u64,
            "{fixture}: calc size"
        );
        for (marker, offset) in template.markers() {
            assert_eq!(
                layout.marker_offset(marker),
                Some(offset as u64),
                "{fixture}: {marker}"
            );
        }
    }
}

#[test]
fn adrp_fixture_exports_the_magic_global() {
    let layout = elf::read(env!("CARGO_BIN_EXE_instrument_adrp_no_original"))
        .expect("failed to inspect fixture");
    assert!(layout.magic.is_some());

    let layout = elf::read(env!("CARGO_BIN_EXE_instrument_no_original"))
        .expect("failed to inspect fixture");
    assert!(layout.magic.is_none());
}
