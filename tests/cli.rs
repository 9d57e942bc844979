// SPDX-License-Identifier: Apache-2.0

//! End-to-end runs of the `patchbed` CLI against the built fixtures.

use std::process::{Command, Output};

use patchbed::Fixture;

fn patchbed(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_patchbed"))
        .args(args)
        .output()
        .expect("failed to run patchbed")
}

#[test]
fn check_passes_on_an_unpatched_fixture() {
    let output = patchbed(&[
        "check",
        env!("CARGO_BIN_EXE_instrument_no_original"),
        "instrument_no_original",
    ]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("ok: calc(4, 5) = 9"), "{stdout}");
}

#[test]
fn check_patched_fails_before_patching() {
    // The add→mul expectation must not be satisfiable by the unpatched add.
    let output = patchbed(&[
        "check",
        env!("CARGO_BIN_EXE_patchcode_add_to_mul"),
        "patchcode_add_to_mul",
        "--patched",
    ]);
    assert!(!output.status.success());
}

#[test]
fn check_patched_passes_on_preserving_fixtures() {
    let output = patchbed(&[
        "check",
        env!("CARGO_BIN_EXE_instrument_with_original"),
        "instrument_with_original",
        "--patched",
    ]);
    assert!(output.status.success(), "{output:?}");
}

#[test]
fn check_rejects_a_mismatched_fixture_name() {
    // Wrong fixture means wrong operands; the oracle line gives it away.
    let output = patchbed(&[
        "check",
        env!("CARGO_BIN_EXE_instrument_no_original"),
        "patchcode_add_to_mul",
    ]);
    assert!(!output.status.success());
}

#[cfg(target_os = "linux")]
#[test]
fn check_verifies_marker_layout() {
    let output = patchbed(&[
        "check",
        env!("CARGO_BIN_EXE_instrument_no_original"),
        "instrument_no_original",
        "--verify-markers",
    ]);
    assert!(output.status.success(), "{output:?}");
}

#[test]
fn emit_renders_the_marked_listing() {
    let output = patchbed(&[
        "emit",
        "instrument_no_original",
        "--platform",
        "linux-aarch64",
    ]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("calc_add_insn:"), "{stdout}");
    assert!(stdout.contains(".size calc, .-calc"), "{stdout}");
}

#[test]
fn emit_writes_to_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calc.s");
    let output = patchbed(&[
        "emit",
        "patchcode_add_to_mul_regs",
        "--platform",
        "linux-x86_64",
        "-o",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{output:?}");
    let listing = std::fs::read_to_string(path).unwrap();
    assert!(listing.contains("add eax, ecx"), "{listing}");
}

#[test]
fn emit_refuses_fallback_variants() {
    let output = patchbed(&["emit", "instrument_no_original", "--platform", "fallback"]);
    assert!(!output.status.success());
}

#[cfg(target_os = "linux")]
#[test]
fn inspect_reports_calc_as_json() {
    let output = patchbed(&[
        "inspect",
        env!("CARGO_BIN_EXE_instrument_adrp_no_original"),
        "--json",
    ]);
    assert!(output.status.success(), "{output:?}");
    let layout: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(layout["calc"]["size"].as_u64().unwrap() > 0);
    assert!(!layout["magic"].is_null());
}

#[test]
fn list_names_every_fixture() {
    let output = patchbed(&["list"]);
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).unwrap();
    for fixture in Fixture::ALL {
        assert!(stdout.contains(&fixture.to_string()), "{fixture}");
    }
}
