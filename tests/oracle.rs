// SPDX-License-Identifier: Apache-2.0

//! Runs every fixture binary unpatched and checks its oracle line.

use std::process::{Command, Stdio};
use std::time::Duration;

use patchbed::{oracle, Fixture};
use process_control::{ChildExt, Control};

const TIME_LIMIT: Duration = Duration::from_secs(30);

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

fn run_fixture(exe: &str) -> String {
    let child = Command::new(exe)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn fixture");
    let output = child
        .controlled_with_output()
        .time_limit(TIME_LIMIT)
        .terminate_for_timeout()
        .wait()
        .expect("failed to wait for fixture")
        .expect("fixture timed out");
    assert!(output.status.success(), "fixture failed: {:?}", output.status);
    String::from_utf8(output.stdout).expect("fixture wrote non-UTF-8 output")
}

#[test]
fn instrument_no_original_reports_the_sum() {
    let out = run_fixture(env!("CARGO_BIN_EXE_instrument_no_original"));
    assert_eq!(out, "calc(4, 5) = 9\n");
}

#[test]
fn instrument_with_original_reports_the_sum() {
    let out = run_fixture(env!("CARGO_BIN_EXE_instrument_with_original"));
    assert_eq!(out, "calc(1, 2) = 3\n");
}

#[test]
fn adrp_fixture_adds_the_magic() {
    let out = run_fixture(env!("CARGO_BIN_EXE_instrument_adrp_no_original"));
    assert_eq!(out, "calc(5, 7) = 42\n");
}

#[test]
fn patchcode_fixtures_report_the_sum_until_patched() {
    let out = run_fixture(env!("CARGO_BIN_EXE_patchcode_add_to_mul"));
    assert_eq!(out, "calc(6, 7) = 13\n");
    let out = run_fixture(env!("CARGO_BIN_EXE_patchcode_add_to_mul_regs"));
    assert_eq!(out, "calc(6, 7) = 13\n");
}

#[test]
fn oracle_lines_match_the_registry() {
    for (fixture, exe) in fixture_bins() {
        let out = run_fixture(exe);
        let line = out.lines().next().expect("fixture printed nothing");
        assert_eq!(line, fixture.oracle_line(false), "{fixture}");

        let (a, b, result) = oracle::parse(line).expect("unparsable oracle line");
        assert_eq!((a, b), fixture.operands(), "{fixture}");
        assert_eq!(result, fixture.unpatched(), "{fixture}");
    }
}
