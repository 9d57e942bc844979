// SPDX-License-Identifier: Apache-2.0

//! The textual oracle: `calc(A, B) = R`.
//!
//! A harness never inspects patched bytes directly; it runs the fixture and
//! compares this line before and after patching.

use anyhow::{Context, Result};

/// Renders the oracle line for the given operands and result.
pub fn render(a: i32, b: i32, result: i32) -> String {
    format!("calc({a}, {b}) = {result}")
}

/// Parses an oracle line back into `(a, b, result)`.
pub fn parse(line: &str) -> Result<(i32, i32, i32)> {
    let rest = line
        .trim()
        .strip_prefix("calc(")
        .with_context(|| format!("not an oracle line: `{line}`"))?;
    let (operands, result) = rest
        .split_once(") = ")
        .with_context(|| format!("missing result in oracle line: `{line}`"))?;
    let (a, b) = operands
        .split_once(", ")
        .with_context(|| format!("missing operand in oracle line: `{line}`"))?;

    let a = a.parse().with_context(|| format!("bad operand `{a}`"))?;
    let b = b.parse().with_context(|| format!("bad operand `{b}`"))?;
    let result = result
        .parse()
        .with_context(|| format!("bad result `{result}`"))?;
    Ok((a, b, result))
}
