// SPDX-License-Identifier: Apache-2.0

//! Source-level pinned `calc` definitions for the fixture binaries.
//!
//! [`define_calc!`] expands to exactly one `calc` per compilation: a
//! `global_asm!` body with exported marker symbols on the specialized
//! platforms, a naked function on other aarch64 targets, and a plain
//! compiler-generated addition everywhere else. The instruction sequences
//! must stay in lockstep with the tables in [`crate::template`].

/// Declares the assembly `calc` symbol and a safe Rust wrapper over it.
#[doc(hidden)]
#[macro_export]
macro_rules! __extern_calc {
    ($cfg:meta) => {
        #[cfg($cfg)]
        mod __calc_sym {
            extern "C" {
                pub fn calc(a: i32, b: i32) -> i32;
            }
        }

        /// Calls the assembly implementation of `calc`.
        #[cfg($cfg)]
        pub fn calc(a: i32, b: i32) -> i32 {
            unsafe { __calc_sym::calc(a, b) }
        }
    };
}

/// Defines the `calc` target for one fixture family.
///
/// Arms:
/// - `add`: `a + b` with three insertion no-ops; `calc_add_insn` exported on
///   Linux aarch64.
/// - `add_preserving`: like `add`, but every specialized body keeps the
///   original add reachable for patch-with-preservation tests; on Linux
///   x86-64 the patchpoint is a marked no-op after a compiler-scheduled add.
/// - `adrp`: `a + b + g_magic`, loading the global through a marked
///   page-relative pair; defines the `g_magic` static.
/// - `mul_patch`: the aarch64 add→mul patch target.
/// - `mul_patch_regs`: the x86-64 add→mul patch target with operands in
///   distinct registers and slack no-ops after the marked add.
#[macro_export]
macro_rules! define_calc {
    (add) => {
        #[cfg(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ))]
        core::arch::global_asm!(
            ".text",
            ".global calc",
            ".global calc_add_insn",
            ".type calc, %function",
            "calc:",
            "mov x8, x0",
            "mov x9, x1",
            "nop",
            "nop",
            "nop",
            "calc_add_insn:",
            "add w0, w8, w9",
            "ret",
            ".size calc, .-calc",
        );

        #[cfg(all(target_os = "macos", target_arch = "x86_64"))]
        core::arch::global_asm!(
            ".text",
            ".globl _calc",
            "_calc:",
            "mov eax, edi",
            "add eax, esi",
            "nop",
            "ret",
        );

        #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
        core::arch::global_asm!(
            ".text",
            ".global calc",
            ".type calc, @function",
            "calc:",
            "mov eax, edi",
            "add eax, esi",
            "nop",
            "ret",
            ".size calc, .-calc",
        );

        $crate::__extern_calc!(any(
            all(
                any(target_os = "linux", target_os = "android"),
                target_arch = "aarch64"
            ),
            all(target_os = "macos", target_arch = "x86_64"),
            all(target_os = "linux", target_arch = "x86_64")
        ));

        #[cfg(all(
            target_arch = "aarch64",
            not(any(target_os = "linux", target_os = "android"))
        ))]
        #[unsafe(naked)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            core::arch::naked_asm!(
                "mov x8, x0",
                "mov x9, x1",
                "nop",
                "nop",
                "nop",
                "add w0, w8, w9",
                "ret",
            )
        }

        #[cfg(not(any(
            target_arch = "aarch64",
            all(target_os = "macos", target_arch = "x86_64"),
            all(target_os = "linux", target_arch = "x86_64")
        )))]
        #[inline(never)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            a + b
        }
    };

    (add_preserving) => {
        #[cfg(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ))]
        core::arch::global_asm!(
            ".text",
            ".global calc",
            ".global calc_add_insn",
            ".type calc, %function",
            "calc:",
            "mov x8, x0",
            "mov x9, x1",
            "nop",
            "nop",
            "nop",
            "calc_add_insn:",
            "add w0, w8, w9",
            "ret",
            ".size calc, .-calc",
        );

        $crate::__extern_calc!(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ));

        /// `a + b` with the patchpoint on a trailing no-op, so instrumentation
        /// never clobbers the add it is expected to preserve.
        #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
        #[inline(never)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            let sum = a + b;
            unsafe {
                core::arch::asm!(
                    ".global calc_add_insn",
                    "calc_add_insn:",
                    "nop",
                    options(nomem, nostack, preserves_flags)
                );
            }
            sum
        }

        #[cfg(all(
            target_arch = "aarch64",
            not(any(target_os = "linux", target_os = "android"))
        ))]
        #[unsafe(naked)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            core::arch::naked_asm!(
                "mov x8, x0",
                "mov x9, x1",
                "nop",
                "nop",
                "nop",
                "add w0, w8, w9",
                "ret",
            )
        }

        #[cfg(not(any(
            target_arch = "aarch64",
            all(target_os = "linux", target_arch = "x86_64")
        )))]
        #[inline(never)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            a + b
        }
    };

    (adrp) => {
        #[cfg(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ))]
        core::arch::global_asm!(
            ".text",
            ".global calc",
            ".global calc_adrp_insn",
            ".type calc, %function",
            "calc:",
            "mov x8, x0",
            "mov x9, x1",
            "calc_adrp_insn:",
            "adrp x10, g_magic",
            "add x10, x10, :lo12:g_magic",
            "ldr w10, [x10]",
            "add w0, w8, w9",
            "add w0, w0, w10",
            "ret",
            ".size calc, .-calc",
        );

        $crate::__extern_calc!(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ));

        /// Process-wide magic read by `calc`; nothing writes it after startup.
        #[allow(non_upper_case_globals)]
        #[no_mangle]
        pub static g_magic: core::sync::atomic::AtomicI32 =
            core::sync::atomic::AtomicI32::new($crate::fixture::G_MAGIC);

        #[cfg(not(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        )))]
        #[inline(never)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            a + b + g_magic.load(core::sync::atomic::Ordering::Relaxed)
        }
    };

    (mul_patch) => {
        #[cfg(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ))]
        core::arch::global_asm!(
            ".text",
            ".global calc",
            ".global calc_add_insn",
            ".type calc, %function",
            "calc:",
            "mov x8, x0",
            "mov x9, x1",
            "nop",
            "nop",
            "nop",
            "calc_add_insn:",
            "add w0, w8, w9",
            "ret",
            ".size calc, .-calc",
        );

        $crate::__extern_calc!(all(
            any(target_os = "linux", target_os = "android"),
            target_arch = "aarch64"
        ));

        #[cfg(all(
            target_arch = "aarch64",
            not(any(target_os = "linux", target_os = "android"))
        ))]
        #[unsafe(naked)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            core::arch::naked_asm!(
                "mov x8, x0",
                "mov x9, x1",
                "nop",
                "nop",
                "nop",
                "add w0, w8, w9",
                "ret",
            )
        }

        #[cfg(not(target_arch = "aarch64"))]
        #[inline(never)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            a + b
        }
    };

    (mul_patch_regs) => {
        #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
        core::arch::global_asm!(
            ".text",
            ".global calc",
            ".global calc_add_insn",
            ".type calc, @function",
            "calc:",
            "mov eax, edi",
            "mov ecx, esi",
            "calc_add_insn:",
            "add eax, ecx",
            "nop",
            "nop",
            "nop",
            "ret",
            ".size calc, .-calc",
        );

        #[cfg(all(target_os = "macos", target_arch = "x86_64"))]
        core::arch::global_asm!(
            ".text",
            ".globl _calc",
            "_calc:",
            "mov eax, edi",
            "mov ecx, esi",
            "add eax, ecx",
            "nop",
            "nop",
            "nop",
            "ret",
        );

        $crate::__extern_calc!(any(
            all(target_os = "linux", target_arch = "x86_64"),
            all(target_os = "macos", target_arch = "x86_64")
        ));

        #[cfg(not(any(
            all(target_os = "linux", target_arch = "x86_64"),
            all(target_os = "macos", target_arch = "x86_64")
        )))]
        #[inline(never)]
        #[no_mangle]
        pub extern "C" fn calc(a: i32, b: i32) -> i32 {
            a + b
        }
    };
}
