//! Build script for the FM tuner firmware
//!
//! Handles:
//! - Linker scripts for the embedded binary (cortex-m-rt + defmt)
//! - Nothing at all for host builds

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, tooling) link normally
    if std::env::var_os("CARGO_FEATURE_EMBEDDED").is_none() {
        return;
    }

    // memory.x comes from embassy-stm32's `memory-x` feature
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}
