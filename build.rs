//! Build script for poi-envoy.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-check-cfg=cfg(rust_analyzer)");
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, xtask, previews) link with the platform defaults.
    let target = env::var("TARGET").unwrap();
    let memory_x = if target.starts_with("thumbv8m") {
        "memory-pico2.x"
    } else if target.starts_with("thumbv6m") {
        "memory-pico1.x"
    } else {
        return;
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let contents =
        fs::read_to_string(memory_x).unwrap_or_else(|_| panic!("Failed to read {memory_x}"));
    fs::write(out_dir.join("memory.x"), contents).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={memory_x}");
}
