//! Build script for bouncebox-firmware
//!
//! Places memory.x where the linker finds it and passes the cortex-m-rt and
//! defmt linker scripts to the binary.

use std::env;
use std::fs;
use std::path::PathBuf;

const LINKER_SCRIPTS: &[&str] = &["link.x", "defmt.x"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));

    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x"))
        .expect("memory.x written to OUT_DIR");
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    for script in LINKER_SCRIPTS {
        println!("cargo:rustc-link-arg-bins=-T{script}");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
