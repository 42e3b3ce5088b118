//! Build script for the storefront crate.
//!
//! Hashes the stylesheet so templates can append a cache-busting version.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let Ok(content) = fs::read(&css_path) else {
        println!("cargo:warning=Could not read {}", css_path.display());
        println!("cargo:rustc-env=CSS_HASH=dev");
        return;
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash: String = digest.chars().take(8).collect();
    println!("cargo:rustc-env=CSS_HASH={short_hash}");
}
