use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// target/<profile> derived from OUT_DIR (target/<profile>/build/backend-xxx/out)
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

/// Copies the workspace config.toml next to the binary, where the server looks first
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
    let source_config = workspace_root.join("config.toml");
    if !source_config.exists() {
        return;
    }

    match profile_dir() {
        Some(dir) => {
            if let Err(e) = fs::copy(&source_config, dir.join("config.toml")) {
                println!("cargo:warning=Failed to copy config.toml: {}", e);
            }
        }
        None => println!("cargo:warning=Could not locate the target profile directory"),
    }
}
