//! Build script for the festlist CLI.
//!
//! Places the configuration template next to the `.env` file that
//! `config::load_env` reads at runtime, so a fresh install has an example of
//! every supported variable in the place the application looks for it.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` into `<local data dir>/festlist/`.
///
/// # Destination
///
/// - Linux: `~/.local/share/festlist/.env.example`
/// - macOS: `~/Library/Application Support/festlist/.env.example`
/// - Windows: `%LOCALAPPDATA%/festlist/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// destination directory or to write the copy fails the build.
///
/// The dashboard template is embedded with `include_str!`, so it is tracked
/// here as well to force a rebuild when it changes.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-changed=templates/dashboard.html");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    data_dir.push("festlist");
    fs::create_dir_all(&data_dir)?;

    if !template.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
        return Ok(());
    }

    fs::copy(&template, data_dir.join(".env.example"))?;
    Ok(())
}
