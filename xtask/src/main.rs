//! Workspace automation: options schema export, preset validation and
//! manifest checks.

use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use locomote::Options;

#[derive(Parser)]
#[command(author, version, about = "Workspace automation tasks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Write the options JSON Schema (stdout when no path is given)
    Schema {
        /// Output file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Check that every options preset in a directory parses
    Presets {
        /// Directory holding `*.toml` presets
        #[arg(default_value = "presets")]
        dir: PathBuf,
    },
    /// Check that files referenced by the workspace manifests exist
    Manifests,
    /// fmt + clippy -D warnings + tests (workspace)
    Ci,
}

fn schema(out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&Options::json_schema())
        .context("serialize options schema")?;
    match out {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("write {}", path.display()))?;
            println!("xtask: schema written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn presets(dir: &Path) -> Result<()> {
    let names = Options::list_presets(dir);
    if names.is_empty() {
        println!("xtask: no presets in {}", dir.display());
        return Ok(());
    }
    for name in &names {
        let path = dir.join(format!("{name}.toml"));
        let _ = Options::load(&path)
            .with_context(|| format!("preset {}", path.display()))?;
    }
    println!("xtask: {} presets valid", names.len());
    Ok(())
}

/// Package keys whose values are paths relative to the manifest.
const MANIFEST_FILE_KEYS: [&str; 2] = ["license-file", "readme"];

/// Files named by `manifest` (located in `dir`) that do not exist.
fn missing_manifest_files(manifest: &str, dir: &Path) -> Result<Vec<PathBuf>> {
    let doc: toml::Table = manifest.parse().context("parse manifest")?;
    let Some(package) = doc.get("package").and_then(toml::Value::as_table)
    else {
        return Ok(Vec::new());
    };
    Ok(MANIFEST_FILE_KEYS
        .iter()
        .filter_map(|key| package.get(*key).and_then(toml::Value::as_str))
        .map(|file| dir.join(file))
        .filter(|path| !path.exists())
        .collect())
}

fn manifests(root: &Path) -> Result<()> {
    let mut missing = Vec::new();
    for dir in [root.to_path_buf(), root.join("xtask")] {
        let path = dir.join("Cargo.toml");
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read {}", path.display()))?;
        missing.extend(
            missing_manifest_files(&text, &dir)
                .with_context(|| format!("manifest {}", path.display()))?,
        );
    }
    if !missing.is_empty() {
        let list: Vec<String> =
            missing.iter().map(|p| p.display().to_string()).collect();
        bail!("manifests reference missing files: {}", list.join(", "));
    }
    println!("xtask: manifests valid");
    Ok(())
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("spawn cargo")?;
    if !status.success() {
        bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}

fn ci() -> Result<()> {
    cargo(&["fmt", "--all", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])?;
    cargo(&["test", "--workspace"])?;
    manifests(Path::new("."))?;
    presets(Path::new("presets"))
}

fn main() -> Result<()> {
    match Cli::parse().cmd {
        Cmd::Schema { out } => schema(out.as_deref()),
        Cmd::Presets { dir } => presets(&dir),
        Cmd::Manifests => manifests(Path::new(".")),
        Cmd::Ci => ci(),
    }
}
