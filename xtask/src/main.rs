//! Build automation tasks for Office Builder
//!
//! Usage:
//!   cargo xtask dist    # Release build + default config in dist/
//!   cargo xtask ci      # fmt check, clippy, tests

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

const BIN_NAME: &str = "office-builder";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for Office Builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a release binary and copy it with a default config.ron into dist/
    Dist {
        /// Cross-compilation target triple
        #[arg(long)]
        target: Option<String>,
    },
    /// Run the checks CI runs
    Ci {
        /// Skip clippy
        #[arg(long)]
        no_clippy: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Dist { target } => dist(target.as_deref()),
        Commands::Ci { no_clippy } => ci(no_clippy),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

fn cargo(root: &Path) -> Command {
    let mut cmd = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()));
    cmd.current_dir(root);
    cmd
}

/// Release binary plus default config in dist/
fn dist(target: Option<&str>) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist");

    println!("Building release binary...");
    let mut build = cargo(&root);
    build.args(["build", "--release", "--bin", BIN_NAME]);
    if let Some(target) = target {
        build.args(["--target", target]);
    }
    run_cmd(&mut build)?;

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    let exe = format!("{}{}", BIN_NAME, std::env::consts::EXE_SUFFIX);
    let release_dir = match target {
        Some(target) => root.join("target").join(target).join("release"),
        None => root.join("target/release"),
    };
    std::fs::copy(release_dir.join(&exe), dist.join(&exe))
        .with_context(|| format!("Failed to copy {}", exe))?;

    std::fs::copy(root.join("config.example.ron"), dist.join("config.ron"))
        .context("Failed to copy config.example.ron")?;

    println!("Done! Output in dist/");
    println!("Copy config.ron to the user config directory (office-builder/) to change defaults.");
    Ok(())
}

/// Formatting, lints and tests for the whole workspace
fn ci(no_clippy: bool) -> Result<()> {
    let root = project_root()?;

    println!("Checking formatting...");
    run_cmd(cargo(&root).args(["fmt", "--all", "--", "--check"]))?;

    if !no_clippy {
        println!("Running clippy...");
        run_cmd(cargo(&root).args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]))?;
    }

    println!("Running tests...");
    run_cmd(cargo(&root).args(["test", "--workspace"]))?;

    println!("All checks passed.");
    Ok(())
}
