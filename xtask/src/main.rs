use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand, ValueEnum};
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "order_status_lambda";
const LAMBDA_BINARY: &str = "order_status_lambda";
const DIST_DIR: &str = "infra/order_status_lambda/dist";
const ARTIFACT_NAME: &str = "order_status.zip";

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the order status agent action workspace",
    long_about = "A unified CLI for running tests, CI checks and Lambda packaging\n\
                  in the order status agent action workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run unit and integration tests for every crate
    Test,
    /// Run CI checks (fmt, clippy, tests, packaging)
    Ci {
        /// Job to run
        #[arg(value_enum, default_value_t = CiJob::Check)]
        job: CiJob,
    },
    /// Build and package the Rust Lambda artifact for Terraform inputs
    ServerlessPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting, clippy, and tests
    Check,
    /// Build and zip the Lambda artifact
    Package,
    /// Run check + package
    All,
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }

    fn as_cargo_flag(self) -> Option<&'static str> {
        match self {
            Self::Debug => None,
            Self::Release => Some("--release"),
        }
    }
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    exit(1);
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .unwrap_or_else(|error| fail(format!("could not start cargo: {error}")))
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn package_order_status_lambda(target: &str, profile: BuildProfile) {
    if !target.contains("-linux-") {
        fail(format!(
            "`{target}` cannot run on Lambda; use a linux target such as x86_64-unknown-linux-gnu"
        ));
    }
    check_rust_target(target);

    step("Build order status lambda binary");
    let mut cargo_args = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--target",
        target,
        "--bin",
        LAMBDA_BINARY,
    ];
    if let Some(flag) = profile.as_cargo_flag() {
        cargo_args.push(flag);
    }
    run_cargo(&cargo_args);

    step("Zip bootstrap artifact");
    let binary_path = lambda_binary_path(target, profile);
    let binary = fs::read(&binary_path).unwrap_or_else(|error| {
        fail(format!("cannot read {}: {error}", binary_path.display()))
    });

    let dist_dir = Path::new(DIST_DIR);
    fs::create_dir_all(dist_dir)
        .unwrap_or_else(|error| fail(format!("cannot create {DIST_DIR}: {error}")));
    let zip_path = dist_dir.join(ARTIFACT_NAME);
    let file = fs::File::create(&zip_path)
        .unwrap_or_else(|error| fail(format!("cannot create {}: {error}", zip_path.display())));
    write_bootstrap_zip(file, &binary)
        .unwrap_or_else(|error| fail(format!("cannot write {}: {error}", zip_path.display())));

    eprintln!(
        "\nPackaged {} ({} bytes of binary)",
        zip_path.display(),
        binary.len()
    );
}

fn lambda_binary_path(target: &str, profile: BuildProfile) -> PathBuf {
    Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(LAMBDA_BINARY)
}

/// A missing `rustup` only skips the check; a missing target stops the build.
fn check_rust_target(target: &str) {
    let Ok(output) = Command::new("rustup")
        .args(["target", "list", "--installed"])
        .output()
    else {
        eprintln!("warning: rustup not found, skipping the `{target}` target check");
        return;
    };

    if !target_is_listed(&String::from_utf8_lossy(&output.stdout), target) {
        fail(format!(
            "rust target `{target}` is not installed; run `rustup target add {target}`"
        ));
    }
}

fn target_is_listed(installed: &str, target: &str) -> bool {
    installed.lines().any(|line| line.trim() == target)
}

/// The `provided.al2023` runtime executes the archive's `bootstrap` entry.
fn write_bootstrap_zip<W: Write + Seek>(writer: W, binary: &[u8]) -> ZipResult<W> {
    let mut zip = ZipWriter::new(writer);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(binary)?;
    zip.finish()
}

// ── CI jobs ────────────────────────────────────────────────────────

fn run_tests() {
    step("Test order_status_core");
    run_cargo(&["test", "-p", "order_status_core"]);

    step("Test order_status_lambda");
    run_cargo(&["test", "-p", LAMBDA_PACKAGE]);
}

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    run_tests();
}

fn ci_package() {
    package_order_status_lambda("x86_64-unknown-linux-gnu", BuildProfile::Release);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Test => run_tests(),
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Package => ci_package(),
                CiJob::All => {
                    ci_check();
                    ci_package();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::ServerlessPackage { target, profile } => {
            package_order_status_lambda(&target, profile);
        }
    }
}
