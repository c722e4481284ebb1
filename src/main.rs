//! digestcheck CLI - File Digest and Integrity Verification Utility
//!
//! Thin front end over the digest engine: parses arguments, runs one
//! computation, and maps results and error kinds to output and exit codes.

use clap::Parser;
use digestcheck::config::{CliArgs, Commands, DigestConfig, HashAlgorithm, OutputFormat};
use digestcheck::error::{DigestError, DigestErrorKind, Result};
use digestcheck::hash::{Digest, DigestEngine, DigestRequest, VerificationResult};
use digestcheck::progress::ProgressReporter;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Exit code for a digest mismatch
const EXIT_MISMATCH: i32 = 1;
/// Exit code for any error
const EXIT_ERROR: i32 = 2;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();

    init_logging(&args);

    let config = match DigestConfig::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", DigestError::config(e));
            std::process::exit(EXIT_ERROR);
        }
    };

    // Handle result
    if let Err(e) = run(&args, &config) {
        eprintln!("Error: {}", user_message(&e, &config));
        std::process::exit(EXIT_ERROR);
    }
}

fn init_logging(args: &CliArgs) {
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(args: &CliArgs, config: &DigestConfig) -> Result<()> {
    match &args.command {
        Commands::Hash { file } => cmd_hash(file, config, args.verbose),
        Commands::Verify { file, expected } => cmd_verify(file, expected, config, args.verbose),
        Commands::Algorithms => cmd_algorithms(config),
    }
}

fn build_engine(config: &DigestConfig) -> DigestEngine {
    let progress = if config.progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::disabled()
    };

    let engine = DigestEngine::new()
        .with_chunk_size(config.chunk_size)
        .with_progress(progress);

    if let Some(secs) = config.timeout {
        engine.cancellation_token().cancel_after(Duration::from_secs(secs));
    }

    engine
}

#[derive(Serialize)]
struct HashReport<'a> {
    path: &'a Path,
    #[serde(flatten)]
    digest: &'a Digest,
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    path: &'a Path,
    #[serde(flatten)]
    verification: &'a VerificationResult,
}

fn cmd_hash(file: &Path, config: &DigestConfig, verbose: u8) -> Result<()> {
    let engine = build_engine(config);
    let digest = engine.compute(&DigestRequest::new(file, config.algorithm))?;

    match config.format {
        OutputFormat::Json => print_json(&HashReport { path: file, digest: &digest })?,
        OutputFormat::Text if config.quiet => println!("{}", digest),
        OutputFormat::Text => println!("{}  {}", digest, file.display()),
    }

    if verbose > 0 {
        print_stats(&engine, &digest);
    }

    Ok(())
}

fn cmd_verify(file: &Path, expected: &str, config: &DigestConfig, verbose: u8) -> Result<()> {
    let engine = build_engine(config);
    let verification = engine.verify(&DigestRequest::new(file, config.algorithm), expected)?;

    match config.format {
        OutputFormat::Json => print_json(&VerifyReport {
            path: file,
            verification: &verification,
        })?,
        OutputFormat::Text if config.quiet => {
            println!("{}", if verification.is_match() { "OK" } else { "FAILED" });
        }
        OutputFormat::Text => {
            println!("File:            {}", file.display());
            println!("Algorithm:       {}", config.algorithm.name());
            println!("Calculated hash: {}", verification.digest);
            println!("Expected hash:   {}", verification.expected);
            if verification.is_match() {
                println!("Integrity verified ✓");
            } else {
                println!("Integrity check failed ✗");
            }
        }
    }

    if verbose > 0 {
        print_stats(&engine, &verification.digest);
    }

    if !verification.is_match() {
        std::process::exit(EXIT_MISMATCH);
    }

    Ok(())
}

fn cmd_algorithms(config: &DigestConfig) -> Result<()> {
    #[derive(Serialize)]
    struct AlgorithmInfo {
        id: &'static str,
        name: &'static str,
        bytes: usize,
        default: bool,
    }

    let infos: Vec<AlgorithmInfo> = HashAlgorithm::ALL
        .iter()
        .map(|a| AlgorithmInfo {
            id: a.id(),
            name: a.name(),
            bytes: a.output_size(),
            default: *a == HashAlgorithm::default(),
        })
        .collect();

    match config.format {
        OutputFormat::Json => print_json(&infos)?,
        OutputFormat::Text => {
            for info in infos {
                println!(
                    "{:8} {:8} {:>3} bits{}",
                    info.id,
                    info.name,
                    info.bytes * 8,
                    if info.default { "  (default)" } else { "" }
                );
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| DigestError::config(format!("Failed to encode JSON: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn print_stats(engine: &DigestEngine, digest: &Digest) {
    eprintln!(
        "{} of input, {} byte chunks",
        humansize::format_size(digest.size(), humansize::BINARY),
        engine.chunk_size()
    );
    if let Some(progress) = engine.progress() {
        progress.summary().print();
    }
}

/// Map error kinds to messages for the terminal
fn user_message(err: &DigestError, config: &DigestConfig) -> String {
    match err.kind() {
        DigestErrorKind::NotFound => format!("{} (check the path)", err),
        DigestErrorKind::PermissionDenied => format!("{} (file is not readable)", err),
        DigestErrorKind::Cancelled => match config.timeout {
            Some(secs) => format!("Hashing timed out after {} seconds", secs),
            None => err.to_string(),
        },
        DigestErrorKind::UnsupportedAlgorithm
        | DigestErrorKind::IoFailure
        | DigestErrorKind::InvalidInput
        | DigestErrorKind::Config => err.to_string(),
    }
}
