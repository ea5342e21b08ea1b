//! # Qafiyah Publisher Entry Point
//!
//! ```text
//! main()
//!   │
//!   ├─> Load .env (dotenvy)
//!   ├─> Initialize logging (console + rolling file)
//!   ├─> Parse CLI arguments (clap)
//!   ├─> Create a current-thread Tokio runtime
//!   └─> Run: query -> build -> stats -> publish
//! ```
//!
//! Exit code 0 on success or a completed dry run, 1 on any error.

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // CLI output

mod cli;

use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is normal.
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Warning: failed to load .env file: {e}");
    }

    if let Err(e) = qafiyah_publisher::logging::init() {
        qafiyah_publisher::logging::init_console();
        tracing::warn!("File logging unavailable: {e:#}");
    }

    let cli = cli::Cli::parse();

    // The run is strictly sequential; a single-threaded runtime is enough.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli::run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Run failed: {e:#}");
            eprintln!("\nError: {e:#}");
            ExitCode::FAILURE
        }
    }
}
