//! Public surface for reelshelf.
//!
//! Re-exports the building blocks and provides the command implementations
//! and logging setup shared by the `reelshelf` binary.

pub mod commands;

/// Re-export for convenience.
pub use reelshelf_client as client;
/// Re-export for convenience.
pub use reelshelf_config as config;
pub use reelshelf_core as core;
/// Re-export for convenience.
pub use reelshelf_protocol as protocol;

use anyhow::Context;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput<'a> {
    /// stderr, filtered by `RUST_LOG`.
    Stderr,
    /// Appended to a file, filtered by `RUST_LOG` (default `info`).
    File(&'a Path),
    /// Discarded, `RUST_LOG` included. Used while the terminal UI owns the
    /// screen.
    Quiet,
}

/// Initialize `env_logger` with millisecond timestamps.
///
/// Repeated calls are ignored.
pub fn init_logging(output: LogOutput<'_>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.format_timestamp_millis();
    match output {
        LogOutput::Stderr => {}
        LogOutput::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .filter_level(LevelFilter::Info)
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogOutput::Quiet => {
            builder.filter_level(LevelFilter::Off);
            let _ = builder.try_init();
            return Ok(());
        }
    }
    builder.parse_default_env();
    let _ = builder.try_init();
    Ok(())
}
