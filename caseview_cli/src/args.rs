use std::path::PathBuf;

use caseview_codegen::{ConfigError, ConfigFile};
use clap::Parser;

/// caseview - generate switch-case views for tagged unions
#[derive(Parser, Debug)]
#[command(name = "caseview")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Rust source files, or directories to search for `.rs` files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Also generate for the enum with this name, with or without the attribute
    #[arg(short = 't', long = "type", value_name = "NAME")]
    pub types: Vec<String>,

    /// Path of the runtime crate the generated code refers to
    #[arg(long, value_name = "PATH")]
    pub runtime: Option<String>,

    /// Explicit renderer for a payload type
    #[arg(short = 'r', long = "renderer", value_name = "TYPE=PATH")]
    pub renderers: Vec<String>,

    /// JSON config file; command-line flags override its values
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the generated code to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the generated token text as is, without running rustfmt
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Fail when any warning is reported
    #[arg(long, default_value_t = false)]
    pub deny_warnings: bool,

    /// Number of worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// More logging: -v info, -vv debug, -vvv trace
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Merge the config file (if any) with the command-line overrides
    pub fn to_config(&self) -> Result<ConfigFile, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };
        if let Some(runtime) = &self.runtime {
            config.set_runtime(runtime)?;
        }
        for assignment in &self.renderers {
            config.set_renderer_assignment(assignment)?;
        }
        Ok(config)
    }

    /// Log filter used when `RUST_LOG` is not set
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
