use std::path::PathBuf;

use clap::Parser;

/// Stride prompt tester
#[derive(Debug, Parser)]
#[command(name = "stride", about = "Fan a prompt out to configured AI providers and compare replies")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "stride.toml", env = "STRIDE_CONFIG")]
    pub config: PathBuf,

    /// Prompt sent to every allow-listed provider
    pub prompt: String,

    /// Backend to include, by model id or configured name (repeatable)
    #[arg(short, long = "model", required = true)]
    pub models: Vec<String>,
}
