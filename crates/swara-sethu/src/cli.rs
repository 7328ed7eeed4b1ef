use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Swara Sethu: AI voice detection for MP3 recordings.
#[derive(Parser)]
#[command(name = "swara-sethu")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Configuration file to use instead of the platform default.
    #[arg(long, global = true, env = "SWARA_SETHU_CONFIG")]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the credential-holding analysis proxy.
    Serve(ServeArgs),

    /// Submit an MP3 recording through the proxy and print the verdict.
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Port to listen on (overrides the config file).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Address to bind (overrides the config file).
    #[arg(long)]
    pub bind: Option<String>,

    /// API key for the classification endpoint.
    #[arg(long, env = "SWARA_SETHU_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Args)]
pub(crate) struct AnalyzeArgs {
    /// Recording to analyze. Exactly one MP3 is accepted.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Proxy base URL (overrides the config file).
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// Print the result as JSON instead of a report.
    #[arg(long)]
    pub json: bool,
}
