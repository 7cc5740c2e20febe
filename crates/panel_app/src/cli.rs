use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use panel_core::DownloadFormat;

/// Top-level CLI parser for the `panel_app` binary.
#[derive(Debug, Parser)]
#[command(
    name = "panel_app",
    version,
    about = "Export a rendered content panel as Markdown or plain text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file (RON). Defaults to ./panel_export.ron when present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write log lines to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a saved page once
    Export(ExportArgs),
    /// Poll a page file until the action container shows up, then convert it
    Watch(WatchArgs),
    /// Send one JSON message to the background handler and print its response
    Message(MessageArgs),
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Saved HTML page
    pub input: PathBuf,

    /// Output format; repeat for both. Defaults to md.
    #[arg(short = 'f', long = "format", value_enum)]
    pub formats: Vec<FormatArg>,

    /// Output directory (overrides the settings file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the converted content instead of saving it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub export: ExportArgs,

    /// Polling interval in milliseconds
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 60)]
    pub timeout_secs: u64,
}

#[derive(Debug, Args)]
pub struct MessageArgs {
    /// JSON envelope, e.g. '{"action":"pageInfo","data":{...}}'. Read from stdin when omitted.
    pub json: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum FormatArg {
    Md,
    Txt,
}

impl From<FormatArg> for DownloadFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Md => DownloadFormat::Markdown,
            FormatArg::Txt => DownloadFormat::PlainText,
        }
    }
}

impl ExportArgs {
    /// Requested formats in order, markdown when none was given.
    pub fn download_formats(&self) -> Vec<DownloadFormat> {
        if self.formats.is_empty() {
            return vec![DownloadFormat::Markdown];
        }
        self.formats.iter().copied().map(DownloadFormat::from).collect()
    }
}
