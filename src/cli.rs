//! Command-line interface definition using clap.

use clap::Parser;

use crate::format::OutputFormat;

/// Convert a WhatsApp chat export (TXT, or ZIP with media) into JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatview")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatview \"WhatsApp Chat with Bob.txt\"
    chatview export.zip -o chat.json --media-dir media/
    chatview _chat.txt -f jsonl --date-from 2024-01-01 --date-to 2024-01-31
    chatview export.zip --from Alice --swap")]
pub struct Args {
    /// Path to the exported .txt or .zip file
    pub input: String,

    /// Path to output file [default: chat.<format extension>]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write extracted media into this directory and keep it
    #[arg(long, value_name = "DIR")]
    pub media_dir: Option<String>,

    /// First day to keep (YYYY-MM-DD); alone, keeps only that day
    #[arg(long, value_name = "DATE")]
    pub date_from: Option<String>,

    /// Last day to keep (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date_to: Option<String>,

    /// Keep only messages from this user
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Treat this participant as self instead of the detected one
    #[arg(long = "self", value_name = "NAME")]
    pub self_name: Option<String>,

    /// Swap sides: mark everyone except self as self
    #[arg(long)]
    pub swap: bool,

    /// Drop notices (joins, deletions, encryption banner)
    #[arg(long)]
    pub no_system: bool,
}

impl Args {
    /// Output path, falling back to `chat.<ext>`.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("chat.{}", self.format.extension()))
    }
}
