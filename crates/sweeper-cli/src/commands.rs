use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "sweeper")]
#[command(
    about = "Turn a plain-English cleanup request into a safe, recoverable delete",
    long_about = None
)]
pub struct Cli {
    /// e.g. "delete the zip files older than 30 days containing 'report'"
    pub prompt: Option<String>,

    /// Actually move the selection to the trash (default is dry-run)
    #[arg(long)]
    pub execute: bool,

    /// Comma-separated allowed root directories (default: downloads,
    /// desktop and documents)
    #[arg(long, value_delimiter = ',')]
    pub scopes: Option<Vec<String>>,

    /// Reveal the selected files in the OS file browser before confirming
    #[arg(long)]
    pub preview: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}
