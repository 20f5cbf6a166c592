use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for vgdrill
#[derive(Parser, Debug)]
#[command(version, about = "vgdrill")]
pub struct Args {
    /// Path to the sales CSV (plain or gzipped)
    pub path: PathBuf,

    /// Specify that the file has no header
    #[arg(long = "no-header", action)]
    pub no_header: bool,

    /// Specify the delimiter to use when reading the file
    #[arg(long = "delimiter")]
    pub delimiter: Option<u8>,

    /// Seed for the synthetic imputation draws (deterministic output)
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Write chart payloads (sunburst JSON, scatter/bar PNG) to this
    /// directory after every click
    #[arg(long = "export-dir")]
    pub export_dir: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long = "write-config", action)]
    pub write_config: bool,

    /// Overwrite an existing config file when writing it
    #[arg(long = "force", action)]
    pub force: bool,
}
