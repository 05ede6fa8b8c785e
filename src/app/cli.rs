use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sort media files into a year/month folder tree"
)]
pub struct Cli {
    /// Source files or folders to organize (prompted for when omitted)
    #[arg(long, short = 's', num_args = 1.., value_name = "PATH")]
    pub source: Option<Vec<String>>,

    /// Destination folder for the organized tree (prompted for when omitted)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub destination: Option<String>,

    /// Move files instead of copying them (prompted for when omitted)
    #[arg(long = "move", value_name = "BOOL")]
    pub move_files: Option<bool>,

    /// Glob patterns for files to skip, relative to each source folder
    #[arg(long, num_args = 1.., value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Report planned placements without touching any file
    #[arg(long)]
    pub dry_run: bool,

    /// Resolve every conflict as "continue" without asking
    #[arg(long)]
    pub auto: bool,
}
