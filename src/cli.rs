// ABOUTME: Command-line arguments for khfix
// ABOUTME: The line number stays a raw string so validation messages come from khfix, not clap

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "khfix",
    version,
    about = "Remove a line from ~/.ssh/known_hosts, keeping a backup for --undo"
)]
pub struct Cli {
    /// Restores from most recent backup
    #[arg(long)]
    pub undo: bool,

    /// Print the default configuration file and exit
    #[arg(long)]
    pub print_config: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Line of known_hosts to remove, as reported by ssh
    #[arg(value_name = "LINE", allow_negative_numbers = true)]
    pub line: Option<String>,
}
