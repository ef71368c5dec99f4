use clap::Parser;

use crate::supercron::SuperCronCommand;

#[derive(Parser)]
#[command(name = "supercron")]
#[command(about = "Manage your crontab with natural-language schedules and named jobs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Suppress all stdout/stderr normally produced by the command
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: SuperCronCommand,
}
