//! Command-line surface for the `supercron` subcommands.

use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum SuperCronCommand {
    /// Schedule a new job from a natural-language repetition sentence
    Add(AddArgs),
    /// Rename every job matching OLD to NEW
    Rename(RenameArgs),
    /// Delete every job matching NAME
    Delete(NameArgs),
    /// Enable every job matching NAME
    Enable(NameArgs),
    /// Disable every job matching NAME
    Disable(NameArgs),
    /// List jobs matching NAME, or the sentinels @supercron / @all
    Search(NameArgs),
    /// Remove every SuperCron-managed job from the crontab
    Clear(ClearArgs),
    /// Set or clear the trigger on every job matching NAME
    Trigger(TriggerArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Name to give the new job
    pub name: String,
    /// Shell command to run
    #[arg(short = 'c', long = "command")]
    pub command: String,
    /// Natural-language repetition sentence, e.g. "every 2 hours"
    #[arg(short = 'r', long = "repeat")]
    pub sentence: String,
    /// Emit machine-readable JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    pub old: String,
    pub new: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct NameArgs {
    pub name: String,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short = 'f', long = "force")]
    pub force: bool,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TriggerArgs {
    pub name: String,
    /// "none", or "<on|off|toggle> if <source> is <event>"
    #[arg(short = 't', long = "trigger")]
    pub spec: String,
    #[arg(long)]
    pub json: bool,
}
