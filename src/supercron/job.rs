//! The data model: `Job`, `Trigger`, and the union of line kinds a
//! `CrontabStore` holds.

use super::error::SuperCronError;
use super::schedule::Schedule;

/// Reserved names that can never be assigned to a stored job.
pub const FORBIDDEN_NAMES: [&str; 3] = ["@all", "@supercron", "@tobedeleted"];

/// The sentinel `clear` renames every managed job to before deleting it.
pub const TOMBSTONE_NAME: &str = "@tobedeleted";

/// Validate a job name: non-empty, not a reserved sentinel, no `%` byte.
pub fn validate_name(name: &str) -> Result<(), SuperCronError> {
    if name.is_empty() {
        return Err(SuperCronError::InvalidName(name.to_string()));
    }
    if FORBIDDEN_NAMES.contains(&name) {
        return Err(SuperCronError::InvalidName(name.to_string()));
    }
    if name.contains('%') {
        return Err(SuperCronError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    On,
    Off,
    Toggle,
}

impl TriggerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerAction::On => "on",
            TriggerAction::Off => "off",
            TriggerAction::Toggle => "toggle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "on" => Some(TriggerAction::On),
            "off" => Some(TriggerAction::Off),
            "toggle" => Some(TriggerAction::Toggle),
            _ => None,
        }
    }

    /// Apply this action to an `enabled` flag.
    pub fn apply(&self, enabled: bool) -> bool {
        match self {
            TriggerAction::On => true,
            TriggerAction::Off => false,
            TriggerAction::Toggle => !enabled,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Enabled,
    Disabled,
    Toggled,
    Added,
    Deleted,
}

impl TriggerEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerEvent::Enabled => "enabled",
            TriggerEvent::Disabled => "disabled",
            TriggerEvent::Toggled => "toggled",
            TriggerEvent::Added => "added",
            TriggerEvent::Deleted => "deleted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "enabled" => Some(TriggerEvent::Enabled),
            "disabled" => Some(TriggerEvent::Disabled),
            "toggled" => Some(TriggerEvent::Toggled),
            "added" => Some(TriggerEvent::Added),
            "deleted" => Some(TriggerEvent::Deleted),
            _ => None,
        }
    }
}

/// A rule attached to a job that reacts to a lifecycle event on some other
/// *source* job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub action: TriggerAction,
    pub source_name: String,
    pub event: TriggerEvent,
}

/// A job managed by SuperCron: a name, a command, a schedule, an
/// enabled/disabled flag and an optional trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub command: String,
    pub schedule: Schedule,
    pub enabled: bool,
    pub trigger: Option<Trigger>,
}

impl Job {
    pub fn new(name: String, command: String, schedule: Schedule) -> Result<Self, SuperCronError> {
        validate_name(&name)?;
        Ok(Job {
            name,
            command,
            schedule,
            enabled: true,
            trigger: None,
        })
    }
}

/// One line of the user's cron table, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrontabLine {
    /// A job created (and therefore owned) by this tool.
    Managed(Job),
    /// A recognized five-field/`@reboot` cron entry with no `SuperCron__`
    /// marker — not ours to touch, but still a cron line.
    Unmanaged(String),
    /// A blank line or a comment that never looked like a cron entry.
    Passthrough(String),
}
