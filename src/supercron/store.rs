//! Crontab Store (Component E): loads, indexes, mutates, and persists the
//! user's cron table. Crontab I/O itself is abstracted behind
//! `CrontabBackend` so the store can be driven against an in-memory table in
//! tests instead of shelling out to the real `crontab` binary.

use std::io::Write as _;
use std::process::{Command, Stdio};

use anyhow::Context;

use super::comment::{decode_comment, encode_comment};
use super::error::SuperCronError;
use super::job::{CrontabLine, Job, Trigger, TriggerAction, TriggerEvent};
use super::schedule::Schedule;

/// Where the store reads and writes the serialized cron table. Production
/// code uses `ProcessBackend`; tests substitute `MemoryBackend`.
pub trait CrontabBackend {
    fn load(&self) -> Result<String, SuperCronError>;
    fn write(&self, content: &str) -> Result<(), SuperCronError>;
}

/// Shells out to the system `crontab` binary.
#[derive(Debug, Default)]
pub struct ProcessBackend;

impl CrontabBackend for ProcessBackend {
    fn load(&self) -> Result<String, SuperCronError> {
        let output = Command::new("crontab")
            .arg("-l")
            .output()
            .context("failed to execute crontab -l")
            .map_err(|e| SuperCronError::BackendIo(e.to_string()))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("no crontab") {
                Ok(String::new())
            } else {
                Err(SuperCronError::BackendIo(stderr.trim().to_string()))
            }
        }
    }

    fn write(&self, content: &str) -> Result<(), SuperCronError> {
        let mut child = Command::new("crontab")
            .arg("-")
            .stdin(Stdio::piped())
            .spawn()
            .context("failed to spawn crontab -")
            .map_err(|e| SuperCronError::BackendIo(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(content.as_bytes())
                .context("failed to write to crontab stdin")
                .map_err(|e| SuperCronError::BackendIo(e.to_string()))?;
        }

        let status = child
            .wait()
            .context("failed to wait for crontab")
            .map_err(|e| SuperCronError::BackendIo(e.to_string()))?;
        if !status.success() {
            return Err(SuperCronError::BackendIo(format!(
                "crontab exited with status {status}"
            )));
        }
        Ok(())
    }
}

/// An in-memory crontab for tests: no subprocess, no real user state.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    content: std::cell::RefCell<String>,
}

impl MemoryBackend {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            content: std::cell::RefCell::new(seed.into()),
        }
    }
}

impl CrontabBackend for MemoryBackend {
    fn load(&self) -> Result<String, SuperCronError> {
        Ok(self.content.borrow().clone())
    }

    fn write(&self, content: &str) -> Result<(), SuperCronError> {
        *self.content.borrow_mut() = content.to_string();
        Ok(())
    }
}

/// Split a schedule-plus-tail line into its cron time-spec and the
/// remaining `command [# comment]` text. `None` means the line does not
/// look like a cron entry at all.
fn tokenize_entry(working: &str) -> Option<(String, String)> {
    if let Some(rest) = working.strip_prefix("@reboot") {
        let rest = rest.trim_start();
        if rest.is_empty() {
            return None;
        }
        return Some(("@reboot".to_string(), rest.to_string()));
    }
    let parts: Vec<&str> = working.splitn(6, char::is_whitespace).collect();
    if parts.len() < 6 {
        return None;
    }
    Some((parts[..5].join(" "), parts[5].to_string()))
}

/// Split `command [# comment]` on the last ` # ` separator.
fn split_comment(s: &str) -> (String, Option<String>) {
    match s.rfind(" # ") {
        Some(idx) => (s[..idx].to_string(), Some(s[idx + 3..].to_string())),
        None => (s.to_string(), None),
    }
}

/// Parse one raw line of a cron table into a `CrontabLine`, preserving the
/// original bytes verbatim for anything this tool does not own.
fn parse_line(raw: &str) -> CrontabLine {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CrontabLine::Passthrough(raw.to_string());
    }

    let (disabled, working) = match trimmed.strip_prefix("# ") {
        Some(rest) if tokenize_entry(rest).is_some() => (true, rest),
        Some(_) => return CrontabLine::Passthrough(raw.to_string()),
        None if trimmed.starts_with('#') => return CrontabLine::Passthrough(raw.to_string()),
        None => (false, trimmed),
    };

    let Some((schedule_spec, tail)) = tokenize_entry(working) else {
        return CrontabLine::Passthrough(raw.to_string());
    };

    let (command, comment) = split_comment(&tail);
    let Some(comment) = comment else {
        return CrontabLine::Unmanaged(raw.to_string());
    };
    let Some((name, trigger)) = decode_comment(&comment) else {
        return CrontabLine::Unmanaged(raw.to_string());
    };
    let Ok(schedule) = Schedule::decode(&schedule_spec) else {
        return CrontabLine::Unmanaged(raw.to_string());
    };

    match Job::new(name, command, schedule) {
        Ok(mut job) => {
            job.enabled = !disabled;
            job.trigger = trigger;
            CrontabLine::Managed(job)
        }
        Err(_) => CrontabLine::Unmanaged(raw.to_string()),
    }
}

/// Render one `Job` back to its cron-table line.
fn serialize_job(job: &Job) -> String {
    let prefix = if job.enabled { "" } else { "# " };
    let comment = encode_comment(&job.name, job.trigger.as_ref());
    format!(
        "{prefix}{} {} # {comment}",
        job.schedule.encode(),
        job.command
    )
}

fn serialize_line(line: &CrontabLine) -> String {
    match line {
        CrontabLine::Managed(job) => serialize_job(job),
        CrontabLine::Unmanaged(raw) | CrontabLine::Passthrough(raw) => raw.clone(),
    }
}

/// The user's cron table as a transaction: `load` → mutate the in-memory
/// `lines` vector → `write`. Every method other than `load`/`write` is
/// synchronous, in-memory bookkeeping.
pub struct CrontabStore<B: CrontabBackend> {
    backend: B,
    lines: Vec<CrontabLine>,
}

impl<B: CrontabBackend> CrontabStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            lines: Vec::new(),
        }
    }

    pub fn load(&mut self) -> Result<(), SuperCronError> {
        let content = self.backend.load()?;
        self.lines = content.lines().map(parse_line).collect();
        Ok(())
    }

    pub fn write(&self) -> Result<(), SuperCronError> {
        let mut content = String::new();
        for line in &self.lines {
            content.push_str(&serialize_line(line));
            content.push('\n');
        }
        self.backend.write(&content)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CrontabLine> {
        self.lines.iter()
    }

    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.lines.iter().filter_map(|line| match line {
            CrontabLine::Managed(job) => Some(job),
            _ => None,
        })
    }

    pub fn jobs_mut(&mut self) -> impl Iterator<Item = &mut Job> {
        self.lines.iter_mut().filter_map(|line| match line {
            CrontabLine::Managed(job) => Some(job),
            _ => None,
        })
    }

    pub fn find_by_name(&self, name: &str) -> Vec<&Job> {
        self.jobs().filter(|job| job.name == name).collect()
    }

    pub fn find_by_name_mut(&mut self, name: &str) -> Vec<&mut Job> {
        let name = name.to_string();
        self.jobs_mut().filter(|job| job.name == name).collect()
    }

    pub fn find_by_trigger(
        &self,
        action: TriggerAction,
        source: &str,
        event: TriggerEvent,
    ) -> Vec<&Job> {
        self.jobs()
            .filter(|job| matches_trigger(job, action, source, event))
            .collect()
    }

    pub fn find_by_trigger_mut(
        &mut self,
        action: TriggerAction,
        source: &str,
        event: TriggerEvent,
    ) -> Vec<&mut Job> {
        let source = source.to_string();
        self.jobs_mut()
            .filter(|job| matches_trigger(job, action, &source, event))
            .collect()
    }

    pub fn insert(&mut self, job: Job) {
        self.lines.push(CrontabLine::Managed(job));
    }

    /// Remove every managed job for which `predicate` returns true.
    pub fn remove_managed(&mut self, predicate: impl Fn(&Job) -> bool) {
        self.lines.retain(|line| match line {
            CrontabLine::Managed(job) => !predicate(job),
            _ => true,
        });
    }
}

fn matches_trigger(job: &Job, action: TriggerAction, source: &str, event: TriggerEvent) -> bool {
    matches!(&job.trigger, Some(Trigger { action: a, source_name, event: e })
        if *a == action && source_name == source && *e == event)
}
