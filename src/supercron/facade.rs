//! Operations Facade (Component G): the typed, directly-testable surface
//! that orchestrates the Normalizer, Parser, Encoder, Comment Codec, Store
//! and Trigger Engine for each user-facing operation. Each operation takes
//! an explicit typed `*Request` struct rather than a loosely-typed argument
//! bag, so call sites and tests construct requests directly.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::SuperCronError;
use super::job::{validate_name, Job, Trigger, TriggerAction, TriggerEvent};
use super::parser::parse_sentence;
use super::store::{CrontabBackend, CrontabStore};
use super::trigger_engine::cascade_all;

pub struct AddRequest {
    pub name: String,
    pub command: String,
    pub sentence: String,
}

pub struct RenameRequest {
    pub old: String,
    pub new: String,
}

pub struct DeleteRequest {
    pub name: String,
}

pub struct EnableRequest {
    pub name: String,
}

pub struct DisableRequest {
    pub name: String,
}

pub struct TriggerRequest {
    pub name: String,
    /// Either the literal `"none"` or a sentence matching
    /// `<action> if <source> is <event>`.
    pub spec: String,
}

pub struct SearchRequest {
    pub name: String,
}

pub struct ClearRequest {
    pub force: bool,
}

/// What an operation actually did, for the CLI layer to report.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    /// Names of jobs directly touched by the requested operation.
    pub affected: Vec<String>,
    /// Names of jobs flipped as a side effect of a trigger cascade.
    pub cascaded: Vec<String>,
}

/// One row of a `search` result, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SearchRow {
    pub name: String,
    pub enabled: bool,
    pub trigger: Option<String>,
    pub time_spec: String,
    pub command: String,
}

static TRIGGER_SENTENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(on|off|toggle)\s+if\s+(.+?)\s+is\s+(enabled|disabled|toggled|added|deleted)\s*$")
        .unwrap()
});

fn parse_trigger_sentence(spec: &str) -> Result<Trigger, SuperCronError> {
    let caps = TRIGGER_SENTENCE
        .captures(spec)
        .ok_or_else(|| SuperCronError::MalformedTrigger(spec.to_string()))?;
    let action = TriggerAction::parse(&caps[1].to_lowercase())
        .ok_or_else(|| SuperCronError::MalformedTrigger(spec.to_string()))?;
    let event = TriggerEvent::parse(&caps[3].to_lowercase())
        .ok_or_else(|| SuperCronError::MalformedTrigger(spec.to_string()))?;
    Ok(Trigger {
        action,
        source_name: caps[2].trim().to_string(),
        event,
    })
}

/// Validate, parse, and insert one new job. Fires `Added` for its name.
pub fn add<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &AddRequest,
    now: (u32, u32),
) -> Result<OperationOutcome, SuperCronError> {
    validate_name(&req.name)?;
    let schedule = parse_sentence(&req.sentence, now)?;
    let job = Job::new(req.name.clone(), req.command.clone(), schedule)?;

    store.load()?;
    store.insert(job);
    let cascaded = cascade_all(store, &[(req.name.clone(), TriggerEvent::Added)]);
    store.write()?;

    Ok(OperationOutcome {
        affected: vec![req.name.clone()],
        cascaded,
    })
}

/// Rename every managed job named `old` to `new`. Fires `Deleted(old)` and
/// `Added(new)` exactly once, regardless of how many jobs matched.
pub fn rename<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &RenameRequest,
) -> Result<OperationOutcome, SuperCronError> {
    validate_name(&req.new)?;

    store.load()?;
    for job in store.find_by_name_mut(&req.old) {
        job.name = req.new.clone();
    }
    let cascaded = cascade_all(
        store,
        &[
            (req.old.clone(), TriggerEvent::Deleted),
            (req.new.clone(), TriggerEvent::Added),
        ],
    );
    store.write()?;

    Ok(OperationOutcome {
        affected: vec![req.new.clone()],
        cascaded,
    })
}

/// Remove every managed job named exactly `name`. Fires `Deleted` once.
pub fn delete<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &DeleteRequest,
) -> Result<OperationOutcome, SuperCronError> {
    store.load()?;
    store.remove_managed(|job| job.name == req.name);
    let cascaded = cascade_all(store, &[(req.name.clone(), TriggerEvent::Deleted)]);
    store.write()?;

    Ok(OperationOutcome {
        affected: vec![req.name.clone()],
        cascaded,
    })
}

/// Enable every managed job named `name`. Fires `Enabled` only if at least
/// one job actually flipped off→on; always fires `Toggled`.
pub fn enable<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &EnableRequest,
) -> Result<OperationOutcome, SuperCronError> {
    store.load()?;
    let mut changed = false;
    for job in store.find_by_name_mut(&req.name) {
        if !job.enabled {
            job.enabled = true;
            changed = true;
        }
    }
    let mut events = vec![(req.name.clone(), TriggerEvent::Toggled)];
    if changed {
        events.push((req.name.clone(), TriggerEvent::Enabled));
    }
    let cascaded = cascade_all(store, &events);
    store.write()?;

    Ok(OperationOutcome {
        affected: vec![req.name.clone()],
        cascaded,
    })
}

/// Disable every managed job named `name`. Fires `Disabled` only if at
/// least one job actually flipped on→off; always fires `Toggled`.
pub fn disable<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &DisableRequest,
) -> Result<OperationOutcome, SuperCronError> {
    store.load()?;
    let mut changed = false;
    for job in store.find_by_name_mut(&req.name) {
        if job.enabled {
            job.enabled = false;
            changed = true;
        }
    }
    let mut events = vec![(req.name.clone(), TriggerEvent::Toggled)];
    if changed {
        events.push((req.name.clone(), TriggerEvent::Disabled));
    }
    let cascaded = cascade_all(store, &events);
    store.write()?;

    Ok(OperationOutcome {
        affected: vec![req.name.clone()],
        cascaded,
    })
}

/// Set or clear the trigger on every managed job named `name`. A name that
/// matches no managed job is a no-op commit, not an error.
pub fn trigger<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &TriggerRequest,
) -> Result<OperationOutcome, SuperCronError> {
    let new_trigger = if req.spec.trim().eq_ignore_ascii_case("none") {
        None
    } else {
        Some(parse_trigger_sentence(&req.spec)?)
    };

    store.load()?;
    for job in store.find_by_name_mut(&req.name) {
        job.trigger = new_trigger.clone();
    }
    store.write()?;

    Ok(OperationOutcome {
        affected: vec![req.name.clone()],
        cascaded: Vec::new(),
    })
}

/// List jobs matching `req.name`: `@supercron` for every managed job,
/// `@all` for every cron line (managed or not), anything else for exact
/// name matches. Never mutates the table.
pub fn search<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &SearchRequest,
) -> Result<Vec<SearchRow>, SuperCronError> {
    store.load()?;

    let rows: Vec<SearchRow> = match req.name.as_str() {
        "@supercron" => store.jobs().map(job_row).collect(),
        "@all" => store
            .iter()
            .filter_map(|line| match line {
                super::job::CrontabLine::Managed(job) => Some(job_row(job)),
                super::job::CrontabLine::Unmanaged(raw) => Some(SearchRow {
                    name: String::new(),
                    enabled: !raw.trim_start().starts_with("# "),
                    trigger: None,
                    time_spec: String::new(),
                    command: raw.clone(),
                }),
                super::job::CrontabLine::Passthrough(_) => None,
            })
            .collect(),
        name => store.find_by_name(name).into_iter().map(job_row).collect(),
    };

    Ok(rows)
}

fn job_row(job: &Job) -> SearchRow {
    SearchRow {
        name: job.name.clone(),
        enabled: job.enabled,
        trigger: job.trigger.as_ref().map(trigger_repr),
        time_spec: job.schedule.encode(),
        command: job.command.clone(),
    }
}

fn trigger_repr(trigger: &Trigger) -> String {
    format!(
        "{} if {} is {}",
        trigger.action.as_str(),
        trigger.source_name,
        trigger.event.as_str()
    )
}

/// Mark every managed job for deletion and remove it, preserving unmanaged
/// lines untouched. Prompts for confirmation before `load` unless `force`
/// is set — the prompt must happen before the transaction opens, so a
/// cancelled clear never touches the crontab at all.
pub fn clear<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    req: &ClearRequest,
) -> Result<OperationOutcome, SuperCronError> {
    if !req.force && !crate::utils::confirm("Remove every SuperCron job from the crontab?") {
        return Err(SuperCronError::UserCancelled);
    }

    store.load()?;
    let affected: Vec<String> = store.jobs().map(|job| job.name.clone()).collect();
    store.remove_managed(|_| true);
    store.write()?;

    Ok(OperationOutcome {
        affected,
        cascaded: Vec::new(),
    })
}
