//! Trigger Engine (Component F): given the lifecycle events a Facade
//! operation just emitted for a job, finds every managed job wired to react
//! to them and applies the wired action. Cascade depth is exactly one —
//! jobs flipped by a cascade never themselves re-emit events within the
//! same operation — cyclic trigger graphs need no cycle detection as a
//! result.

use super::job::{TriggerAction, TriggerEvent};
use super::store::{CrontabBackend, CrontabStore};

/// Apply the cascade for one `(source_name, event)` pair: flip the enabled
/// flag of every managed job whose trigger matches, per its action.
/// Returns the names of jobs that were actually flipped, for the caller to
/// report or test against.
pub fn cascade<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    source_name: &str,
    event: TriggerEvent,
) -> Vec<String> {
    let mut flipped = Vec::new();
    for action in [TriggerAction::On, TriggerAction::Off, TriggerAction::Toggle] {
        for job in store.find_by_trigger_mut(action, source_name, event) {
            job.enabled = action.apply(job.enabled);
            flipped.push(job.name.clone());
        }
    }
    flipped
}

/// Apply cascades for every `(source_name, event)` pair emitted by one
/// Facade operation, in order. All cascades observe the snapshot as it
/// stood when the operation started firing events — no cascade's result
/// feeds back into another cascade lookup within the same call, since
/// lookups are always against the live store and cascades never emit
/// further events themselves.
pub fn cascade_all<B: CrontabBackend>(
    store: &mut CrontabStore<B>,
    events: &[(String, TriggerEvent)],
) -> Vec<String> {
    let mut flipped = Vec::new();
    for (source_name, event) in events {
        flipped.extend(cascade(store, source_name, *event));
    }
    flipped
}
