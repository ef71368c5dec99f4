//! SuperCron: manage the user's cron table via natural-language repetition
//! sentences and named, triggerable jobs.
//!
//! Module layout mirrors the component breakdown: [`normalize`] (A),
//! [`parser`] (B), [`schedule`] (C), [`comment`] (D), [`store`] (E),
//! [`trigger_engine`] (F), [`facade`] (G), with [`job`] and [`error`]
//! holding the shared data model and error taxonomy, and [`display`] /
//! [`cli`] as the presentation and argument-parsing seams.

mod cli;
mod comment;
mod display;
mod error;
mod facade;
mod job;
mod normalize;
mod parser;
mod schedule;
mod store;
mod trigger_engine;

pub use cli::SuperCronCommand;
pub use error::SuperCronError;

use chrono::{Local, Timelike};

use facade::{
    AddRequest, ClearRequest, DeleteRequest, DisableRequest, EnableRequest, RenameRequest,
    SearchRequest, TriggerRequest,
};
use store::{CrontabStore, ProcessBackend};

fn now() -> (u32, u32) {
    let now = Local::now();
    (now.minute(), now.hour())
}

/// Run one `supercron` subcommand against the real crontab, printing
/// results unless `quiet` is set. Returns the error for `main.rs` to map
/// to an exit code; under `quiet` the error is still returned, just never
/// printed.
pub fn run_command(command: SuperCronCommand, quiet: bool) -> Result<(), SuperCronError> {
    let mut store = CrontabStore::new(ProcessBackend);

    match command {
        SuperCronCommand::Add(args) => {
            let json = args.json;
            let result = facade::add(
                &mut store,
                &AddRequest {
                    name: args.name,
                    command: args.command,
                    sentence: args.sentence,
                },
                now(),
            );
            report("add", result, quiet, json)
        }
        SuperCronCommand::Rename(args) => {
            let json = args.json;
            let result = facade::rename(
                &mut store,
                &RenameRequest {
                    old: args.old,
                    new: args.new,
                },
            );
            report("rename", result, quiet, json)
        }
        SuperCronCommand::Delete(args) => {
            let json = args.json;
            let result = facade::delete(
                &mut store,
                &DeleteRequest { name: args.name },
            );
            report("delete", result, quiet, json)
        }
        SuperCronCommand::Enable(args) => {
            let json = args.json;
            let result = facade::enable(&mut store, &EnableRequest { name: args.name });
            report("enable", result, quiet, json)
        }
        SuperCronCommand::Disable(args) => {
            let json = args.json;
            let result = facade::disable(&mut store, &DisableRequest { name: args.name });
            report("disable", result, quiet, json)
        }
        SuperCronCommand::Trigger(args) => {
            let json = args.json;
            let result = facade::trigger(
                &mut store,
                &TriggerRequest {
                    name: args.name,
                    spec: args.spec,
                },
            );
            report("trigger", result, quiet, json)
        }
        SuperCronCommand::Clear(args) => {
            let json = args.json;
            let result = facade::clear(&mut store, &ClearRequest { force: args.force });
            report("clear", result, quiet, json)
        }
        SuperCronCommand::Search(args) => {
            let json = args.json;
            let result = facade::search(&mut store, &SearchRequest { name: args.name });
            match result {
                Ok(rows) => {
                    if !quiet {
                        display::show_search_results(&rows, json);
                    }
                    Ok(())
                }
                Err(err) => {
                    if !quiet {
                        display::show_error(&err.to_string(), json);
                    }
                    Err(err)
                }
            }
        }
    }
}

fn report(
    verb: &str,
    result: Result<facade::OperationOutcome, SuperCronError>,
    quiet: bool,
    json: bool,
) -> Result<(), SuperCronError> {
    match result {
        Ok(outcome) => {
            if !quiet {
                display::show_outcome(verb, &outcome, json);
            }
            Ok(())
        }
        Err(err) => {
            if !quiet {
                display::show_error(&err.to_string(), json);
            }
            Err(err)
        }
    }
}
