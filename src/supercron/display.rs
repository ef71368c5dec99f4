//! Presentation layer: renders Facade outcomes either as colored text or,
//! under `--json`, as a single `serde_json` document. Never mutates the
//! crontab — purely a function of what the Facade already decided.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::utils::{print_error, print_success};

use super::facade::{OperationOutcome, SearchRow};

#[derive(Serialize)]
struct JsonOutcome<'a> {
    affected: &'a [String],
    cascaded: &'a [String],
}

/// Report a successful mutating operation (`add`, `rename`, `delete`,
/// `enable`, `disable`, `trigger`, `clear`).
pub fn show_outcome(verb: &str, outcome: &OperationOutcome, json: bool) {
    if json {
        let payload = JsonOutcome {
            affected: &outcome.affected,
            cascaded: &outcome.cascaded,
        };
        println!("{}", serde_json::to_string_pretty(&payload).unwrap());
        return;
    }

    for name in &outcome.affected {
        print_success(&format!("{verb}: {name}"));
    }
    for name in &outcome.cascaded {
        print_success(&format!("  cascaded: {name}"));
    }
}

pub fn show_error(err: &str, json: bool) {
    if json {
        println!("{{\"error\": {:?}}}", err);
    } else {
        print_error(err);
    }
}

fn status_color(enabled: bool) -> Color {
    if enabled {
        Color::Green
    } else {
        Color::DarkGrey
    }
}

fn enabled_cell(enabled: bool) -> Cell {
    let label = if enabled { "enabled" } else { "disabled" };
    Cell::new(label).fg(status_color(enabled))
}

/// Render `search` results as a table, or as a JSON array under `--json`.
pub fn show_search_results(rows: &[SearchRow], json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(rows).unwrap());
        return;
    }

    if rows.is_empty() {
        println!("No matching jobs.");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["NAME", "STATUS", "SCHEDULE", "COMMAND", "TRIGGER"]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.name).fg(Color::Cyan),
            enabled_cell(row.enabled),
            Cell::new(&row.time_spec),
            Cell::new(&row.command),
            Cell::new(row.trigger.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
    println!("\n{} job(s)", rows.len());
}
