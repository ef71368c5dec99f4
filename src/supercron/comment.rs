//! Comment Codec (Component D): the sole persistence medium for a job's
//! name and trigger, per the grammar:
//!
//! ```text
//! comment  := MARKER name [ "%" trigger ]
//! MARKER   := "SuperCron__"
//! trigger  := action ":" source_name ":" event
//! ```

use super::job::{Trigger, TriggerAction, TriggerEvent};

pub const MARKER: &str = "SuperCron__";

/// Render `(name, trigger?)` into the trailing comment for a managed line.
pub fn encode_comment(name: &str, trigger: Option<&Trigger>) -> String {
    let mut comment = format!("{MARKER}{name}");
    if let Some(trigger) = trigger {
        comment.push('%');
        comment.push_str(trigger.action.as_str());
        comment.push(':');
        comment.push_str(&trigger.source_name);
        comment.push(':');
        comment.push_str(trigger.event.as_str());
    }
    comment
}

/// Decode a raw comment. Returns `None` if it is not `SuperCron__`-prefixed
/// (not a managed job at all). A malformed trigger tail decodes to "no
/// trigger" rather than failing the whole comment, for forward
/// compatibility with future trigger shapes.
pub fn decode_comment(comment: &str) -> Option<(String, Option<Trigger>)> {
    let rest = comment.strip_prefix(MARKER)?;
    match rest.find('%') {
        None => Some((rest.to_string(), None)),
        Some(sep) => {
            let name = rest[..sep].to_string();
            let trigger_str = &rest[sep + 1..];
            let trigger = parse_trigger_tail(trigger_str);
            Some((name, trigger))
        }
    }
}

fn parse_trigger_tail(tail: &str) -> Option<Trigger> {
    if tail.is_empty() {
        return None;
    }
    let parts: Vec<&str> = tail.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let action = TriggerAction::parse(parts[0])?;
    let event = TriggerEvent::parse(parts[2])?;
    Some(Trigger {
        action,
        source_name: parts[1].to_string(),
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trigger() -> Trigger {
        Trigger {
            action: TriggerAction::On,
            source_name: "echo2".to_string(),
            event: TriggerEvent::Enabled,
        }
    }

    #[test]
    fn encode_without_trigger() {
        assert_eq!(encode_comment("ls_job", None), "SuperCron__ls_job");
    }

    #[test]
    fn encode_with_trigger() {
        let trigger = sample_trigger();
        assert_eq!(
            encode_comment("echo1", Some(&trigger)),
            "SuperCron__echo1%on:echo2:enabled"
        );
    }

    #[test]
    fn decode_not_managed_returns_none() {
        assert_eq!(decode_comment("some other comment"), None);
    }

    #[test]
    fn decode_without_trigger() {
        assert_eq!(
            decode_comment("SuperCron__ls_job"),
            Some(("ls_job".to_string(), None))
        );
    }

    #[test]
    fn decode_with_trigger_roundtrip() {
        let trigger = sample_trigger();
        let encoded = encode_comment("echo1", Some(&trigger));
        let (name, decoded_trigger) = decode_comment(&encoded).unwrap();
        assert_eq!(name, "echo1");
        assert_eq!(decoded_trigger, Some(trigger));
    }

    #[test]
    fn decode_malformed_trigger_yields_no_trigger() {
        // only two segments after the marker's '%'
        let (name, trigger) = decode_comment("SuperCron__job%on:missing_event").unwrap();
        assert_eq!(name, "job");
        assert_eq!(trigger, None);
    }

    #[test]
    fn decode_unknown_action_yields_no_trigger() {
        let (_, trigger) = decode_comment("SuperCron__job%maybe:source:enabled").unwrap();
        assert_eq!(trigger, None);
    }

    #[test]
    fn decode_empty_trigger_tail_yields_no_trigger() {
        let (name, trigger) = decode_comment("SuperCron__job%").unwrap();
        assert_eq!(name, "job");
        assert_eq!(trigger, None);
    }

    #[test]
    fn decode_preserves_name_when_trigger_missing_required_fields_round_trip() {
        let (name, trigger) = decode_comment("SuperCron__job").unwrap();
        assert_eq!(name, "job");
        assert_eq!(trigger, None);
    }
}
