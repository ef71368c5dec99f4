//! Repetition Parser (Component B): turns a normalized free-form sentence
//! into a `Schedule` via thirteen independent, order-agnostic recognizers;
//! every one of them runs, and their contributions merge into a single
//! `Fields` accumulator. Two recognizers writing different values to the
//! same slot is `ConflictingRecognizers`, never last-writer-wins.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::SuperCronError;
use super::normalize::normalize;
use super::schedule::{Field, Fields, Schedule};

const DAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Accumulates recognizer contributions before they are lowered into a
/// `Schedule`. Mirrors the original's `repeat` dict, typed.
#[derive(Debug, Default)]
struct PartialFields {
    reboot: bool,
    minute: Option<Field>,
    hour: Option<Field>,
    day_of_month: Option<Field>,
    month: Option<Field>,
    day_of_week: Option<Field>,
}

impl PartialFields {
    fn set(
        &mut self,
        field_name: &'static str,
        slot: &mut Option<Field>,
        value: Field,
    ) -> Result<(), SuperCronError> {
        match slot {
            None => {
                *slot = Some(value);
                Ok(())
            }
            Some(existing) if *existing == value => Ok(()),
            Some(_) => Err(SuperCronError::ConflictingRecognizers { field: field_name }),
        }
    }

    fn is_empty(&self) -> bool {
        !self.reboot
            && self.minute.is_none()
            && self.hour.is_none()
            && self.day_of_month.is_none()
            && self.month.is_none()
            && self.day_of_week.is_none()
    }
}

static RE_REBOOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(at|every)\s+(boot|reboot)").unwrap());
static RE_EVERY_MINUTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(once\s+)?every(?:\s+(\d+))?\s+minutes?\b").unwrap());
static RE_EVERY_HOURS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(once\s+)?every(?:\s+(\d+))?\s+hours?\b").unwrap());
static RE_EVERY_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(once\s+)?every(?:\s+(\d+))?\s+days?\b").unwrap());
static RE_EVERY_MONTHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(once\s+)?every(?:\s+(\d+))?\s+months?\b").unwrap());
static RE_EVERYDAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(everyday|anyday)\b").unwrap());
static RE_MIDNIGHT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(at\s*)?\bmidnight\b").unwrap());
static RE_CLOCK_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(on|at\s*)?\b(\d{1,2}):(\d{1,2})\b(\s*(am|pm))?").unwrap());
static RE_DAY_MONTH_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(on\s*)?\b(\d{1,2})[/-](\d{1,2})\b").unwrap());
static RE_WEEKDAY_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(from\s+)(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\s+to\s+(monday|tuesday|wednesday|thursday|friday|saturday|sunday)",
    )
    .unwrap()
});
static RE_MONTH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(from\s+)(january|february|march|april|may|june|july|august|september|october|november|december)\s+to\s+(january|february|march|april|may|june|july|august|september|october|november|december)",
    )
    .unwrap()
});
static RE_WEEKDAYS_ENUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(on\s+)(monday|tuesday|wednesday|thursday|friday|saturday|sunday)s?").unwrap()
});
static RE_MONTHS_ENUM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([oi]n\s+)(january|february|march|april|may|june|july|august|september|october|november|december)",
    )
    .unwrap()
});

fn day_index(name: &str) -> u8 {
    DAY_NAMES.iter().position(|d| *d == name).unwrap() as u8
}

fn month_index(name: &str) -> u8 {
    MONTH_NAMES.iter().position(|m| *m == name).unwrap() as u8 + 1
}

/// Recognizer 1.
fn recognize_reboot(sentence: &str, fields: &mut PartialFields) {
    if RE_REBOOT.is_match(sentence) {
        fields.reboot = true;
    }
}

fn recognize_every_n<'a>(
    re: &Lazy<Regex>,
    sentence: &'a str,
    max: u16,
    field_name: &'static str,
) -> Result<Option<u16>, SuperCronError> {
    let Some(caps) = re.captures(sentence) else {
        return Ok(None);
    };
    match caps.get(2) {
        None => Ok(Some(1)),
        Some(n) => {
            let n: u16 = n.as_str().parse().unwrap_or(0);
            if n >= 1 && n <= max {
                Ok(Some(n))
            } else {
                Err(SuperCronError::FieldOutOfRange {
                    field: field_name,
                    value: n as i64,
                    expected: match field_name {
                        "minute" => "1-59",
                        "hour" => "1-23",
                        "day" => "1-460",
                        "month" => "1-12",
                        _ => "",
                    },
                })
            }
        }
    }
}

/// Parse a normalized sentence into merged field contributions. Every
/// recognizer runs regardless of what earlier ones contributed; conflicts
/// are reported as `SuperCronError::ConflictingRecognizers`.
fn run_recognizers(sentence: &str) -> Result<PartialFields, SuperCronError> {
    let mut fields = PartialFields::default();

    // 1. Reboot — exclusive, handled by the caller after everything else
    // has run (a reboot phrase combined with other fields still yields
    // Reboot, per spec).
    recognize_reboot(sentence, &mut fields);

    // 2-5. every-N-{minutes,hours,days,months}.
    if let Some(n) = recognize_every_n(&RE_EVERY_MINUTES, sentence, 59, "minute")? {
        set_minute(&mut fields, Field::Every(n))?;
    }
    if let Some(n) = recognize_every_n(&RE_EVERY_HOURS, sentence, 23, "hour")? {
        set_hour(&mut fields, Field::Every(n))?;
    }
    if let Some(n) = recognize_every_n(&RE_EVERY_DAYS, sentence, 460, "day")? {
        set_dom(&mut fields, Field::Every(n))?;
    }
    if let Some(n) = recognize_every_n(&RE_EVERY_MONTHS, sentence, 12, "month")? {
        set_month(&mut fields, Field::Every(n))?;
    }

    // 6. everyday / anyday.
    if RE_EVERYDAY.is_match(sentence) {
        set_dom(&mut fields, Field::Every(1))?;
    }

    // 7. midnight.
    if RE_MIDNIGHT.is_match(sentence) {
        set_minute(&mut fields, Field::on([0]))?;
        set_hour(&mut fields, Field::on([0]))?;
    }

    // 8. clock time.
    if let Some(caps) = RE_CLOCK_TIME.captures(sentence) {
        let mut hour: i64 = caps[2].parse().unwrap_or(0);
        let minute: i64 = caps[3].parse().unwrap_or(0);
        if let Some(suffix) = caps.get(5) {
            if suffix.as_str() == "pm" {
                if hour != 12 {
                    hour += 12;
                }
            } else if hour == 12 {
                hour = 0;
            }
        }
        // Inherited off-by-one: the minute bound here is `< 59`, i.e.
        // 0..=58, not the 0..=59 a clock actually allows. Kept verbatim.
        if hour < 24 && minute < 59 {
            set_minute(&mut fields, Field::on([minute as u8]))?;
            set_hour(&mut fields, Field::on([hour as u8]))?;
        } else {
            return Err(SuperCronError::FieldOutOfRange {
                field: "clock_time",
                value: hour.max(minute),
                expected: "hour 0-23, minute 0-58",
            });
        }
    }

    // 9. day/month numeric.
    if let Some(caps) = RE_DAY_MONTH_NUMERIC.captures(sentence) {
        let day: i64 = caps[2].parse().unwrap_or(0);
        let month: i64 = caps[3].parse().unwrap_or(0);
        if !(1..=12).contains(&month) {
            return Err(SuperCronError::FieldOutOfRange {
                field: "month",
                value: month,
                expected: "1-12",
            });
        }
        let day_max = match month {
            2 => 29,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        };
        if !(1..=day_max).contains(&day) {
            return Err(SuperCronError::FieldOutOfRange {
                field: "day",
                value: day,
                expected: "valid day for that month",
            });
        }
        set_dom(&mut fields, Field::on([day as u8]))?;
        set_month(&mut fields, Field::on([month as u8]))?;
    }

    // 10. weekdays enumerated.
    let weekday_enum_input = sentence
        .replace(" and ", " on ")
        .replace(",and ", " on ")
        .replace(',', " on ");
    let mut weekdays: BTreeSet<u8> = BTreeSet::new();
    for caps in RE_WEEKDAYS_ENUM.captures_iter(&weekday_enum_input) {
        weekdays.insert(day_index(&caps[2]));
    }
    if !weekdays.is_empty() {
        set_dow(&mut fields, Field::On(weekdays))?;
    }

    // 11. weekday range.
    if let Some(caps) = RE_WEEKDAY_RANGE.captures(sentence) {
        let low = day_index(&caps[2]);
        let high = day_index(&caps[3]);
        set_dow(&mut fields, Field::during_or_wrap(low, high, 7, 0))?;
    }

    // 12. months enumerated.
    let month_enum_input = sentence
        .replace(" and ", " in ")
        .replace(",and ", " in ")
        .replace(',', "in ");
    let mut months: BTreeSet<u8> = BTreeSet::new();
    for caps in RE_MONTHS_ENUM.captures_iter(&month_enum_input) {
        months.insert(month_index(&caps[2]));
    }
    if !months.is_empty() {
        set_month(&mut fields, Field::On(months))?;
    }

    // 13. month range.
    if let Some(caps) = RE_MONTH_RANGE.captures(sentence) {
        let low = month_index(&caps[2]);
        let high = month_index(&caps[3]);
        set_month(&mut fields, Field::during_or_wrap(low, high, 12, 1))?;
    }

    Ok(fields)
}

fn set_minute(fields: &mut PartialFields, value: Field) -> Result<(), SuperCronError> {
    let mut slot = fields.minute.take();
    let result = fields.set("minute", &mut slot, value);
    fields.minute = slot;
    result
}

fn set_hour(fields: &mut PartialFields, value: Field) -> Result<(), SuperCronError> {
    let mut slot = fields.hour.take();
    let result = fields.set("hour", &mut slot, value);
    fields.hour = slot;
    result
}

fn set_dom(fields: &mut PartialFields, value: Field) -> Result<(), SuperCronError> {
    let mut slot = fields.day_of_month.take();
    let result = fields.set("day_of_month", &mut slot, value);
    fields.day_of_month = slot;
    result
}

fn set_month(fields: &mut PartialFields, value: Field) -> Result<(), SuperCronError> {
    let mut slot = fields.month.take();
    let result = fields.set("month", &mut slot, value);
    fields.month = slot;
    result
}

fn set_dow(fields: &mut PartialFields, value: Field) -> Result<(), SuperCronError> {
    let mut slot = fields.day_of_week.take();
    let result = fields.set("day_of_week", &mut slot, value);
    fields.day_of_week = slot;
    result
}

/// Parse a repetition sentence into a `Schedule`. `now` supplies the
/// `(minute, hour)` used for the defaulting rule — the caller (the
/// Operations Facade) is the one place that reads the real clock, so
/// this function stays pure and independently testable.
pub fn parse_sentence(sentence: &str, now: (u32, u32)) -> Result<Schedule, SuperCronError> {
    let normalized = normalize(sentence);
    let mut fields = run_recognizers(&normalized)?;

    if fields.is_empty() {
        return Err(SuperCronError::InvalidSentence(sentence.to_string()));
    }

    if fields.reboot {
        return Ok(Schedule::Reboot);
    }

    let (now_minute, now_hour) = now;
    let minute_every = matches!(fields.minute, Some(Field::Every(_)));
    if fields.minute.is_none() {
        fields.minute = Some(Field::on([now_minute as u8]));
    }
    if fields.hour.is_none() && !minute_every {
        fields.hour = Some(Field::on([now_hour as u8]));
    }

    Ok(Schedule::Fields(Fields {
        minute: fields.minute,
        hour: fields.hour,
        day_of_month: fields.day_of_month,
        month: fields.month,
        day_of_week: fields.day_of_week,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(sentence: &str, now: (u32, u32)) -> String {
        parse_sentence(sentence, now).unwrap().encode()
    }

    #[test]
    fn empty_sentence_is_invalid() {
        assert!(parse_sentence("hello there", (0, 0)).is_err());
    }

    #[test]
    fn reboot_sentence() {
        assert_eq!(
            parse_sentence("every reboot", (5, 5)).unwrap(),
            Schedule::Reboot
        );
    }

    #[test]
    fn reboot_wins_over_other_fields() {
        assert_eq!(
            parse_sentence("at reboot on mondays", (5, 5)).unwrap(),
            Schedule::Reboot
        );
    }

    #[test]
    fn midnight() {
        assert_eq!(encode("midnight", (10, 11)), "0 0 * * *");
    }

    #[test]
    fn once_every_5_minutes() {
        assert_eq!(encode("once every 5 minutes", (10, 11)), "*/5 * * * *");
    }

    #[test]
    fn every_minute_defaults_to_one() {
        assert_eq!(encode("every minute", (10, 11)), "*/1 * * * *");
    }

    #[test]
    fn every_minute_out_of_range_errors() {
        assert!(matches!(
            parse_sentence("every 60 minutes", (0, 0)),
            Err(SuperCronError::FieldOutOfRange { field: "minute", .. })
        ));
    }

    #[test]
    fn clock_time_pm() {
        assert_eq!(encode("at 4:47 pm", (0, 0)), "47 16 * * *");
    }

    #[test]
    fn clock_time_12am_is_midnight_hour() {
        assert_eq!(encode("at 12:05 am", (0, 0)), "5 0 * * *");
    }

    #[test]
    fn clock_time_12pm_stays_noon() {
        assert_eq!(encode("at 12:05 pm", (0, 0)), "5 12 * * *");
    }

    #[test]
    fn day_month_numeric() {
        assert_eq!(encode("on 22/7", (33, 14)), "33 14 22 7 *");
    }

    #[test]
    fn day_month_numeric_invalid_month_errors() {
        assert!(parse_sentence("on 5/13", (0, 0)).is_err());
    }

    #[test]
    fn day_month_numeric_invalid_day_for_february() {
        assert!(parse_sentence("on 30/2", (0, 0)).is_err());
    }

    #[test]
    fn weekdays_enumerated_with_commas_and_and() {
        assert_eq!(
            encode("on mondays, wednesdays and fridays", (33, 14)),
            "33 14 * * 1,3,5"
        );
    }

    #[test]
    fn weekday_range_ascending() {
        assert_eq!(
            encode("midnight from monday to friday", (0, 0)),
            "0 0 * * 1-5"
        );
    }

    #[test]
    fn weekday_range_wraps() {
        // from fri to mon => {0,1,5,6}
        assert_eq!(
            encode("midnight from friday to monday", (0, 0)),
            "0 0 * * 0,1,5,6"
        );
    }

    #[test]
    fn months_enumerated_and_every_n_days() {
        assert_eq!(
            encode(
                "midnight every 2 days from monday to friday in october and december",
                (0, 0)
            ),
            "0 0 */2 10,12 1-5"
        );
    }

    #[test]
    fn month_range_wraps() {
        assert_eq!(
            encode("midnight from november to february", (0, 0)),
            "0 0 * 1,2,11,12 *"
        );
    }

    #[test]
    fn month_range_ascending() {
        assert_eq!(
            encode("midnight from june to august", (0, 0)),
            "0 0 * 6-8 *"
        );
    }

    #[test]
    fn everyday_keyword() {
        assert_eq!(encode("everyday at 12:00 pm", (0, 0)), "0 12 */1 * *");
    }

    #[test]
    fn anyday_keyword() {
        assert_eq!(encode("anyday at 12:00 pm", (0, 0)), "0 12 */1 * *");
    }

    #[test]
    fn conflicting_day_of_week_contributions_error() {
        // the enumerated set {1,3,5} and a disjoint explicit range both
        // contribute to day_of_week; last-writer-wins is forbidden.
        let err = parse_sentence("from monday to friday on wednesdays", (0, 0));
        assert!(matches!(
            err,
            Err(SuperCronError::ConflictingRecognizers { field: "day_of_week" })
        ));
    }

    #[test]
    fn repeated_weekday_mentions_merge_into_one_set() {
        assert_eq!(encode("on mondays on mondays", (33, 14)), "33 14 * * 1");
    }

    #[test]
    fn abbreviations_are_normalized_before_parsing() {
        assert_eq!(
            encode("midnight from mon to fri in oct and dec", (0, 0)),
            "0 0 * 10,12 1-5"
        );
    }

    #[test]
    fn default_filling_uses_supplied_now() {
        assert_eq!(encode("every wednesday", (7, 23)), "7 23 * * 3");
    }

    #[test]
    fn every_minute_suppresses_hour_default() {
        // hour default must not apply when an Every(minute) was contributed
        let schedule = parse_sentence("every 10 minutes", (7, 23)).unwrap();
        match schedule {
            Schedule::Fields(fields) => assert_eq!(fields.hour, None),
            _ => panic!("expected Fields"),
        }
    }
}
