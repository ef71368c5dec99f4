//! Structured time specification (`Schedule`) and its rendering into the
//! five-field cron time spec or `@reboot` (Component C, the Cron Encoder).

use std::collections::BTreeSet;
use std::fmt;

use super::error::SuperCronError;

/// One cron field: minute, hour, day-of-month, month, or day-of-week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Any,
    /// The step value for `*/n`. Typed wider than a single field's own
    /// value range (u16, not u8) because the every-N-days recognizer
    /// inherits an over-broad 1..=460 bound that a day-of-month
    /// field's own 1-31 range cannot represent.
    Every(u16),
    On(BTreeSet<u8>),
    During(u8, u8),
}

impl Field {
    pub fn on(values: impl IntoIterator<Item = u8>) -> Self {
        Field::On(values.into_iter().collect())
    }

    /// Smart constructor for `During`: lowers a wrap-around range (`low >=
    /// high`) to an explicit `On` set by walking `modulus` values from
    /// `low` through `high` inclusive, per invariant 6. `base` is the
    /// lowest value the field can take (0 for a 0-based field such as
    /// day-of-week, 1 for a 1-based field such as month), so the wrap
    /// lands back on `base` instead of on `0` for a field that never
    /// uses it.
    pub fn during_or_wrap(low: u8, high: u8, modulus: u8, base: u8) -> Self {
        if low < high {
            Field::During(low, high)
        } else {
            let mut values = BTreeSet::new();
            let mut i = low;
            loop {
                values.insert(i);
                if i == high {
                    break;
                }
                i = (i - base + 1) % modulus + base;
            }
            Field::On(values)
        }
    }

    pub fn encode(&self) -> String {
        match self {
            Field::Any => "*".to_string(),
            Field::Every(n) => format!("*/{n}"),
            Field::On(values) => values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(","),
            Field::During(low, high) => format!("{low}-{high}"),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// The five cron fields that make up a non-reboot schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fields {
    pub minute: Option<Field>,
    pub hour: Option<Field>,
    pub day_of_month: Option<Field>,
    pub month: Option<Field>,
    pub day_of_week: Option<Field>,
}

impl Fields {
    fn field(opt: &Option<Field>) -> Field {
        opt.clone().unwrap_or(Field::Any)
    }

    pub fn encode(&self) -> String {
        format!(
            "{} {} {} {} {}",
            Self::field(&self.minute).encode(),
            Self::field(&self.hour).encode(),
            Self::field(&self.day_of_month).encode(),
            Self::field(&self.month).encode(),
            Self::field(&self.day_of_week).encode(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.minute.is_none()
            && self.hour.is_none()
            && self.day_of_month.is_none()
            && self.month.is_none()
            && self.day_of_week.is_none()
    }
}

/// A fully-resolved schedule: either "run at boot" or the five cron fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    Reboot,
    Fields(Fields),
}

impl Schedule {
    /// Render to the canonical cron time spec (`@reboot` or the five
    /// space-joined fields).
    pub fn encode(&self) -> String {
        match self {
            Schedule::Reboot => "@reboot".to_string(),
            Schedule::Fields(fields) => fields.encode(),
        }
    }

    /// Parse a previously-encoded time spec back into a `Schedule`. Used by
    /// the Crontab Store when loading existing managed lines.
    pub fn decode(spec: &str) -> Result<Self, SuperCronError> {
        let spec = spec.trim();
        if spec == "@reboot" {
            return Ok(Schedule::Reboot);
        }
        let parts: Vec<&str> = spec.split_whitespace().collect();
        if parts.len() != 5 {
            return Err(SuperCronError::BackendIo(format!(
                "malformed cron time spec: '{spec}'"
            )));
        }
        let field = |s: &str| -> Field {
            if s == "*" {
                Field::Any
            } else if let Some(n) = s.strip_prefix("*/") {
                n.parse::<u16>().map(Field::Every).unwrap_or(Field::Any)
            } else if let Some((lo, hi)) = s.split_once('-') {
                match (lo.parse::<u8>(), hi.parse::<u8>()) {
                    (Ok(lo), Ok(hi)) => Field::During(lo, hi),
                    _ => Field::Any,
                }
            } else {
                let values: BTreeSet<u8> = s.split(',').filter_map(|v| v.parse().ok()).collect();
                if values.is_empty() {
                    Field::Any
                } else {
                    Field::On(values)
                }
            }
        };
        Ok(Schedule::Fields(Fields {
            minute: Some(field(parts[0])),
            hour: Some(field(parts[1])),
            day_of_month: Some(field(parts[2])),
            month: Some(field(parts[3])),
            day_of_week: Some(field(parts[4])),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_any_field() {
        assert_eq!(Field::Any.encode(), "*");
    }

    #[test]
    fn encode_every_field() {
        assert_eq!(Field::Every(5).encode(), "*/5");
    }

    #[test]
    fn encode_on_field_ascending() {
        let field = Field::on([5, 1, 3]);
        assert_eq!(field.encode(), "1,3,5");
    }

    #[test]
    fn encode_during_field() {
        assert_eq!(Field::During(1, 5).encode(), "1-5");
    }

    #[test]
    fn during_or_wrap_ascending_stays_during() {
        let field = Field::during_or_wrap(1, 5, 7, 0);
        assert_eq!(field, Field::During(1, 5));
    }

    #[test]
    fn during_or_wrap_wraps_to_on() {
        // from friday(5) to monday(1), Sun..Sat = 0..6
        let field = Field::during_or_wrap(5, 1, 7, 0);
        assert_eq!(field, Field::on([0, 1, 5, 6]));
    }

    #[test]
    fn during_or_wrap_wraps_to_on_with_one_based_field() {
        // from november(11) to february(2), Jan..Dec = 1..12
        let field = Field::during_or_wrap(11, 2, 12, 1);
        assert_eq!(field, Field::on([1, 2, 11, 12]));
    }

    #[test]
    fn schedule_encode_reboot() {
        assert_eq!(Schedule::Reboot.encode(), "@reboot");
    }

    #[test]
    fn schedule_encode_fields_default_to_any() {
        let schedule = Schedule::Fields(Fields {
            minute: Some(Field::on([0])),
            hour: Some(Field::on([0])),
            ..Default::default()
        });
        assert_eq!(schedule.encode(), "0 0 * * *");
    }

    #[test]
    fn schedule_decode_roundtrip() {
        let original = Schedule::Fields(Fields {
            minute: Some(Field::Every(5)),
            hour: Some(Field::Any),
            day_of_month: Some(Field::on([22])),
            month: Some(Field::on([7])),
            day_of_week: Some(Field::During(1, 5)),
        });
        let encoded = original.encode();
        let decoded = Schedule::decode(&encoded).unwrap();
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn schedule_decode_reboot() {
        assert_eq!(Schedule::decode("@reboot").unwrap(), Schedule::Reboot);
    }

    #[test]
    fn schedule_decode_rejects_malformed() {
        assert!(Schedule::decode("* * *").is_err());
    }
}
