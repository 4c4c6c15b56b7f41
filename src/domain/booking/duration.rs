//! Travel durations parsed from ISO 8601 strings such as `PT4H55M`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// An integral hours/minutes span for display.
///
/// A component the source omitted stays `None` and is not displayed, so
/// `PT4H` renders as `4h` rather than `4h 0m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TravelDuration {
    hours: Option<u32>,
    minutes: Option<u32>,
}

impl TravelDuration {
    pub fn new(hours: Option<u32>, minutes: Option<u32>) -> Self {
        Self { hours, minutes }
    }

    /// Builds a duration from a minute count, e.g. a layover gap.
    ///
    /// Zero-valued components are omitted, except that a zero span shows `0m`.
    pub fn from_minutes(total: i64) -> Self {
        let total = u32::try_from(total.max(0)).unwrap_or(u32::MAX);
        let hours = total / 60;
        let minutes = total % 60;
        match (hours, minutes) {
            (0, m) => Self::new(None, Some(m)),
            (h, 0) => Self::new(Some(h), None),
            (h, m) => Self::new(Some(h), Some(m)),
        }
    }

    pub fn hours(&self) -> u32 {
        self.hours.unwrap_or(0)
    }

    pub fn minutes(&self) -> u32 {
        self.minutes.unwrap_or(0)
    }
}

impl FromStr for TravelDuration {
    type Err = ValidationError;

    /// Parses `PT#H#M`. Days (`P1DT2H`) fold into hours; seconds are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::invalid_format("duration", format!("'{}' is not an ISO 8601 duration", s));
        let body = s.trim().strip_prefix('P').ok_or_else(invalid)?;

        let (date_part, time_part) = match body.split_once('T') {
            Some((d, t)) => (d, t),
            None => (body, ""),
        };

        let mut days: Option<u32> = None;
        for (value, unit) in components(date_part).ok_or_else(invalid)? {
            match unit {
                'D' => days = Some(value),
                _ => return Err(invalid()),
            }
        }

        let mut hours: Option<u32> = None;
        let mut minutes: Option<u32> = None;
        for (value, unit) in components(time_part).ok_or_else(invalid)? {
            match unit {
                'H' => hours = Some(value),
                'M' => minutes = Some(value),
                'S' => {}
                _ => return Err(invalid()),
            }
        }

        if let Some(d) = days {
            let folded = d
                .checked_mul(24)
                .and_then(|h| h.checked_add(hours.unwrap_or(0)))
                .ok_or_else(invalid)?;
            hours = Some(folded);
        }
        if hours.is_none() && minutes.is_none() {
            return Err(invalid());
        }
        Ok(Self { hours, minutes })
    }
}

/// Splits `4H55M` into `[(4, 'H'), (55, 'M')]`.
fn components(part: &str) -> Option<Vec<(u32, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c == '.' || c == ',' {
            // fractional seconds; the integral part is enough for display
            digits.push('.');
        } else {
            if digits.is_empty() {
                return None;
            }
            let whole = digits.split('.').next().unwrap_or_default();
            out.push((whole.parse().ok()?, c.to_ascii_uppercase()));
            digits.clear();
        }
    }
    if !digits.is_empty() {
        return None;
    }
    Some(out)
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (Some(h), Some(m)) => write!(f, "{}h {}m", h, m),
            (Some(h), None) => write!(f, "{}h", h),
            (None, Some(m)) => write!(f, "{}m", m),
            (None, None) => write!(f, "0m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_hours_and_minutes() {
        let d: TravelDuration = "PT4H55M".parse().unwrap();
        assert_eq!(d.hours(), 4);
        assert_eq!(d.minutes(), 55);
        assert_eq!(d.to_string(), "4h 55m");
    }

    #[test]
    fn single_component_omits_the_other() {
        assert_eq!("PT2H".parse::<TravelDuration>().unwrap().to_string(), "2h");
        assert_eq!("PT45M".parse::<TravelDuration>().unwrap().to_string(), "45m");
    }

    #[test]
    fn days_fold_into_hours() {
        let d: TravelDuration = "P1DT2H30M".parse().unwrap();
        assert_eq!(d.to_string(), "26h 30m");
    }

    #[test]
    fn huge_day_count_is_rejected_not_overflowed() {
        assert!("P200000000D".parse::<TravelDuration>().is_err());
        assert!("P178956970DT23H".parse::<TravelDuration>().is_err());
    }

    #[test]
    fn rejects_malformed() {
        for s in ["", "4H55M", "PT", "PTH", "PT4X", "PT4"] {
            assert!(s.parse::<TravelDuration>().is_err(), "{s:?} should fail");
        }
    }

    #[test]
    fn from_minutes_drops_zero_components() {
        assert_eq!(TravelDuration::from_minutes(95).to_string(), "1h 35m");
        assert_eq!(TravelDuration::from_minutes(120).to_string(), "2h");
        assert_eq!(TravelDuration::from_minutes(40).to_string(), "40m");
        assert_eq!(TravelDuration::from_minutes(-5).to_string(), "0m");
    }

    proptest! {
        #[test]
        fn hours_and_minutes_survive_parsing(h in 0u32..100, m in 0u32..60) {
            let parsed: TravelDuration = format!("PT{}H{}M", h, m).parse().unwrap();
            prop_assert_eq!((parsed.hours(), parsed.minutes()), (h, m));
        }
    }
}
