//! ISO-8601 duration parsing for token lifetimes (`PT3600S`, `PT1H30M`, `P1D`).

use std::sync::LazyLock;

use chrono::Duration;
use regex::Regex;

use crate::error::ConfigError;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)W)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("duration regex is valid")
});

const MILLIS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;

/// Upper bound for any token lifetime, configured or server-provided.
pub const MAX_LIFETIME_SECONDS: i64 = 3660 * SECONDS_PER_DAY;

pub fn max_lifetime() -> Duration {
    Duration::seconds(MAX_LIFETIME_SECONDS)
}

/// Parse an ISO-8601 duration into a strictly positive [`Duration`].
///
/// Calendar years and months are rejected: their length depends on the date
/// they are anchored to, which a token lifetime does not have.
pub fn parse_lifetime(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidLifetime {
        value: raw.to_owned(),
        reason: reason.to_owned(),
    };

    let normalized = raw.trim().to_ascii_uppercase();
    let caps = ISO_DURATION
        .captures(&normalized)
        .ok_or_else(|| invalid("expected an ISO-8601 duration such as PT3600S"))?;

    if caps.get(1).is_some() || caps.get(2).is_some() {
        return Err(invalid("calendar years and months are not supported"));
    }
    if normalized.ends_with('T') || (3..=7).all(|i| caps.get(i).is_none()) {
        return Err(invalid("duration has no components"));
    }

    let whole = |index: usize, unit_seconds: i64| -> Result<i64, ConfigError> {
        match caps.get(index) {
            None => Ok(0),
            Some(m) => m
                .as_str()
                .parse::<i64>()
                .ok()
                .and_then(|v| v.checked_mul(unit_seconds * MILLIS_PER_SECOND))
                .ok_or_else(|| invalid("duration is out of range")),
        }
    };

    let seconds_millis = match caps.get(7) {
        None => 0,
        Some(m) => {
            let seconds: f64 = m
                .as_str()
                .parse()
                .map_err(|_| invalid("seconds component is not a number"))?;
            let millis = (seconds * MILLIS_PER_SECOND as f64).round();
            if millis > i64::MAX as f64 {
                return Err(invalid("duration is out of range"));
            }
            millis as i64
        }
    };

    let total = [
        whole(3, SECONDS_PER_WEEK)?,
        whole(4, SECONDS_PER_DAY)?,
        whole(5, SECONDS_PER_HOUR)?,
        whole(6, SECONDS_PER_MINUTE)?,
        seconds_millis,
    ]
    .into_iter()
    .try_fold(0i64, |acc, part| acc.checked_add(part))
    .ok_or_else(|| invalid("duration is out of range"))?;

    if total <= 0 {
        return Err(invalid("lifetime must be positive"));
    }
    Duration::try_milliseconds(total)
        .filter(|lifetime| *lifetime <= max_lifetime())
        .ok_or_else(|| invalid("duration is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seconds_only() {
        assert_eq!(parse_lifetime("PT3600S").unwrap(), Duration::seconds(3600));
    }

    #[test]
    fn parses_mixed_components() {
        assert_eq!(
            parse_lifetime("P1DT2H30M15S").unwrap(),
            Duration::seconds(SECONDS_PER_DAY + 2 * 3600 + 30 * 60 + 15)
        );
        assert_eq!(parse_lifetime("P2W").unwrap(), Duration::days(14));
        assert_eq!(parse_lifetime("pt1.5s").unwrap(), Duration::milliseconds(1500));
    }

    #[test]
    fn rejects_malformed_values() {
        for raw in ["", "3600", "PT", "P", "PT-5S", "PT1X", "1H"] {
            assert!(
                matches!(parse_lifetime(raw), Err(ConfigError::InvalidLifetime { .. })),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_calendar_units_and_zero() {
        assert!(parse_lifetime("P1Y").is_err());
        assert!(parse_lifetime("P1M").is_err());
        assert!(parse_lifetime("PT0S").is_err());
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_lifetime("P99999999999999999999W").is_err());
        assert!(matches!(
            parse_lifetime("P99999999D"),
            Err(ConfigError::InvalidLifetime { .. })
        ));
    }

    #[test]
    fn accepts_lifetime_up_to_the_cap() {
        assert_eq!(parse_lifetime("P3660D").unwrap(), max_lifetime());
        assert!(parse_lifetime("P3660DT1S").is_err());
    }
}
