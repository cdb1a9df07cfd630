//! Normalization of raw provider metric values.
//!
//! Market-data providers report the same metric as a JSON number, a numeric
//! string (`"12.5"`), a percent string (`"12.5%"`) or a placeholder for "not
//! available" (`"None"`, `"-"`, `""`). Everything here maps those shapes onto
//! `Option<f64>` so the scorers only ever see numbers or `None`.

use serde::{Deserialize, Deserializer};

use crate::ScoringError;

const MISSING_MARKERS: &[&str] = &["", "-", "none", "null", "n/a", "na", "nan"];

/// Strictly parse a raw metric string.
///
/// Placeholders yield `Ok(None)`; anything else that is not a finite number
/// (after stripping a trailing `%` and thousands separators) is an error.
pub fn parse_metric(raw: &str) -> Result<Option<f64>, ScoringError> {
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed.to_ascii_lowercase().as_str()) {
        return Ok(None);
    }

    let numeric = trimmed.strip_suffix('%').unwrap_or(trimmed).trim().replace(',', "");
    match numeric.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ScoringError::InvalidMetric(raw.to_string())),
    }
}

/// Lenient percent/number conversion: `"12.5%"` -> `12.5`, garbage -> `None`.
pub fn percent_to_number(raw: &str) -> Option<f64> {
    parse_metric(raw).ok().flatten()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetric {
    Number(f64),
    Text(String),
}

/// serde `deserialize_with` helper for nullable metric fields.
pub fn lenient_metric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMetric>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawMetric::Number(v)) if v.is_finite() => Some(v),
        Some(RawMetric::Number(_)) => None,
        Some(RawMetric::Text(s)) => percent_to_number(&s),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric_numbers_and_percents() {
        assert_eq!(parse_metric("12.5").unwrap(), Some(12.5));
        assert_eq!(parse_metric(" -3.2% ").unwrap(), Some(-3.2));
        assert_eq!(parse_metric("1,234.5").unwrap(), Some(1234.5));
    }

    #[test]
    fn test_parse_metric_placeholders() {
        for raw in ["", "-", "None", "N/A", "null", "  "] {
            assert_eq!(parse_metric(raw).unwrap(), None, "placeholder {:?}", raw);
        }
    }

    #[test]
    fn test_parse_metric_rejects_garbage() {
        assert_eq!(
            parse_metric("abc"),
            Err(ScoringError::InvalidMetric("abc".to_string()))
        );
        assert!(parse_metric("inf").is_err());
    }

    #[test]
    fn test_percent_to_number_is_lenient() {
        assert_eq!(percent_to_number("45%"), Some(45.0));
        assert_eq!(percent_to_number("not a number"), None);
    }
}
