//! Types for analyzer metrics and values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the metric values that analyzers can produce.
///
/// Besides the scalar variants there is an explicit [`MetricValue::Missing`]
/// state for metrics that are undefined on the analyzed data, such as a
/// fraction over zero eligible rows. Consumers must treat it as "no value"
/// rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MetricValue {
    /// A floating-point metric value (e.g., a match fraction).
    Double(f64),

    /// An integer metric value (e.g., a count).
    Long(i64),

    /// A boolean metric value.
    Boolean(bool),

    /// A string metric value.
    String(String),

    /// The metric is undefined on the analyzed data ("no applicable rows").
    Missing,
}

impl MetricValue {
    /// Checks if the metric value is numeric (Double or Long).
    pub fn is_numeric(&self) -> bool {
        matches!(self, MetricValue::Double(_) | MetricValue::Long(_))
    }

    /// Checks if the metric is the undefined state.
    pub fn is_missing(&self) -> bool {
        matches!(self, MetricValue::Missing)
    }

    /// Attempts to get the numeric value as f64.
    ///
    /// Returns `None` for non-numeric values and for [`MetricValue::Missing`],
    /// so an undefined metric never leaks into numeric comparisons as NaN.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Double(v) => Some(*v),
            MetricValue::Long(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Attempts to get the value as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            MetricValue::Long(v) => Some(*v),
            MetricValue::Double(v) => {
                if v.fract() == 0.0 {
                    Some(*v as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns a human-readable string representation of the metric value.
    pub fn to_string_pretty(&self) -> String {
        match self {
            MetricValue::Double(v) => {
                if v.fract() == 0.0 {
                    format!("{v:.0}")
                } else {
                    format!("{v:.4}")
                }
            }
            MetricValue::Long(v) => v.to_string(),
            MetricValue::Boolean(b) => b.to_string(),
            MetricValue::String(s) => s.clone(),
            MetricValue::Missing => "<missing>".to_string(),
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_pretty())
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Double(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Long(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        MetricValue::Boolean(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::String(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::String(value.to_string())
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) => MetricValue::Double(v),
            None => MetricValue::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_checks() {
        assert!(MetricValue::Double(42.5).is_numeric());
        assert!(MetricValue::Long(42).is_numeric());
        assert!(!MetricValue::String("test".to_string()).is_numeric());
        assert!(!MetricValue::Missing.is_numeric());
    }

    #[test]
    fn missing_never_converts_to_a_number() {
        assert!(MetricValue::Missing.is_missing());
        assert_eq!(MetricValue::Missing.as_f64(), None);
        assert_eq!(MetricValue::Missing.as_i64(), None);
    }

    #[test]
    fn conversions() {
        assert_eq!(MetricValue::Double(42.0).as_i64(), Some(42));
        assert_eq!(MetricValue::Double(42.5).as_i64(), None);
        assert_eq!(MetricValue::Long(42).as_f64(), Some(42.0));
        assert_eq!(MetricValue::from(Some(0.5)), MetricValue::Double(0.5));
        assert_eq!(MetricValue::from(None::<f64>), MetricValue::Missing);
    }

    #[test]
    fn display() {
        assert_eq!(MetricValue::Double(42.0).to_string_pretty(), "42");
        assert_eq!(MetricValue::Double(0.6667).to_string_pretty(), "0.6667");
        assert_eq!(MetricValue::Missing.to_string_pretty(), "<missing>");
    }
}
