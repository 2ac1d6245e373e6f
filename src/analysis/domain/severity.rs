use super::json_display;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Severity band of a CVSS score
///
/// Bands are inclusive on their lower bound:
/// - Critical: 9.0 and above
/// - High: 7.0 - 8.9
/// - Medium: 4.0 - 6.9
/// - Low: below 4.0
/// - Unknown: no score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Classifies an optional CVSS score
    pub fn classify(score: Option<f64>) -> Self {
        match score {
            None => Severity::Unknown,
            Some(s) if s >= 9.0 => Severity::Critical,
            Some(s) if s >= 7.0 => Severity::High,
            Some(s) if s >= 4.0 => Severity::Medium,
            Some(_) => Severity::Low,
        }
    }

    /// Classifies a raw `cvss` attribute, accepting numbers and numeric strings
    pub fn from_cvss_value(value: Option<&Value>) -> Self {
        Self::classify(value.and_then(json_display::as_number))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        }
    }

    /// Fixed background color used when rendering a cell of this severity
    pub fn background_hex(&self) -> &'static str {
        match self {
            Severity::Critical => "#ffcccc",
            Severity::High => "#ffd9b3",
            Severity::Medium => "#fff2b3",
            Severity::Low => "#d6f5d6",
            Severity::Unknown => "#e6e6e6",
        }
    }

    /// RGB triple of [`Severity::background_hex`] for terminal output
    pub fn background_rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Critical => (0xff, 0xcc, 0xcc),
            Severity::High => (0xff, 0xd9, 0xb3),
            Severity::Medium => (0xff, 0xf2, 0xb3),
            Severity::Low => (0xd6, 0xf5, 0xd6),
            Severity::Unknown => (0xe6, 0xe6, 0xe6),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_band_boundaries() {
        assert_eq!(Severity::classify(Some(9.8)), Severity::Critical);
        assert_eq!(Severity::classify(Some(9.0)), Severity::Critical);
        assert_eq!(Severity::classify(Some(8.9)), Severity::High);
        assert_eq!(Severity::classify(Some(7.0)), Severity::High);
        assert_eq!(Severity::classify(Some(6.9)), Severity::Medium);
        assert_eq!(Severity::classify(Some(4.0)), Severity::Medium);
        assert_eq!(Severity::classify(Some(3.9)), Severity::Low);
        assert_eq!(Severity::classify(Some(0.0)), Severity::Low);
        assert_eq!(Severity::classify(None), Severity::Unknown);
    }

    #[test]
    fn test_from_cvss_value() {
        assert_eq!(Severity::from_cvss_value(Some(&json!(7.5))), Severity::High);
        assert_eq!(Severity::from_cvss_value(Some(&json!(10))), Severity::Critical);
        assert_eq!(Severity::from_cvss_value(Some(&json!("5.3"))), Severity::Medium);
        assert_eq!(Severity::from_cvss_value(Some(&json!("n/a"))), Severity::Unknown);
        assert_eq!(Severity::from_cvss_value(Some(&Value::Null)), Severity::Unknown);
        assert_eq!(Severity::from_cvss_value(None), Severity::Unknown);
    }

    #[test]
    fn test_labels_and_colors() {
        assert_eq!(Severity::Critical.to_string(), "Critical");
        assert_eq!(Severity::Unknown.label(), "Unknown");
        assert_eq!(Severity::Critical.background_hex(), "#ffcccc");
        assert_eq!(Severity::Low.background_hex(), "#d6f5d6");
        assert_eq!(Severity::Medium.background_rgb(), (0xff, 0xf2, 0xb3));
    }
}
