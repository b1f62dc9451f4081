//! Self-reported symptom intensity on a 1-5 scale.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A 1-5 slider value used for severity, pain and itching.
///
/// Persists as a bare JSON integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SymptomLevel(u8);

impl SymptomLevel {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(5);

    /// Creates a SymptomLevel, returning error if outside 1..=5.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        Self::try_for_field("level", value)
    }

    /// Like `try_new`, naming the form field in the error.
    pub fn try_for_field(field: &str, value: u8) -> Result<Self, ValidationError> {
        if !(1..=5).contains(&value) {
            return Err(ValidationError::out_of_range(field, 1, 5, i32::from(value)));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Slider caption for severity.
    pub fn severity_label(&self) -> &'static str {
        match self.0 {
            0..=2 => "Mild",
            3..=4 => "Moderate",
            _ => "Severe",
        }
    }

    /// Slider caption for pain.
    pub fn pain_label(&self) -> &'static str {
        match self.0 {
            0..=2 => "Minimal",
            3..=4 => "Moderate",
            _ => "Intense",
        }
    }

    /// Slider caption for itching.
    pub fn itching_label(&self) -> &'static str {
        match self.0 {
            0..=2 => "Minimal",
            3..=4 => "Moderate",
            _ => "Severe",
        }
    }

    /// Coarse risk badge shown on history rows.
    pub fn risk_label(&self) -> &'static str {
        match self.0 {
            0..=2 => "Low",
            3 => "Medium",
            _ => "High",
        }
    }
}

impl Default for SymptomLevel {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u8> for SymptomLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SymptomLevel> for u8 {
    fn from(level: SymptomLevel) -> Self {
        level.0
    }
}

impl fmt::Display for SymptomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(v: u8) -> SymptomLevel {
        SymptomLevel::try_new(v).unwrap()
    }

    #[test]
    fn accepts_one_through_five() {
        for v in 1..=5 {
            assert_eq!(level(v).value(), v);
        }
    }

    #[test]
    fn rejects_zero_and_six() {
        assert!(SymptomLevel::try_new(0).is_err());
        assert!(SymptomLevel::try_new(6).is_err());
    }

    #[test]
    fn error_names_the_form_field() {
        let err = SymptomLevel::try_for_field("pain_level", 9).unwrap_err();
        assert_eq!(err, ValidationError::out_of_range("pain_level", 1, 5, 9));
    }

    #[test]
    fn default_is_one() {
        assert_eq!(SymptomLevel::default(), SymptomLevel::MIN);
    }

    #[test]
    fn severity_labels_follow_slider_bands() {
        assert_eq!(level(2).severity_label(), "Mild");
        assert_eq!(level(4).severity_label(), "Moderate");
        assert_eq!(level(5).severity_label(), "Severe");
        assert_eq!(level(5).pain_label(), "Intense");
        assert_eq!(level(3).itching_label(), "Moderate");
    }

    #[test]
    fn risk_label_bands() {
        assert_eq!(level(1).risk_label(), "Low");
        assert_eq!(level(3).risk_label(), "Medium");
        assert_eq!(level(4).risk_label(), "High");
    }

    #[test]
    fn serializes_as_bare_integer() {
        assert_eq!(serde_json::to_string(&level(4)).unwrap(), "4");
        let parsed: SymptomLevel = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, level(3));
        assert!(serde_json::from_str::<SymptomLevel>("7").is_err());
    }
}
