//! Rule deciding when a scan is routed to a clinician instead of self-care.

use serde::Deserialize;

use crate::domain::foundation::{Confidence, SymptomLevel, ValidationError};

/// Thresholds for the "needs doctor" predicate.
///
/// A scan needs a referral when `severity >= severity_threshold` or
/// `confidence < confidence_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ReferralPolicy {
    #[serde(default = "default_severity_threshold")]
    pub severity_threshold: u8,

    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
}

impl ReferralPolicy {
    pub fn requires_referral(&self, severity: SymptomLevel, confidence: Confidence) -> bool {
        severity.value() >= self.severity_threshold
            || confidence.value() < self.confidence_threshold
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.severity_threshold) {
            return Err(ValidationError::out_of_range(
                "severity_threshold",
                1,
                5,
                i32::from(self.severity_threshold),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ValidationError::invalid_format(
                "confidence_threshold",
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

impl Default for ReferralPolicy {
    fn default() -> Self {
        Self {
            severity_threshold: default_severity_threshold(),
            confidence_threshold: default_confidence_threshold(),
        }
    }
}

fn default_severity_threshold() -> u8 {
    4
}

fn default_confidence_threshold() -> f64 {
    0.6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(severity: u8, confidence: f64) -> bool {
        ReferralPolicy::default().requires_referral(
            SymptomLevel::try_new(severity).unwrap(),
            Confidence::new(confidence),
        )
    }

    #[test]
    fn severity_at_threshold_requires_referral() {
        assert!(check(4, 0.9));
        assert!(!check(3, 0.9));
    }

    #[test]
    fn confidence_just_below_threshold_requires_referral() {
        assert!(check(1, 0.59));
        assert!(!check(1, 0.6));
    }

    #[test]
    fn validate_rejects_bad_thresholds() {
        let policy = ReferralPolicy {
            severity_threshold: 0,
            ..Default::default()
        };
        assert!(policy.validate().is_err());

        let policy = ReferralPolicy {
            confidence_threshold: 1.5,
            ..Default::default()
        };
        assert!(policy.validate().is_err());
        assert!(ReferralPolicy::default().validate().is_ok());
    }
}
