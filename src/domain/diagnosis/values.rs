//! Small value types carried by a scan.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Opaque handle to a captured or picked photo (usually a `file://` URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wraps a URI, returning error if blank.
    pub fn new(uri: impl Into<String>) -> Result<Self, ValidationError> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err(ValidationError::empty_field("image_ref"));
        }
        Ok(Self(uri))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the condition has changed since it first appeared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Progression {
    Better,
    #[default]
    Stable,
    Worse,
}

impl Progression {
    pub fn label(&self) -> &'static str {
        match self {
            Progression::Better => "Getting Better",
            Progression::Stable => "Staying the Same",
            Progression::Worse => "Getting Worse",
        }
    }
}

impl std::str::FromStr for Progression {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "better" => Ok(Progression::Better),
            "stable" | "same" => Ok(Progression::Stable),
            "worse" => Ok(Progression::Worse),
            other => Err(ValidationError::invalid_format(
                "progression",
                format!("expected better, stable or worse, got '{}'", other),
            )),
        }
    }
}

/// Whether the user has had this condition before.
///
/// Persists as `true`, `false` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Recurrence {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Recurrence {
    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::Yes => "Yes",
            Recurrence::No => "No",
            Recurrence::Unknown => "Not sure",
        }
    }
}

impl From<Option<bool>> for Recurrence {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Recurrence::Yes,
            Some(false) => Recurrence::No,
            None => Recurrence::Unknown,
        }
    }
}

impl From<Recurrence> for Option<bool> {
    fn from(value: Recurrence) -> Self {
        match value {
            Recurrence::Yes => Some(true),
            Recurrence::No => Some(false),
            Recurrence::Unknown => None,
        }
    }
}
