use serde::{Deserialize, Serialize};

/// One raw sample pushed by a producer.
///
/// `value` stays textual until the chart parses it, so a malformed reading
/// can be reported instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl Sample {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            error: None,
        }
    }

    /// Builds a sample carrying a producer-side failure message.
    #[must_use]
    pub fn failed(label: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: Some(error.into()),
        }
    }

    /// Parses the textual value, accepting surrounding whitespace.
    pub fn parse_value(&self) -> Result<f64, std::num::ParseFloatError> {
        self.value.trim().parse::<f64>()
    }
}
