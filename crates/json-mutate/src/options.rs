//! Options controlling how an update request is applied.

use serde::Deserialize;

use crate::error::MutateError;

/// How `addToSet` treats its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddToSetMode {
    /// Deduplicate the existing sequence, then append each operand element
    /// that is not present yet.
    #[default]
    Union,
    /// Ignore the operand and deduplicate the field's own sequence.
    Literal,
}

/// Source of the timestamp written by `currentDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// A fixed epoch-milliseconds value.
    Fixed(i64),
}

impl Clock {
    /// Current time in milliseconds since the Unix epoch.
    pub fn now_millis(&self) -> i64 {
        match self {
            Clock::System => chrono::Utc::now().timestamp_millis(),
            Clock::Fixed(ms) => *ms,
        }
    }
}

/// Options for [`crate::mutate_with`].
///
/// Loadable from TOML or JSON with camelCase keys:
///
/// ```toml
/// extendedOperators = true
/// addToSet = "literal"
/// clock = { fixed = 1700000000000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MutateOptions {
    /// Include `multiply` and `currentDate` in the dispatch order.
    pub extended_operators: bool,
    pub add_to_set: AddToSetMode,
    pub clock: Clock,
}

impl Default for MutateOptions {
    fn default() -> Self {
        Self {
            extended_operators: true,
            add_to_set: AddToSetMode::Union,
            clock: Clock::System,
        }
    }
}

impl MutateOptions {
    pub fn from_toml_str(src: &str) -> Result<Self, MutateError> {
        toml::from_str(src).map_err(|e| MutateError::Config(e.to_string()))
    }

    /// Loads options from a JSON object. Any other top-level value is a
    /// config error.
    pub fn from_json_str(src: &str) -> Result<Self, MutateError> {
        let value: serde_json::Value = serde_json::from_str(src)?;
        if !value.is_object() {
            return Err(MutateError::Config("options must be a JSON object".into()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_add_to_set(mut self, mode: AddToSetMode) -> Self {
        self.add_to_set = mode;
        self
    }

    pub fn with_extended_operators(mut self, enabled: bool) -> Self {
        self.extended_operators = enabled;
        self
    }
}
