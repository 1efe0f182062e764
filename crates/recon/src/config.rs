use std::collections::HashSet;

use serde::Deserialize;

use crate::error::DiffError;

// ---------------------------------------------------------------------------
// Record diff config
// ---------------------------------------------------------------------------

/// Field-level rules for reconciling JSON records, usually loaded from TOML:
///
/// ```toml
/// name = "customers"
/// identity = ["id"]
/// compare = ["name", "email"]
/// ignore = ["updated_at"]
/// key_transform = "trim"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RecordDiffConfig {
    #[serde(default)]
    pub name: String,
    /// Fields whose values together form a record's identity.
    pub identity: Vec<String>,
    /// Fields checked for content changes. `None` means every field that is
    /// neither an identity field nor ignored.
    #[serde(default)]
    pub compare: Option<Vec<String>>,
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub key_transform: KeyTransform,
}

/// Normalization applied to identity values before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyTransform {
    None,
    /// Strip leading and trailing whitespace.
    Trim,
    /// Keep ASCII digits only.
    Digits,
    /// Lowercase only; whitespace is kept.
    Lowercase,
}

impl Default for KeyTransform {
    fn default() -> Self {
        Self::None
    }
}

impl KeyTransform {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            KeyTransform::None => raw.to_string(),
            KeyTransform::Trim => raw.trim().to_string(),
            KeyTransform::Digits => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
            KeyTransform::Lowercase => raw.to_lowercase(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RecordDiffConfig {
    /// Identity on `identity`, every other field compared, no key transform.
    pub fn with_identity<S: Into<String>>(identity: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: String::new(),
            identity: identity.into_iter().map(Into::into).collect(),
            compare: None,
            ignore: Vec::new(),
            key_transform: KeyTransform::None,
        }
    }

    pub fn from_toml(input: &str) -> Result<Self, DiffError> {
        let config: RecordDiffConfig =
            toml::from_str(input).map_err(|e| DiffError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DiffError> {
        if self.identity.is_empty() {
            return Err(DiffError::ConfigValidation(
                "at least one identity field is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.identity {
            if field.trim().is_empty() {
                return Err(DiffError::ConfigValidation("identity field names must not be blank".into()));
            }
            if !seen.insert(field.as_str()) {
                return Err(DiffError::ConfigValidation(format!(
                    "identity field '{field}' listed more than once"
                )));
            }
        }

        if let Some(ref compare) = self.compare {
            if compare.is_empty() {
                return Err(DiffError::ConfigValidation(
                    "compare must list at least one field when present".into(),
                ));
            }
            for field in compare {
                if field.trim().is_empty() {
                    return Err(DiffError::ConfigValidation("compare field names must not be blank".into()));
                }
                if self.ignore.contains(field) {
                    return Err(DiffError::ConfigValidation(format!(
                        "field '{field}' is both compared and ignored"
                    )));
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
