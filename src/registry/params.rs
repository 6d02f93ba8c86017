//! Algorithm parameters: the declared schema and the values a caller supplies

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(i64),
    Choice(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", n),
            ParamValue::Choice(s) => write!(f, "{}", s),
        }
    }
}

/// Named parameter values, ordered by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    pub fn with_number(mut self, id: &str, value: i64) -> Self {
        self.insert(id, ParamValue::Number(value));
        self
    }

    pub fn with_choice(mut self, id: &str, value: &str) -> Self {
        self.insert(id, ParamValue::Choice(value.to_string()));
        self
    }

    pub fn insert(&mut self, id: &str, value: ParamValue) {
        self.values.insert(id.to_string(), value);
    }

    pub fn get(&self, id: &str) -> Option<&ParamValue> {
        self.values.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Integer value of `id`
    pub fn number(&self, id: &str) -> Result<i64, ValidationError> {
        match self.values.get(id) {
            Some(ParamValue::Number(n)) => Ok(*n),
            Some(ParamValue::Choice(s)) => Err(ValidationError::InvalidParam {
                param: id.to_string(),
                reason: format!("expected an integer, got '{}'", s),
            }),
            None => Err(ValidationError::MissingParam(id.to_string())),
        }
    }

    /// Selected option of `id`
    pub fn choice(&self, id: &str) -> Result<&str, ValidationError> {
        match self.values.get(id) {
            Some(ParamValue::Choice(s)) => Ok(s),
            Some(ParamValue::Number(n)) => Err(ValidationError::InvalidParam {
                param: id.to_string(),
                reason: format!("expected an option, got {}", n),
            }),
            None => Err(ValidationError::MissingParam(id.to_string())),
        }
    }

    /// Parse a `key=value` assignment. Integers become [`ParamValue::Number`],
    /// anything else a [`ParamValue::Choice`].
    pub fn parse_assignment(raw: &str) -> Result<(String, ParamValue), ValidationError> {
        let Some((key, value)) = raw.split_once('=') else {
            return Err(ValidationError::InvalidParam {
                param: raw.trim().to_string(),
                reason: "expected key=value".to_string(),
            });
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return Err(ValidationError::InvalidParam {
                param: key.to_string(),
                reason: "expected key=value".to_string(),
            });
        }
        let value = match value.parse::<i64>() {
            Ok(n) => ParamValue::Number(n),
            Err(_) => ParamValue::Choice(value.to_string()),
        };
        Ok((key.to_string(), value))
    }
}

impl FromIterator<(String, ParamValue)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, ParamValue)>>(iter: I) -> Self {
        Params {
            values: iter.into_iter().collect(),
        }
    }
}

/// Declared shape of one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamKind {
    /// Integer in `min..=max`; without a default the caller must supply it
    Number {
        min: i64,
        max: i64,
        default: Option<i64>,
    },
    Select {
        options: &'static [&'static str],
        default: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl ParamSpec {
    pub const fn number(
        id: &'static str,
        label: &'static str,
        min: i64,
        max: i64,
        default: Option<i64>,
    ) -> Self {
        ParamSpec {
            id,
            label,
            kind: ParamKind::Number { min, max, default },
        }
    }

    pub const fn select(
        id: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        ParamSpec {
            id,
            label,
            kind: ParamKind::Select { options, default },
        }
    }

    /// Check a supplied value against this schema entry, or fall back to the default
    pub fn resolve(&self, supplied: Option<&ParamValue>) -> Result<ParamValue, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidParam {
            param: self.id.to_string(),
            reason,
        };
        match (self.kind, supplied) {
            (ParamKind::Number { default, .. }, None) => default
                .map(ParamValue::Number)
                .ok_or_else(|| ValidationError::MissingParam(self.id.to_string())),
            (ParamKind::Number { min, max, .. }, Some(ParamValue::Number(n))) => {
                if (min..=max).contains(n) {
                    Ok(ParamValue::Number(*n))
                } else {
                    Err(invalid(format!("{} is outside {}..={}", n, min, max)))
                }
            }
            (ParamKind::Number { .. }, Some(ParamValue::Choice(s))) => {
                Err(invalid(format!("expected an integer, got '{}'", s)))
            }
            (ParamKind::Select { default, .. }, None) => {
                Ok(ParamValue::Choice(default.to_string()))
            }
            (ParamKind::Select { options, .. }, Some(value)) => {
                // `base=10` arrives as a number; options are matched by text
                let text = value.to_string();
                if options.contains(&text.as_str()) {
                    Ok(ParamValue::Choice(text))
                } else {
                    Err(invalid(format!(
                        "'{}' is not one of {}",
                        text,
                        options.join(", ")
                    )))
                }
            }
        }
    }
}

/// Resolve `supplied` against `specs`: defaults filled, unknown ids rejected
pub fn resolve_params(specs: &[ParamSpec], supplied: &Params) -> Result<Params, ValidationError> {
    if let Some((id, _)) = supplied
        .iter()
        .find(|(id, _)| !specs.iter().any(|spec| spec.id == *id))
    {
        return Err(ValidationError::InvalidParam {
            param: id.to_string(),
            reason: "unknown parameter".to_string(),
        });
    }

    let mut resolved = Params::new();
    for spec in specs {
        let value = spec.resolve(supplied.get(spec.id))?;
        resolved.insert(spec.id, value);
    }
    Ok(resolved)
}
