//! Upload results as delivered by the SDMX global filter service
//!
//! The filter service has shipped two response shapes over time:
//!
//! - **Violations** (older): separate counts and message lists for DSD
//!   violations (removed automatically) and content violations (must be
//!   fixed by the data provider).
//! - **Removals** (newer): one `removed`/`total` pair and a single list of
//!   reasons.
//!
//! A deployment talks to one backend, so a payload never carries both. The
//! raw JSON is read into [`RawResponse`] with every field optional and then
//! classified into an [`UploadResult`] according to a [`SchemaHint`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which response shape to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaHint {
    /// Decide from the fields present in the payload.
    #[default]
    Auto,
    Violations,
    Removals,
}

impl fmt::Display for SchemaHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaHint::Auto => write!(f, "auto"),
            SchemaHint::Violations => write!(f, "violations"),
            SchemaHint::Removals => write!(f, "removals"),
        }
    }
}

impl FromStr for SchemaHint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SchemaHint::Auto),
            "violations" | "a" => Ok(SchemaHint::Violations),
            "removals" | "b" => Ok(SchemaHint::Removals),
            other => Err(Error::UnknownSchema(other.to_string())),
        }
    }
}

/// The two concrete response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Schema {
    Violations,
    Removals,
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Violations => write!(f, "violations"),
            Schema::Removals => write!(f, "removals"),
        }
    }
}

/// Wire form of a response. Every field may be missing, `null` or falsy.
///
/// Fields are read leniently: a value of the wrong type degrades to "nothing
/// to show" instead of failing the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    #[serde(default, deserialize_with = "lenient::text")]
    pub info: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub download: Option<String>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total: Option<u64>,

    // Violations shape
    #[serde(default, deserialize_with = "lenient::count")]
    pub dsd_violations: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub content_violations: Option<u64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub series: Option<u64>,
    #[serde(default, deserialize_with = "lenient::messages")]
    pub content_messages: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::messages")]
    pub dsd_messages: Option<Vec<String>>,

    // Removals shape
    #[serde(default, deserialize_with = "lenient::count")]
    pub removed: Option<u64>,
    #[serde(default, deserialize_with = "lenient::messages")]
    pub messages: Option<Vec<String>>,
}

/// Coercions applied to each wire field.
///
/// `null` is always `None` so it never counts towards schema detection. Any
/// other present value is `Some`, even when it coerces to nothing.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Truthy scalars as text; `false`, `0`, `""` and containers as `None`.
    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Bool(true) => Some("true".to_string()),
            Value::Number(n) if n.as_f64().map_or(false, |f| f != 0.0) => Some(n.to_string()),
            _ => None,
        })
    }

    /// Non-negative integers as-is, positive fractions truncated, numeric
    /// strings parsed, everything else 0.
    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => None,
            Value::Number(n) => Some(
                n.as_u64()
                    .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
                    .unwrap_or(0),
            ),
            Value::String(s) => Some(s.trim().parse().unwrap_or(0)),
            _ => Some(0),
        })
    }

    /// Scalar items stringified in order; `null` and nested items skipped. A
    /// non-list value reads as an empty list.
    pub fn messages<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Null => None,
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => Some(Vec::new()),
        })
    }
}

impl RawResponse {
    fn has_violation_fields(&self) -> bool {
        self.dsd_violations.is_some()
            || self.content_violations.is_some()
            || self.series.is_some()
            || self.content_messages.is_some()
            || self.dsd_messages.is_some()
    }

    fn has_removal_fields(&self) -> bool {
        self.removed.is_some() || self.messages.is_some()
    }

    /// Decide which shape this payload is.
    ///
    /// `fallback` is used when `hint` is `Auto` and the payload only carries
    /// the shared fields.
    pub fn detect(&self, hint: SchemaHint, fallback: Schema) -> Result<Schema> {
        match hint {
            SchemaHint::Violations => Ok(Schema::Violations),
            SchemaHint::Removals => Ok(Schema::Removals),
            SchemaHint::Auto => match (self.has_violation_fields(), self.has_removal_fields()) {
                (true, true) => Err(Error::MixedSchema),
                (true, false) => Ok(Schema::Violations),
                (false, true) => Ok(Schema::Removals),
                (false, false) => Ok(fallback),
            },
        }
    }

    pub fn classify(self, hint: SchemaHint, fallback: Schema) -> Result<UploadResult> {
        let schema = self.detect(hint, fallback)?;
        let total = self.total.unwrap_or(0);

        let outcome = match schema {
            Schema::Violations => Outcome::Violations(ViolationCounts {
                dsd_violations: self.dsd_violations.unwrap_or(0),
                content_violations: self.content_violations.unwrap_or(0),
                total,
                series: self.series.unwrap_or(0),
                content_messages: self.content_messages.unwrap_or_default(),
                dsd_messages: self.dsd_messages.unwrap_or_default(),
            }),
            Schema::Removals => Outcome::Removals(RemovalCounts {
                removed: self.removed.unwrap_or(0),
                total,
                messages: self.messages.unwrap_or_default(),
            }),
        };

        Ok(UploadResult {
            info: self.info.filter(|s| !s.is_empty()),
            download: self.download.filter(|s| !s.is_empty()),
            outcome,
        })
    }
}

/// Counts and messages of the older two-category response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViolationCounts {
    pub dsd_violations: u64,
    pub content_violations: u64,
    /// Series keys in the uploaded file
    pub total: u64,
    /// Series keys left after DSD filtering
    pub series: u64,
    pub content_messages: Vec<String>,
    pub dsd_messages: Vec<String>,
}

/// Counts and reasons of the newer single-category response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RemovalCounts {
    pub removed: u64,
    pub total: u64,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "schema", rename_all = "lowercase")]
pub enum Outcome {
    Violations(ViolationCounts),
    Removals(RemovalCounts),
}

impl Outcome {
    pub fn schema(&self) -> Schema {
        match self {
            Outcome::Violations(_) => Schema::Violations,
            Outcome::Removals(_) => Schema::Removals,
        }
    }
}

/// One classified upload result, ready to render.
///
/// `info` and `download` are `None` when the service sent nothing or an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub info: Option<String>,
    pub download: Option<String>,
    pub outcome: Outcome,
}

impl UploadResult {
    pub fn from_json(json: &str, hint: SchemaHint, fallback: Schema) -> Result<Self> {
        let raw: RawResponse = serde_json::from_str(json)?;
        raw.classify(hint, fallback)
    }

    pub fn from_slice(bytes: &[u8], hint: SchemaHint, fallback: Schema) -> Result<Self> {
        let raw: RawResponse = serde_json::from_slice(bytes)?;
        raw.classify(hint, fallback)
    }

    pub fn schema(&self) -> Schema {
        self.outcome.schema()
    }
}
