//! Explicit validation of inbound JSON documents.
//!
//! Handlers never deserialize request bodies straight into domain types. The raw
//! document is parsed into a [`serde_json::Value`] first and then handed to
//! [`Validate::validate`], which either yields the typed value or the complete list
//! of field errors. Lax coercion rules apply: numeric strings are accepted where a
//! number is expected, and unknown fields are ignored.

use std::num::IntErrorKind;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A single validation failure, located by its path inside the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Machine readable error kind (e.g. `missing`, `string_type`)
    #[serde(rename = "type")]
    pub kind: String,
    /// Location of the offending value, e.g. `["body", "price"]`
    pub loc: Vec<String>,
    /// Human-readable message
    pub msg: String,
}

impl FieldError {
    pub fn new(kind: impl Into<String>, loc: Vec<String>, msg: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            loc,
            msg: msg.into(),
        }
    }

    pub fn missing(loc: Vec<String>) -> Self {
        Self::new("missing", loc, "Field required")
    }
}

/// All field errors found while validating one document.
#[derive(Debug, Clone, Default, PartialEq, thiserror::Error)]
#[error("{} validation error(s)", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn single(error: FieldError) -> Self {
        Self(vec![error])
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Types that can be built from an untyped JSON document.
pub trait Validate: Sized {
    /// Location prefix reported in every [`FieldError::loc`].
    const ROOT: &'static str = "body";

    fn validate(value: &Value) -> Result<Self, ValidationErrors>;
}

/// Field accessor over a JSON object that reports failures as [`FieldError`]s.
pub struct ObjectFields<'a> {
    root: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> ObjectFields<'a> {
    pub fn new(root: &'static str, value: &'a Value) -> Result<Self, ValidationErrors> {
        match value {
            Value::Object(map) => Ok(Self { root, map }),
            _ => Err(ValidationErrors::single(FieldError::new(
                "model_attributes_type",
                vec![root.to_string()],
                "Input should be a valid dictionary or object to extract fields from",
            ))),
        }
    }

    fn loc(&self, field: &str) -> Vec<String> {
        vec![self.root.to_string(), field.to_string()]
    }

    /// Present and non-null value of `field`.
    fn present(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|v| !v.is_null())
    }

    pub fn required_str(&self, field: &str) -> Result<String, FieldError> {
        match self.map.get(field) {
            None => Err(FieldError::missing(self.loc(field))),
            Some(value) => self.as_string(field, value),
        }
    }

    pub fn optional_str(&self, field: &str) -> Result<Option<String>, FieldError> {
        self.present(field)
            .map(|value| self.as_string(field, value))
            .transpose()
    }

    pub fn required_f64(&self, field: &str) -> Result<f64, FieldError> {
        match self.map.get(field) {
            None => Err(FieldError::missing(self.loc(field))),
            Some(value) => self.as_f64(field, value),
        }
    }

    /// Any JSON integer, including values outside the `i64` range.
    pub fn optional_int(&self, field: &str) -> Result<Option<i128>, FieldError> {
        self.present(field)
            .map(|value| self.as_int(field, value))
            .transpose()
    }

    pub fn optional_datetime(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        self.present(field)
            .map(|value| self.as_datetime(field, value))
            .transpose()
    }

    fn as_string(&self, field: &str, value: &Value) -> Result<String, FieldError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(FieldError::new(
                "string_type",
                self.loc(field),
                "Input should be a valid string",
            )),
        }
    }

    fn as_f64(&self, field: &str, value: &Value) -> Result<f64, FieldError> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    return Err(FieldError::new(
                        "float_parsing",
                        self.loc(field),
                        "Input should be a valid number, unable to parse string as a number",
                    ))
                }
            },
            _ => None,
        };

        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            Some(_) => Err(FieldError::new(
                "finite_number",
                self.loc(field),
                "Input should be a finite number",
            )),
            None => Err(FieldError::new(
                "float_type",
                self.loc(field),
                "Input should be a valid number",
            )),
        }
    }

    fn as_int(&self, field: &str, value: &Value) -> Result<i128, FieldError> {
        match value {
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    return Ok(v.into());
                }
                if let Some(v) = n.as_u64() {
                    return Ok(v.into());
                }
                match n.as_f64() {
                    Some(f) if f.fract() != 0.0 => Err(FieldError::new(
                        "int_from_float",
                        self.loc(field),
                        "Input should be a valid integer, got a number with a fractional part",
                    )),
                    Some(f) if f >= i128::MIN as f64 && f < i128::MAX as f64 => Ok(f as i128),
                    _ => Err(self.int_too_large(field)),
                }
            }
            Value::Bool(b) => Ok(i128::from(*b)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i128>().map_err(|err| match err.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        self.int_too_large(field)
                    }
                    _ => FieldError::new(
                        "int_parsing",
                        self.loc(field),
                        "Input should be a valid integer, unable to parse string as an integer",
                    ),
                })
            }
            _ => Err(FieldError::new(
                "int_type",
                self.loc(field),
                "Input should be a valid integer",
            )),
        }
    }

    fn int_too_large(&self, field: &str) -> FieldError {
        FieldError::new(
            "int_parsing_size",
            self.loc(field),
            "Unable to parse input as an integer, exceeded maximum size",
        )
    }

    fn as_datetime(&self, field: &str, value: &Value) -> Result<DateTime<Utc>, FieldError> {
        let parsed = match value {
            Value::String(s) => parse_datetime(s.trim()),
            Value::Number(n) => n.as_f64().and_then(from_unix_timestamp),
            _ => {
                return Err(FieldError::new(
                    "datetime_type",
                    self.loc(field),
                    "Input should be a valid datetime",
                ))
            }
        };

        parsed.ok_or_else(|| {
            FieldError::new(
                "datetime_parsing",
                self.loc(field),
                "Input should be a valid datetime",
            )
        })
    }
}

/// Numeric timestamps larger than this are taken as milliseconds.
const MAX_TIMESTAMP_SECONDS: f64 = 2e10;

/// Unix time in seconds (or milliseconds past [`MAX_TIMESTAMP_SECONDS`]), fraction allowed.
fn from_unix_timestamp(raw: f64) -> Option<DateTime<Utc>> {
    if !raw.is_finite() {
        return None;
    }
    let seconds = if raw.abs() > MAX_TIMESTAMP_SECONDS {
        raw / 1000.0
    } else {
        raw
    };
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos)
}

/// RFC 3339 timestamps, or ISO 8601 without an offset (taken as UTC).
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
