//! Field type and value definitions for command records.
//!
//! This module defines the closed type system arguments are converted into:
//! - [`FieldType`]: field type definitions — scalar kinds, an optional
//!   wrapper, and a homogeneous array used by list receptors
//! - [`FieldValue`]: field value definitions, corresponding to actual values
//!   of the various kinds
//!
//! Argument text is converted with [`FieldType::extract`], an explicit
//! fallible parse per kind. Any declared type outside the closed set is
//! rejected when the profile is compiled, never at bind time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BoxError, SchemaError};

/// Field type definitions for command records.
///
/// Supports the scalar kinds (`Text`, `I64`, `F64`, `Bool`), an optional
/// wrapper over a scalar, and an array of a scalar. Arrays are only legal on
/// the last free-argument position, where they act as the list receptor.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    /// UTF-8 encoded text
    Text,
    /// Signed 64-bit integer
    I64,
    /// 64-bit floating point number
    F64,
    /// Boolean value
    Bool,
    /// Optional field type
    Option(Box<FieldType>),
    /// Homogeneous array of a scalar field type
    Array(Box<FieldType>),
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => write!(f, "Text"),
            FieldType::I64 => write!(f, "I64"),
            FieldType::F64 => write!(f, "F64"),
            FieldType::Bool => write!(f, "Bool"),
            FieldType::Option(v) => write!(f, "Option({:?})", v),
            FieldType::Array(v) => write!(f, "Array({:?})", v),
        }
    }
}

impl FieldType {
    /// Check that this type is inside the closed set: a scalar, an optional
    /// wrapper over a scalar, or an array of a scalar.
    ///
    /// # Returns
    /// * `Result<(), SchemaError>` - Ok if supported, or an error message
    pub fn check_supported(&self) -> Result<(), SchemaError> {
        match self {
            FieldType::Text | FieldType::I64 | FieldType::F64 | FieldType::Bool => Ok(()),
            FieldType::Option(inner) | FieldType::Array(inner) => match inner.as_ref() {
                FieldType::Text | FieldType::I64 | FieldType::F64 | FieldType::Bool => Ok(()),
                other => Err(SchemaError::FieldType(format!(
                    "nested wrapper {:?} in {:?} is not supported",
                    other, self
                ))),
            },
        }
    }

    /// The value a field of this type holds before any assignment.
    ///
    /// Text defaults to the empty string rather than an absent value; the
    /// other scalars default to their zero value.
    pub fn zero_value(&self) -> FieldValue {
        match self {
            FieldType::Text => FieldValue::Text(String::new()),
            FieldType::I64 => FieldValue::I64(0),
            FieldType::F64 => FieldValue::F64(0.0),
            FieldType::Bool => FieldValue::Bool(false),
            FieldType::Option(_) => FieldValue::Null,
            FieldType::Array(_) => FieldValue::Array(Vec::new()),
        }
    }

    /// Extract a FieldValue from argument text according to this field type.
    ///
    /// An optional wrapper is unwrapped first, so `Option(I64)` parses like
    /// `I64`. Arrays cannot be extracted from one token; the list receptor
    /// converts element-wise with the inner type instead.
    ///
    /// # Arguments
    /// * `text` - The argument text to convert
    ///
    /// # Returns
    /// * `Result<FieldValue, SchemaError>` - The converted value or an error message
    pub fn extract(&self, text: &str) -> Result<FieldValue, SchemaError> {
        match self {
            FieldType::Text => Ok(FieldValue::Text(text.to_string())),
            FieldType::I64 => text
                .parse::<i64>()
                .map(FieldValue::I64)
                .map_err(|err| SchemaError::FieldValue(format!("{:?}: {}", text, err))),
            FieldType::F64 => text
                .parse::<f64>()
                .map(FieldValue::F64)
                .map_err(|err| SchemaError::FieldValue(format!("{:?}: {}", text, err))),
            FieldType::Bool => text
                .parse::<bool>()
                .map(FieldValue::Bool)
                .map_err(|err| SchemaError::FieldValue(format!("{:?}: {}", text, err))),
            FieldType::Option(inner) => inner.extract(text),
            FieldType::Array(_) => Err(SchemaError::FieldValue(format!(
                "cannot extract {:?} from a single token {:?}",
                self, text
            ))),
        }
    }

    /// Validate that a FieldValue matches this field type.
    ///
    /// # Arguments
    /// * `value` - The FieldValue to validate
    ///
    /// # Returns
    /// * `Result<(), SchemaError>` - Ok if valid, or an error message
    pub fn validate(&self, value: &FieldValue) -> Result<(), SchemaError> {
        match (self, value) {
            (FieldType::Text, FieldValue::Text(_)) => Ok(()),
            (FieldType::I64, FieldValue::I64(_)) => Ok(()),
            (FieldType::F64, FieldValue::F64(_)) => Ok(()),
            (FieldType::Bool, FieldValue::Bool(_)) => Ok(()),
            (FieldType::Option(ft), val) => {
                if val == &FieldValue::Null {
                    return Ok(());
                }
                ft.validate(val)
            }
            (FieldType::Array(ft), FieldValue::Array(values)) => {
                for fv in values.iter() {
                    ft.validate(fv)?;
                }
                Ok(())
            }
            _ => Err(SchemaError::FieldValue(format!(
                "expected type {:?}, got value {:?}",
                self, value
            ))),
        }
    }
}

/// Field value definitions for command records.
///
/// Corresponds to the field types, storing actual argument data.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// UTF-8 encoded text value
    Text(String),
    /// Signed 64-bit integer value
    I64(i64),
    /// 64-bit floating point value
    F64(f64),
    /// Boolean value
    Bool(bool),
    /// Array of field values
    Array(Vec<FieldValue>),
    /// Null value (for optional fields)
    Null,
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(v) => write!(f, "Text({:?})", v),
            FieldValue::I64(v) => write!(f, "I64({})", v),
            FieldValue::F64(v) => write!(f, "F64({})", v),
            FieldValue::Bool(v) => write!(f, "Bool({})", v),
            FieldValue::Array(v) => write!(f, "Array({:?})", v),
            FieldValue::Null => write!(f, "Null"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::I64(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::F64(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl TryFrom<FieldValue> for String {
    type Error = BoxError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Text(v) => Ok(v),
            _ => Err(SchemaError::FieldValue(format!("expected Text, got {value:?}")).into()),
        }
    }
}

impl TryFrom<FieldValue> for i64 {
    type Error = BoxError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::I64(v) => Ok(v),
            _ => Err(SchemaError::FieldValue(format!("expected I64, got {value:?}")).into()),
        }
    }
}

impl TryFrom<FieldValue> for f64 {
    type Error = BoxError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::F64(v) => Ok(v),
            _ => Err(SchemaError::FieldValue(format!("expected F64, got {value:?}")).into()),
        }
    }
}

impl TryFrom<FieldValue> for bool {
    type Error = BoxError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Bool(v) => Ok(v),
            _ => Err(SchemaError::FieldValue(format!("expected Bool, got {value:?}")).into()),
        }
    }
}

impl<T> TryFrom<FieldValue> for Option<T>
where
    T: TryFrom<FieldValue, Error = BoxError>,
{
    type Error = BoxError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Null => Ok(None),
            v => Ok(Some(v.try_into()?)),
        }
    }
}

impl<T> TryFrom<FieldValue> for Vec<T>
where
    T: TryFrom<FieldValue, Error = BoxError>,
{
    type Error = BoxError;

    fn try_from(value: FieldValue) -> Result<Self, Self::Error> {
        match value {
            FieldValue::Array(arr) => {
                let mut rt = Vec::with_capacity(arr.len());
                for v in arr {
                    rt.push(v.try_into()?);
                }
                Ok(rt)
            }
            _ => Err(SchemaError::FieldValue(format!("expected Array, got {value:?}")).into()),
        }
    }
}
