//! Normalized HTTP results handed back to the planner

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::{HateoasError, Result};

/// Parsed body of an HTTP response
///
/// Serializes as a JSON object, a JSON array, or `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ResponseBody {
    Object(Map<String, Value>),
    Array(Vec<Value>),
    #[default]
    Absent,
}

impl ResponseBody {
    /// Parse a body that must be JSON
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::try_from(value)
    }

    /// Parse a body, treating empty or non-JSON content as absent
    pub fn parse_lenient(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(value) => Self::try_from(value),
            Err(_) => Ok(Self::Absent),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

impl TryFrom<Value> for ResponseBody {
    type Error = HateoasError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::Object(map)),
            Value::Array(items) => Ok(Self::Array(items)),
            Value::Null => Ok(Self::Absent),
            Value::Bool(_) => Err(HateoasError::InvalidBody("a boolean".to_string())),
            Value::Number(_) => Err(HateoasError::InvalidBody("a number".to_string())),
            Value::String(_) => Err(HateoasError::InvalidBody("a string".to_string())),
        }
    }
}

impl From<ResponseBody> for Value {
    fn from(body: ResponseBody) -> Self {
        match body {
            ResponseBody::Object(map) => Value::Object(map),
            ResponseBody::Array(items) => Value::Array(items),
            ResponseBody::Absent => Value::Null,
        }
    }
}

/// Status code and parsed body of one HTTP call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: ResponseBody,
}

impl HttpResponse {
    pub fn new(status_code: u16, body: ResponseBody) -> Self {
        Self { status_code, body }
    }

    /// JSON text form fed back to the model
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
