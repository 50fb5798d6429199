// Mappers: Convert between JSON requests/responses and domain models
// Keeps serde_json details out of the domain layer

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{
    decoder::CoverOutcome,
    set_collection::{InputError, Scalar},
};

/// Labeled sets plus the variant selector, as received from a caller
#[derive(Debug, Clone, PartialEq)]
pub struct CoverRequest {
    pub sets: Vec<(Scalar, Vec<Scalar>)>,
    pub variant: String,
    pub k: Option<i64>,
}

impl CoverRequest {
    pub const DEFAULT_VARIANT: &'static str = "strict";

    /// Parse a request document.
    ///
    /// Accepted shapes:
    /// - `[{"A": [1, 2]}, {"B": [3]}]`: list of objects mapping label to elements
    /// - `[["A", [1, 2]], [7, [3]]]`: list of `[label, elements]` pairs
    /// - `{"sets": <either list above, or one object>, "variant": "...", "k": n}`
    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| InputError::MalformedRequest(format!("invalid JSON: {}", e)))?;
        Self::from_json(&value)
    }

    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        match value {
            Value::Array(entries) => Ok(Self {
                sets: sets_from_list(entries)?,
                variant: Self::DEFAULT_VARIANT.to_string(),
                k: None,
            }),
            Value::Object(fields) => Self::from_request_object(fields),
            other => Err(InputError::MalformedRequest(format!(
                "expected a list of sets or a request object, got {}",
                json_type(other)
            ))),
        }
    }

    fn from_request_object(fields: &Map<String, Value>) -> Result<Self, InputError> {
        if let Some(unknown) = fields
            .keys()
            .find(|key| !matches!(key.as_str(), "sets" | "variant" | "k"))
        {
            return Err(InputError::MalformedRequest(format!(
                "unknown request field '{}'",
                unknown
            )));
        }

        let sets = match fields.get("sets") {
            Some(Value::Array(entries)) => sets_from_list(entries)?,
            Some(Value::Object(map)) => sets_from_object(map)?,
            Some(other) => {
                return Err(InputError::MalformedRequest(format!(
                    "'sets' must be a list or an object, got {}",
                    json_type(other)
                )))
            }
            None => return Err(InputError::MalformedRequest("missing 'sets'".to_string())),
        };

        let variant = match fields.get("variant") {
            None | Some(Value::Null) => Self::DEFAULT_VARIANT.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(InputError::MalformedRequest(format!(
                    "'variant' must be a string, got {}",
                    json_type(other)
                )))
            }
        };

        let k = match fields.get("k") {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(n.as_i64().ok_or_else(|| {
                InputError::MalformedRequest(format!("'k' must be an integer, got {}", n))
            })?),
            Some(other) => {
                return Err(InputError::MalformedRequest(format!(
                    "'k' must be an integer, got {}",
                    json_type(other)
                )))
            }
        };

        Ok(Self { sets, variant, k })
    }
}

fn sets_from_list(entries: &[Value]) -> Result<Vec<(Scalar, Vec<Scalar>)>, InputError> {
    let mut sets = Vec::new();
    for entry in entries {
        match entry {
            Value::Object(map) => sets.extend(sets_from_object(map)?),
            Value::Array(pair) if pair.len() == 2 => {
                sets.push((scalar(&pair[0])?, elements(&pair[1])?));
            }
            other => {
                return Err(InputError::MalformedRequest(format!(
                    "each set must be an object or a [label, elements] pair, got {}",
                    other
                )))
            }
        }
    }
    Ok(sets)
}

fn sets_from_object(map: &Map<String, Value>) -> Result<Vec<(Scalar, Vec<Scalar>)>, InputError> {
    map.iter()
        .map(|(label, members)| Ok((Scalar::from(label.as_str()), elements(members)?)))
        .collect()
}

fn elements(value: &Value) -> Result<Vec<Scalar>, InputError> {
    match value {
        Value::Array(items) => items.iter().map(scalar).collect(),
        other => Err(InputError::MalformedRequest(format!(
            "elements must be a list, got {}",
            json_type(other)
        ))),
    }
}

fn scalar(value: &Value) -> Result<Scalar, InputError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .ok_or_else(|| InputError::UnsupportedValue(n.to_string())),
        Value::String(s) => Ok(Scalar::Str(s.clone())),
        other => Err(InputError::UnsupportedValue(other.to_string())),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Response document written back to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CoverResponse {
    Solved {
        labels: Vec<Scalar>,
        set_count: usize,
        covered: usize,
        uncovered: Vec<Scalar>,
    },
    NoSolution {
        reason: String,
    },
    InvalidInput {
        error: String,
    },
}

impl From<CoverOutcome> for CoverResponse {
    fn from(outcome: CoverOutcome) -> Self {
        match outcome {
            CoverOutcome::Solved(selection) => CoverResponse::Solved {
                set_count: selection.set_count(),
                labels: selection.labels,
                covered: selection.covered,
                uncovered: selection.uncovered,
            },
            CoverOutcome::NoSolution(status) => CoverResponse::NoSolution {
                reason: status.to_string(),
            },
        }
    }
}

impl From<InputError> for CoverResponse {
    fn from(error: InputError) -> Self {
        CoverResponse::InvalidInput {
            error: error.to_string(),
        }
    }
}

impl From<Result<CoverOutcome, InputError>> for CoverResponse {
    fn from(result: Result<CoverOutcome, InputError>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(error) => error.into(),
        }
    }
}
