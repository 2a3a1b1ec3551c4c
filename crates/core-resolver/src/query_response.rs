// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use serde::Serialize;
use serde_json::Value;

/// The `{ data, errors }` result of executing an operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExecutionResult {
    /// `None` when execution did not start (parse or validation failure); `Some(Value::Null)`
    /// when a non-null root field failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ExecutionResult {
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self { data: None, errors }
    }

    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<ErrorLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<PathSegment>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }

    pub fn at(mut self, pos: Pos) -> Self {
        self.locations.push(pos.into());
        self
    }

    pub fn with_path(mut self, path: &[PathSegment]) -> Self {
        self.path = path.to_vec();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorLocation {
    pub line: usize,
    pub column: usize,
}

impl From<Pos> for ErrorLocation {
    fn from(pos: Pos) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
        }
    }
}

/// A response key or a list index leading to the field that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn serialized_shape() {
        let result = ExecutionResult {
            data: Some(json!({ "user": null })),
            errors: vec![
                FieldError::new("No User found")
                    .at(Pos { line: 2, column: 5 })
                    .with_path(&[
                        PathSegment::Field("users".to_string()),
                        PathSegment::Index(1),
                        PathSegment::Field("name".to_string()),
                    ]),
            ],
        };

        assert_eq!(
            result.to_json().unwrap(),
            json!({
                "data": { "user": null },
                "errors": [{
                    "message": "No User found",
                    "locations": [{ "line": 2, "column": 5 }],
                    "path": ["users", 1, "name"]
                }]
            })
        );
    }

    #[test]
    fn omits_empty_parts() {
        assert_eq!(
            ExecutionResult {
                data: Some(json!({ "users": [] })),
                errors: vec![],
            }
            .to_json()
            .unwrap(),
            json!({ "data": { "users": [] } })
        );

        assert_eq!(
            ExecutionResult::from_errors(vec![FieldError::new("Syntax error")])
                .to_json()
                .unwrap(),
            json!({ "errors": [{ "message": "Syntax error" }] })
        );
    }
}
