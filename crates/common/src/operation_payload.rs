// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::Deserialize;
use serde_json::{Map, Value};

/// The `{ query, variables, operationName }` envelope of a GraphQL request.
#[derive(Debug, Clone, Deserialize)]
pub struct OperationsPayload {
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
    pub query: String,
    pub variables: Option<Map<String, Value>>,
}

impl OperationsPayload {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            operation_name: None,
            query: query.into(),
            variables: None,
        }
    }

    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = match variables {
            Value::Object(map) => Some(map),
            _ => None,
        };
        self
    }

    pub fn from_json(json: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn full_payload() {
        let payload = OperationsPayload::from_json(json!({
            "query": "query Q { users { id } }",
            "operationName": "Q",
            "variables": { "id": "x" }
        }))
        .unwrap();

        assert_eq!(payload.operation_name.as_deref(), Some("Q"));
        assert_eq!(payload.variables.unwrap().get("id"), Some(&json!("x")));
    }

    #[test]
    fn null_variables() {
        let payload =
            OperationsPayload::from_json(json!({ "query": "{ users { id } }", "variables": null }))
                .unwrap();

        assert!(payload.variables.is_none());
    }

    #[test]
    fn missing_query() {
        assert!(OperationsPayload::from_json(json!({ "variables": {} })).is_err());
        assert!(OperationsPayload::from_json(json!({ "query": 42 })).is_err());
    }
}
