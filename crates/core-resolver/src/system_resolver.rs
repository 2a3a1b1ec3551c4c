// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{Pos, types::ExecutableDocument};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use common::operation_payload::OperationsPayload;

use crate::{
    operation_resolver::resolve_operation,
    plugin::SubsystemGraphQLResolver,
    query_response::{ExecutionResult, FieldError},
    schema::{Schema, SchemaError},
    validation::{
        document_validator::DocumentValidator, operation::ValidatedOperation,
        validation_error::ValidationError,
    },
};

/// The top-level system resolver.
///
/// Parses and validates each operation against the schema derived from the subsystem resolver,
/// then delegates field resolution to the subsystem.
pub struct GraphQLSystemResolver<R: SubsystemGraphQLResolver> {
    subsystem_resolver: R,
    pub schema: Schema,
    query_depth_limit: usize,
}

impl<R: SubsystemGraphQLResolver> GraphQLSystemResolver<R> {
    pub fn new(subsystem_resolver: R, query_depth_limit: usize) -> Result<Self, SchemaError> {
        let schema = Schema::new_from_resolver(&subsystem_resolver)?;

        Ok(Self {
            subsystem_resolver,
            schema,
            query_depth_limit,
        })
    }

    pub fn subsystem_resolver(&self) -> &R {
        &self.subsystem_resolver
    }

    /// Resolve the operation in the payload.
    ///
    /// Parse and validation failures are returned as errors (no field has been resolved at that
    /// point). Errors during execution are part of the [ExecutionResult].
    #[instrument(name = "SystemResolver::resolve_operations", skip_all)]
    pub async fn resolve_operations(
        &self,
        operations_payload: OperationsPayload,
    ) -> Result<ExecutionResult, SystemResolutionError> {
        let operation = self.validate_operation(
            &operations_payload.query,
            operations_payload.operation_name,
            operations_payload.variables,
        )?;

        debug!(
            subsystem = self.subsystem_resolver.id(),
            operation_type = ?operation.typ,
            "Executing operation"
        );

        let context = self.subsystem_resolver.create_request_context();
        Ok(resolve_operation(&self.subsystem_resolver, &operation, &context).await)
    }

    #[instrument(skip_all)]
    fn validate_operation(
        &self,
        query: &str,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
    ) -> Result<ValidatedOperation, SystemResolutionError> {
        let document = parse_query(query).map_err(|error| vec![error])?;

        let document_validator = DocumentValidator::new(
            &self.schema,
            operation_name,
            variables,
            self.query_depth_limit,
        );

        Ok(document_validator.validate(document)?)
    }
}

#[instrument(name = "system_resolver::parse_query")]
fn parse_query(query: &str) -> Result<ExecutableDocument, ValidationError> {
    async_graphql_parser::parse_query(query).map_err(|error| {
        warn!(%error, "Failed to parse query");
        let (message, pos1, pos2) = match error {
            async_graphql_parser::Error::Syntax {
                message,
                start,
                end,
            } => {
                // Error::Syntax's message spans multiple lines (with a source excerpt), fold it
                // into one
                let message = message
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                (format!("Syntax error: {message}"), start, end)
            }
            async_graphql_parser::Error::MultipleOperations {
                anonymous,
                operation,
            } => (
                "Multiple operations".to_string(),
                anonymous,
                Some(operation),
            ),
            async_graphql_parser::Error::OperationDuplicated {
                operation,
                first,
                second,
            } => (
                format!("Operation {operation} duplicated"),
                first,
                Some(second),
            ),
            async_graphql_parser::Error::FragmentDuplicated {
                fragment,
                first,
                second,
            } => (
                format!("Fragment {fragment} duplicated"),
                first,
                Some(second),
            ),
            async_graphql_parser::Error::MissingOperation => {
                ("Missing operation".to_string(), Pos::default(), None)
            }
            _ => ("Unknown error".to_string(), Pos::default(), None),
        };

        ValidationError::QueryParsingFailed(message, pos1, pos2)
    })
}

#[derive(Error, Debug)]
pub enum SystemResolutionError {
    #[error("{}", display_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn display_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for SystemResolutionError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SystemResolutionError::Validation(errors)
    }
}

impl SystemResolutionError {
    /// The errors to report to the client (in the `errors` entry of a response without `data`).
    pub fn user_errors(&self) -> Vec<FieldError> {
        match self {
            SystemResolutionError::Validation(errors) => errors
                .iter()
                .map(|error| {
                    [error.position1(), error.position2()]
                        .into_iter()
                        .flatten()
                        .fold(FieldError::new(error.to_string()), FieldError::at)
                })
                .collect(),
        }
    }

    pub fn into_execution_result(self) -> ExecutionResult {
        ExecutionResult::from_errors(self.user_errors())
    }
}
