// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;

use async_graphql_parser::{
    Pos, Positioned,
    types::{FragmentDefinition, OperationDefinition, OperationType, VariableDefinition},
};
use async_graphql_value::{ConstValue, Name};
use serde_json::{Map, Value};

use crate::{
    schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME, Schema},
    validation::validation_error::ValidationError,
};

use super::{operation::ValidatedOperation, selection_set_validator::SelectionSetValidator};

/// Context for validating an operation.
pub struct OperationValidator<'a> {
    schema: &'a Schema,
    operation_name: Option<String>,
    variables: Option<Map<String, Value>>,
    fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
    query_depth_limit: usize,
}

impl<'a> OperationValidator<'a> {
    #[must_use]
    pub fn new(
        schema: &'a Schema,
        operation_name: Option<String>,
        variables: Option<Map<String, Value>>,
        fragment_definitions: HashMap<Name, Positioned<FragmentDefinition>>,
        query_depth_limit: usize,
    ) -> Self {
        Self {
            schema,
            operation_name,
            variables,
            fragment_definitions,
            query_depth_limit,
        }
    }

    /// Check that a field is not nested too deep. Top-level fields are at depth 0. This applies to
    /// every field (`__typename` included), so with a limit of 5 a leaf may sit at depth 5.
    fn selection_depth_check(
        &self,
    ) -> impl Fn(usize, Pos) -> Result<(), ValidationError> + '_ {
        move |depth: usize, pos: Pos| -> Result<(), ValidationError> {
            if depth > self.query_depth_limit {
                Err(ValidationError::SelectionSetTooDeep {
                    operation_name: self.operation_name.clone().unwrap_or_default(),
                    limit: self.query_depth_limit,
                    pos,
                })
            } else {
                Ok(())
            }
        }
    }

    /// Validate operation. Operation defines a GraphQL top-level operation such
    /// as
    /// ```graphql
    ///    mutation create($name: String!) {
    ///       createName(name: $name) {
    ///          id
    ///       }
    ///    }
    /// ```
    ///
    /// Validations performed:
    /// - The operation type is supported by the schema
    /// - Each variable in [OperationDefinition::variable_definitions] is
    ///   available (see [`Self::validate_variables`] for details)
    /// - The selected fields are valid (see [SelectionSetValidator] for details)
    /// - The selection is no deeper than the depth limit (reported once per operation)
    ///
    /// # Returns
    ///   A validated operation with all variables and fields resolved and normalized.
    pub(super) fn validate(
        self,
        operation: Positioned<OperationDefinition>,
    ) -> Result<ValidatedOperation, Vec<ValidationError>> {
        let (operation_type_name, operation_kind) = match operation.node.ty {
            OperationType::Query => (QUERY_ROOT_TYPENAME, "query"),
            OperationType::Mutation => (MUTATION_ROOT_TYPENAME, "mutation"),
            OperationType::Subscription => {
                return Err(vec![ValidationError::SubscriptionNotSupported(
                    operation.pos,
                )]);
            }
        };

        let container_type = self
            .schema
            .get_type_definition(operation_type_name)
            .ok_or_else(|| {
                vec![ValidationError::OperationNotFound(
                    operation_kind.to_string(),
                    operation.pos,
                )]
            })?;

        let variables = self.validate_variables(&operation.node.variable_definitions)?;
        let selection_set_validator = SelectionSetValidator::new(
            self.schema,
            container_type,
            &variables,
            &self.fragment_definitions,
            vec![],
        );

        let fields = selection_set_validator
            .validate(
                &operation.node.selection_set,
                0,
                &self.selection_depth_check(),
            )
            .map_err(|errors| {
                let mut depth_reported = false;
                errors
                    .into_iter()
                    .filter(|error| match error {
                        ValidationError::SelectionSetTooDeep { .. } => {
                            !std::mem::replace(&mut depth_reported, true)
                        }
                        _ => true,
                    })
                    .collect::<Vec<_>>()
            })?;

        Ok(ValidatedOperation {
            name: self.operation_name,
            typ: operation.node.ty,
            fields,
        })
    }

    /// Validate variables.
    ///
    /// Validations performed:
    /// - Each variable in [OperationDefinition::variable_definitions] is supplied, has a default
    ///   value, or is nullable (in which case it resolves to `null`)
    /// - Each supplied value is valid JSON for a GraphQL value
    ///
    /// The type of each value is checked where the variable is used (see the argument validator).
    ///
    /// # Returns
    ///   Resolved variables (note the output type uses `ConstValue` instead of
    ///   `Value` to indicate that the value has been resolved)
    fn validate_variables(
        &self,
        variable_definitions: &[Positioned<VariableDefinition>],
    ) -> Result<HashMap<Name, ConstValue>, Vec<ValidationError>> {
        let mut resolved = HashMap::new();
        let mut errors = vec![];

        for variable_definition in variable_definitions {
            match self.var_value(variable_definition) {
                Ok(value) => {
                    resolved.insert(variable_definition.node.name.node.clone(), value);
                }
                Err(error) => errors.push(error),
            }
        }

        if errors.is_empty() {
            Ok(resolved)
        } else {
            Err(errors)
        }
    }

    fn var_value(
        &self,
        variable_definition: &Positioned<VariableDefinition>,
    ) -> Result<ConstValue, ValidationError> {
        let name = &variable_definition.node.name;

        let supplied = self
            .variables
            .as_ref()
            .and_then(|variables| variables.get(name.node.as_str()));

        match supplied {
            Some(resolved) => ConstValue::from_json(resolved.to_owned()).map_err(|e| {
                ValidationError::MalformedVariable(name.node.as_str().to_string(), name.pos, e)
            }),
            None => match &variable_definition.node.default_value {
                Some(default_value) => Ok(default_value.node.clone()),
                None if variable_definition.node.var_type.node.nullable => Ok(ConstValue::Null),
                None => Err(ValidationError::VariableNotFound(
                    name.node.as_str().to_string(),
                    name.pos,
                )),
            },
        }
    }
}
