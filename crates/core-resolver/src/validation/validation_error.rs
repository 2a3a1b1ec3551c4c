// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::Pos;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    QueryParsingFailed(String, Pos, Option<Pos>),

    #[error("Variable '{0}' not found")]
    VariableNotFound(String, Pos),

    #[error("Variable '{0}' could not be deserialized: {2}")]
    MalformedVariable(String, Pos, serde_json::Error),

    #[error("Fragment definition '{0}' not found")]
    FragmentDefinitionNotFound(String, Pos),

    #[error("Cannot spread fragment '{0}' within itself")]
    FragmentCycle(String, Pos),

    #[error("Fragment on '{0}' cannot be spread within type '{1}'")]
    FragmentTypeMismatch(String, String, Pos),

    #[error("Schema is not configured to execute {0} operation")]
    OperationNotFound(String, Pos),

    #[error("Subscription operations are not supported")]
    SubscriptionNotSupported(Pos),

    #[error("Field '{0}' is not valid for type '{1}'")]
    InvalidField(String, String, Pos),

    #[error("Field '{0}' is of a scalar type, which should not specify fields")]
    ScalarWithField(String, Pos),

    #[error("Field '{0}' of type '{1}' must have a selection of subfields")]
    ObjectWithoutSubfields(String, String, Pos),

    #[error("Field type '{0}' is not valid")]
    InvalidFieldType(String, Pos),

    #[error("Fields '{0}' conflict because they select different fields or arguments")]
    FieldMergeConflict(String, Pos),

    #[error("Required argument '{0}' not found")]
    RequiredArgumentNotFound(String, Pos),

    #[error("Argument(s) '{0:?}' invalid for '{1}'")]
    StrayArguments(Vec<String>, String, Pos),

    #[error(
        "Argument '{argument_name}' is not of a valid type. Expected '{expected_type}', got '{actual_type}'"
    )]
    InvalidArgumentType {
        argument_name: String,
        expected_type: String,
        actual_type: String,
        pos: Pos,
    },

    #[error("Argument '{argument_name}' is not a valid '{type_name}': {message}")]
    InvalidScalarValue {
        argument_name: String,
        type_name: String,
        message: String,
        pos: Pos,
    },

    #[error("Value '{value}' does not exist in '{enum_name}' enum")]
    InvalidEnumValue {
        value: String,
        enum_name: String,
        pos: Pos,
    },

    #[error("Int cannot represent non 32-bit signed integer value: {value}")]
    IntOutOfRange { value: String, pos: Pos },

    #[error("'{operation_name}' exceeds maximum operation depth of {limit}")]
    SelectionSetTooDeep {
        operation_name: String,
        limit: usize,
        pos: Pos,
    },

    #[error("No operation found")]
    NoOperationFound,

    #[error("Must provide operation name if query contains multiple operations")]
    MultipleOperationsNoOperationName,

    #[error("operationName '{0}' doesn't match any operation")]
    MultipleOperationsUnmatchedOperationName(String),
}

impl ValidationError {
    pub fn position1(&self) -> Option<Pos> {
        match self {
            ValidationError::QueryParsingFailed(_, pos, _)
            | ValidationError::VariableNotFound(_, pos)
            | ValidationError::MalformedVariable(_, pos, _)
            | ValidationError::FragmentDefinitionNotFound(_, pos)
            | ValidationError::FragmentCycle(_, pos)
            | ValidationError::FragmentTypeMismatch(_, _, pos)
            | ValidationError::OperationNotFound(_, pos)
            | ValidationError::SubscriptionNotSupported(pos)
            | ValidationError::InvalidField(_, _, pos)
            | ValidationError::ScalarWithField(_, pos)
            | ValidationError::ObjectWithoutSubfields(_, _, pos)
            | ValidationError::InvalidFieldType(_, pos)
            | ValidationError::FieldMergeConflict(_, pos)
            | ValidationError::RequiredArgumentNotFound(_, pos)
            | ValidationError::StrayArguments(_, _, pos)
            | ValidationError::InvalidArgumentType { pos, .. }
            | ValidationError::InvalidScalarValue { pos, .. }
            | ValidationError::InvalidEnumValue { pos, .. }
            | ValidationError::IntOutOfRange { pos, .. }
            | ValidationError::SelectionSetTooDeep { pos, .. } => Some(*pos),
            ValidationError::NoOperationFound
            | ValidationError::MultipleOperationsNoOperationName
            | ValidationError::MultipleOperationsUnmatchedOperationName(_) => None,
        }
    }

    pub fn position2(&self) -> Option<Pos> {
        match self {
            ValidationError::QueryParsingFailed(_, _, pos) => *pos,
            _ => None,
        }
    }
}
