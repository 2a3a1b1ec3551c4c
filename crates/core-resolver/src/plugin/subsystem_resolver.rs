// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use thiserror::Error;

use crate::{
    field_resolver::{FieldResolver, FieldValue},
    schema::CustomScalar,
    validation::field::ValidatedField,
};

/// Provides the schema and the resolution of root fields for a subsystem.
///
/// Root fields produce a [FieldValue] of the subsystem's object type. Selections on those objects
/// are resolved through their [FieldResolver] implementation, so a subsystem only deals with one
/// field at a time.
#[async_trait]
pub trait SubsystemGraphQLResolver: Sync {
    /// Object values produced by this subsystem
    type Object: FieldResolver<Self::Context> + 'static;
    /// Per-request state passed to every resolver invocation
    type Context: Send + Sync + 'static;

    /// The id of the subsystem (for debugging purposes)
    fn id(&self) -> &'static str;

    /// Create the context for one request
    fn create_request_context(&self) -> Self::Context;

    /// Resolve a root (query or mutation) field
    async fn resolve(
        &self,
        operation: &ValidatedField,
        operation_type: OperationType,
        context: &Self::Context,
    ) -> Result<FieldValue<Self::Object>, SubsystemResolutionError>;

    // Support for schema creation (and in turn, validation)

    /// Queries supported by this subsystem
    fn schema_queries(&self) -> Vec<FieldDefinition>;

    /// Mutations supported by this subsystem (an empty list leaves the schema without a
    /// `Mutation` type)
    fn schema_mutations(&self) -> Vec<FieldDefinition>;

    /// Object, input object and enum types referred to by queries and mutations
    fn schema_types(&self) -> Vec<TypeDefinition>;

    /// Scalars beyond the built-in ones
    fn schema_scalars(&self) -> Vec<CustomScalar> {
        vec![]
    }
}

#[derive(Error, Debug)]
pub enum SubsystemResolutionError {
    #[error("Invalid field {0} for {1}")]
    InvalidField(String, &'static str), // (field name, container type)

    #[error("{0}")]
    UserDisplayError(String), // Error message to be displayed to the user (subsystems should hide internal errors through this)

    #[error("{0}")]
    Delegate(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SubsystemResolutionError {
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            SubsystemResolutionError::InvalidField(field_name, container_type) => {
                Some(format!("Invalid field {field_name} for {container_type}"))
            }
            SubsystemResolutionError::UserDisplayError(message) => Some(message.to_string()),
            SubsystemResolutionError::Delegate(_) => None,
        }
    }
}
