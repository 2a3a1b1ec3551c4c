// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::types::{FieldDefinition, OperationType, TypeDefinition};
use async_trait::async_trait;
use blog_sql::DataStore;
use core_resolver::{
    FieldValue,
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    schema::CustomScalar,
    validation::field::ValidatedField,
};
use tracing::instrument;

use crate::{
    context::RequestContext,
    object::BlogObject,
    resolver_error::ResolverError,
    root,
    root_field::RootField,
    scalars,
    types::{member_type, post, profile, user},
};

/// Resolves the blog schema against a [DataStore].
pub struct BlogSubsystemResolver {
    pub id: &'static str,
    queries: Vec<RootField>,
    mutations: Vec<RootField>,
    store: Arc<dyn DataStore>,
}

impl BlogSubsystemResolver {
    /// Without mutations, the schema has no `Mutation` type, so mutation operations fail
    /// validation.
    pub fn new(store: Arc<dyn DataStore>, mutations_enabled: bool) -> Self {
        Self {
            id: "blog",
            queries: root::query_fields(),
            mutations: if mutations_enabled {
                root::mutation_fields()
            } else {
                vec![]
            },
            store,
        }
    }
}

#[async_trait]
impl SubsystemGraphQLResolver for BlogSubsystemResolver {
    type Object = BlogObject;
    type Context = RequestContext;

    fn id(&self) -> &'static str {
        self.id
    }

    fn create_request_context(&self) -> RequestContext {
        RequestContext::new(self.store.clone())
    }

    #[instrument(
        name = "BlogSubsystemResolver::resolve",
        skip_all,
        fields(field = %operation.name)
    )]
    async fn resolve(
        &self,
        operation: &ValidatedField,
        operation_type: OperationType,
        context: &RequestContext,
    ) -> Result<FieldValue<BlogObject>, SubsystemResolutionError> {
        let (root_fields, container_type) = match operation_type {
            OperationType::Query => (&self.queries, "Query"),
            OperationType::Mutation => (&self.mutations, "Mutation"),
            OperationType::Subscription => {
                return Err(ResolverError::SubscriptionNotSupported.into());
            }
        };

        let root_field = root_fields
            .iter()
            .find(|root_field| root_field.name() == operation.name.as_str())
            .ok_or_else(|| {
                SubsystemResolutionError::InvalidField(operation.name.to_string(), container_type)
            })?;

        Ok((root_field.resolve)(operation, context).await?)
    }

    fn schema_queries(&self) -> Vec<FieldDefinition> {
        self.queries
            .iter()
            .map(|root_field| root_field.definition.clone())
            .collect()
    }

    fn schema_mutations(&self) -> Vec<FieldDefinition> {
        self.mutations
            .iter()
            .map(|root_field| root_field.definition.clone())
            .collect()
    }

    fn schema_types(&self) -> Vec<TypeDefinition> {
        let mut types = vec![scalars::member_type_id_definition()];

        types.extend(member_type::type_definitions());
        types.extend(post::type_definitions());
        types.extend(profile::type_definitions());
        types.extend(user::type_definitions());

        types
    }

    fn schema_scalars(&self) -> Vec<CustomScalar> {
        scalars::custom_scalars()
    }
}
