// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::{FieldDefinition, InputValueDefinition, Type};
use core_resolver::{
    FieldValue, type_normalization::field_definition, validation::field::ValidatedField,
};
use futures::future::BoxFuture;

use crate::{context::RequestContext, object::BlogObject, resolver_error::ResolverError};

pub type ResolverResult = Result<FieldValue<BlogObject>, ResolverError>;

pub type ResolveFuture<'a> = BoxFuture<'a, ResolverResult>;

pub type ResolveFn = for<'a> fn(&'a ValidatedField, &'a RequestContext) -> ResolveFuture<'a>;

/// A `Query` or `Mutation` field along with the function that resolves it.
pub struct RootField {
    pub definition: FieldDefinition,
    pub resolve: ResolveFn,
}

impl RootField {
    pub fn new(
        name: &str,
        ty: Type,
        arguments: Vec<InputValueDefinition>,
        resolve: ResolveFn,
    ) -> Self {
        Self {
            definition: field_definition(name, ty, arguments),
            resolve,
        }
    }

    pub fn name(&self) -> &str {
        self.definition.name.node.as_str()
    }
}
