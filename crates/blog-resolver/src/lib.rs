// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! GraphQL resolvers for the blog model: users, their profiles and posts, member types, and
//! subscriptions between users.
//!
//! Every field is resolved by a direct call to the [blog_sql::DataStore] in the request context.

mod context;
mod object;
mod resolver_error;
mod root;
mod root_field;
mod scalars;
mod types;
mod util;

pub mod plugin;

pub use context::RequestContext;
pub use object::BlogObject;
pub use plugin::BlogSubsystemResolver;
pub use resolver_error::ResolverError;
pub use scalars::{parse_uuid, serialize_uuid};

use core_resolver::{schema::SchemaError, system_resolver::GraphQLSystemResolver};

pub type BlogSystemResolver = GraphQLSystemResolver<BlogSubsystemResolver>;

/// Assemble the schema (with or without mutations) over the given store.
pub fn create_system_resolver(
    store: std::sync::Arc<dyn blog_sql::DataStore>,
    mutations_enabled: bool,
    query_depth_limit: usize,
) -> Result<BlogSystemResolver, SchemaError> {
    GraphQLSystemResolver::new(
        BlogSubsystemResolver::new(store, mutations_enabled),
        query_depth_limit,
    )
}
