// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use blog_sql::{MemberType, Post, Profile, User};
use core_resolver::{
    FieldResolver, FieldValue, plugin::SubsystemResolutionError,
    validation::field::ValidatedField,
};

use crate::{
    context::RequestContext,
    types::{member_type, post, profile, user},
};

/// An entity fetched from the data store, whose selected fields are yet to be resolved.
#[derive(Debug)]
pub enum BlogObject {
    MemberType(MemberType),
    Post(Post),
    Profile(Profile),
    User(User),
}

#[async_trait]
impl FieldResolver<RequestContext> for BlogObject {
    fn typename(&self) -> &'static str {
        match self {
            BlogObject::MemberType(_) => member_type::TYPE_NAME,
            BlogObject::Post(_) => post::TYPE_NAME,
            BlogObject::Profile(_) => profile::TYPE_NAME,
            BlogObject::User(_) => user::TYPE_NAME,
        }
    }

    async fn resolve_field(
        &self,
        field: &ValidatedField,
        context: &RequestContext,
    ) -> Result<FieldValue<Self>, SubsystemResolutionError> {
        let resolved = match self {
            BlogObject::MemberType(member_type) => {
                member_type::resolve_field(member_type, field, context).await
            }
            BlogObject::Post(post) => post::resolve_field(post, field, context).await,
            BlogObject::Profile(profile) => profile::resolve_field(profile, field, context).await,
            BlogObject::User(user) => user::resolve_field(user, field, context).await,
        };

        Ok(resolved?)
    }
}
