// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::TypeDefinition;
use blog_sql::{MemberType, MemberTypeId, ProfileFilter};
use core_resolver::{
    FieldValue,
    type_normalization::{field_definition, input_value, list_type, named_type, object_type_definition},
    validation::field::ValidatedField,
};

use crate::{
    context::RequestContext,
    object::BlogObject,
    resolver_error::ResolverError,
    root_field::{ResolverResult, RootField},
    scalars::MEMBER_TYPE_ID_TYPE,
    types::profile,
    util::optional_argument,
};

pub(crate) const TYPE_NAME: &str = "MemberType";

pub(crate) fn type_definitions() -> Vec<TypeDefinition> {
    vec![object_type_definition(
        TYPE_NAME,
        vec![
            field_definition("id", named_type(MEMBER_TYPE_ID_TYPE, true), vec![]),
            field_definition("discount", named_type("Float", true), vec![]),
            field_definition("postsLimitPerMonth", named_type("Int", true), vec![]),
            field_definition(
                "profiles",
                list_type(named_type(profile::TYPE_NAME, true), true),
                vec![],
            ),
        ],
    )]
}

pub(crate) fn queries() -> Vec<RootField> {
    vec![
        RootField::new(
            "memberType",
            named_type(TYPE_NAME, true),
            vec![input_value("id", named_type(MEMBER_TYPE_ID_TYPE, true))],
            |field, context| Box::pin(member_type(field, context)),
        ),
        RootField::new(
            "memberTypes",
            list_type(named_type(TYPE_NAME, false), false),
            vec![],
            |field, context| Box::pin(member_types(field, context)),
        ),
    ]
}

async fn member_type(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let Some(id) = optional_argument::<MemberTypeId>(field, "id")? else {
        return Ok(FieldValue::Null);
    };

    let member_type = context.store.find_unique_member_type(id).await?;
    Ok(FieldValue::optional(member_type.map(BlogObject::MemberType)))
}

async fn member_types(_field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let member_types = context.store.find_many_member_types().await?;
    Ok(FieldValue::list(
        member_types.into_iter().map(BlogObject::MemberType),
    ))
}

pub(crate) async fn resolve_field(
    member_type: &MemberType,
    field: &ValidatedField,
    context: &RequestContext,
) -> ResolverResult {
    match field.name.as_str() {
        "id" => Ok(FieldValue::leaf(member_type.id.as_str())),
        "discount" => Ok(FieldValue::leaf(member_type.discount)),
        "postsLimitPerMonth" => Ok(FieldValue::leaf(member_type.posts_limit_per_month)),
        "profiles" => profiles_from_member_type(member_type, context).await,
        field_name => Err(ResolverError::InvalidField(
            field_name.to_owned(),
            TYPE_NAME,
        )),
    }
}

async fn profiles_from_member_type(
    member_type: &MemberType,
    context: &RequestContext,
) -> ResolverResult {
    let profiles = context
        .store
        .find_many_profiles(ProfileFilter::MemberType(member_type.id))
        .await?;
    Ok(FieldValue::list(profiles.into_iter().map(BlogObject::Profile)))
}
