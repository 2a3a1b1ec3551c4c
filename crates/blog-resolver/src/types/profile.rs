// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::TypeDefinition;
use blog_sql::{CreateProfile, Profile, ProfileFilter, ProfileKey, UpdateProfile};
use core_resolver::{
    FieldValue,
    type_normalization::{
        field_definition, input_object_type_definition, input_value, list_type, named_type,
        object_type_definition,
    },
    validation::field::ValidatedField,
};
use uuid::Uuid;

use crate::{
    context::RequestContext,
    object::BlogObject,
    resolver_error::ResolverError,
    root_field::{ResolverResult, RootField},
    scalars::{MEMBER_TYPE_ID_TYPE, UUID_TYPE, serialize_uuid},
    types::{member_type, user},
    util::{optional_argument, required_argument},
};

pub(crate) const TYPE_NAME: &str = "Profile";

const CREATE_INPUT: &str = "CreateProfileInput";
const CHANGE_INPUT: &str = "ChangeProfileInput";

pub(crate) fn type_definitions() -> Vec<TypeDefinition> {
    vec![
        object_type_definition(
            TYPE_NAME,
            vec![
                field_definition("id", named_type(UUID_TYPE, true), vec![]),
                field_definition("isMale", named_type("Boolean", true), vec![]),
                field_definition("yearOfBirth", named_type("Int", true), vec![]),
                field_definition("userId", named_type(UUID_TYPE, true), vec![]),
                field_definition("user", named_type(user::TYPE_NAME, true), vec![]),
                field_definition(
                    "memberTypeId",
                    named_type(MEMBER_TYPE_ID_TYPE, true),
                    vec![],
                ),
                field_definition(
                    "memberType",
                    named_type(member_type::TYPE_NAME, true),
                    vec![],
                ),
            ],
        ),
        input_object_type_definition(
            CREATE_INPUT,
            vec![
                input_value("isMale", named_type("Boolean", false)),
                input_value("yearOfBirth", named_type("Int", false)),
                input_value("userId", named_type(UUID_TYPE, false)),
                input_value("memberTypeId", named_type(MEMBER_TYPE_ID_TYPE, false)),
            ],
        ),
        input_object_type_definition(
            CHANGE_INPUT,
            vec![
                input_value("isMale", named_type("Boolean", true)),
                input_value("yearOfBirth", named_type("Int", true)),
                input_value("memberTypeId", named_type(MEMBER_TYPE_ID_TYPE, true)),
            ],
        ),
    ]
}

pub(crate) fn queries() -> Vec<RootField> {
    vec![
        RootField::new(
            "profile",
            named_type(TYPE_NAME, true),
            vec![input_value("id", named_type(UUID_TYPE, true))],
            |field, context| Box::pin(profile(field, context)),
        ),
        RootField::new(
            "profiles",
            list_type(named_type(TYPE_NAME, false), false),
            vec![],
            |field, context| Box::pin(profiles(field, context)),
        ),
    ]
}

pub(crate) fn mutations() -> Vec<RootField> {
    vec![
        RootField::new(
            "createProfile",
            named_type(TYPE_NAME, true),
            vec![input_value("dto", named_type(CREATE_INPUT, false))],
            |field, context| Box::pin(create_profile(field, context)),
        ),
        RootField::new(
            "changeProfile",
            named_type(TYPE_NAME, true),
            vec![
                input_value("id", named_type(UUID_TYPE, false)),
                input_value("dto", named_type(CHANGE_INPUT, false)),
            ],
            |field, context| Box::pin(change_profile(field, context)),
        ),
        RootField::new(
            "deleteProfile",
            named_type("Boolean", true),
            vec![input_value("id", named_type(UUID_TYPE, true))],
            |field, context| Box::pin(delete_profile(field, context)),
        ),
    ]
}

async fn profile(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let Some(id) = optional_argument::<Uuid>(field, "id")? else {
        return Ok(FieldValue::Null);
    };

    let profile = context
        .store
        .find_unique_profile(ProfileKey::Id(id))
        .await?;
    Ok(FieldValue::optional(profile.map(BlogObject::Profile)))
}

async fn profiles(_field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let profiles = context.store.find_many_profiles(ProfileFilter::All).await?;
    Ok(FieldValue::list(profiles.into_iter().map(BlogObject::Profile)))
}

async fn create_profile(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let dto: CreateProfile = required_argument(field, "dto")?;

    let profile = context.store.create_profile(dto).await?;
    Ok(FieldValue::Object(BlogObject::Profile(profile)))
}

async fn change_profile(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let id: Uuid = required_argument(field, "id")?;
    let dto: UpdateProfile = required_argument(field, "dto")?;

    let profile = context.store.update_profile(id, dto).await?;
    Ok(FieldValue::Object(BlogObject::Profile(profile)))
}

// Resolves to `null` (the deleted profile is not returned)
async fn delete_profile(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    if let Some(id) = optional_argument::<Uuid>(field, "id")? {
        context.store.delete_profile(id).await?;
    }

    Ok(FieldValue::Null)
}

pub(crate) async fn resolve_field(
    profile: &Profile,
    field: &ValidatedField,
    context: &RequestContext,
) -> ResolverResult {
    match field.name.as_str() {
        "id" => Ok(FieldValue::leaf(serialize_uuid(profile.id))),
        "isMale" => Ok(FieldValue::leaf(profile.is_male)),
        "yearOfBirth" => Ok(FieldValue::leaf(profile.year_of_birth)),
        "userId" => Ok(FieldValue::leaf(serialize_uuid(profile.user_id))),
        "user" => user_from_profile(profile, context).await,
        "memberTypeId" => Ok(FieldValue::leaf(profile.member_type_id.as_str())),
        "memberType" => member_type_from_profile(profile, context).await,
        field_name => Err(ResolverError::InvalidField(
            field_name.to_owned(),
            TYPE_NAME,
        )),
    }
}

async fn user_from_profile(profile: &Profile, context: &RequestContext) -> ResolverResult {
    let user = context.store.find_unique_user(profile.user_id).await?;
    Ok(FieldValue::optional(user.map(BlogObject::User)))
}

async fn member_type_from_profile(profile: &Profile, context: &RequestContext) -> ResolverResult {
    let member_type = context
        .store
        .find_unique_member_type(profile.member_type_id)
        .await?;
    Ok(FieldValue::optional(member_type.map(BlogObject::MemberType)))
}
