// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::TypeDefinition;
use blog_sql::{
    CreateUser, PostFilter, ProfileKey, Subscription, UpdateUser, User, UserFilter,
};
use core_resolver::{
    FieldValue,
    type_normalization::{
        field_definition, input_object_type_definition, input_value, list_type, named_type,
        object_type_definition,
    },
    validation::field::ValidatedField,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    context::RequestContext,
    object::BlogObject,
    resolver_error::ResolverError,
    root_field::{ResolverResult, RootField},
    scalars::{UUID_TYPE, VOID_TYPE, serialize_uuid},
    types::{post, profile},
    util::{optional_argument, required_argument},
};

pub(crate) const TYPE_NAME: &str = "User";

const CREATE_INPUT: &str = "CreateUserInput";
const CHANGE_INPUT: &str = "ChangeUserInput";

pub(crate) fn type_definitions() -> Vec<TypeDefinition> {
    vec![
        object_type_definition(
            TYPE_NAME,
            vec![
                field_definition("id", named_type(UUID_TYPE, true), vec![]),
                field_definition("name", named_type("String", true), vec![]),
                field_definition("balance", named_type("Float", true), vec![]),
                field_definition("profile", named_type(profile::TYPE_NAME, true), vec![]),
                field_definition(
                    "posts",
                    list_type(named_type(post::TYPE_NAME, true), true),
                    vec![],
                ),
                field_definition(
                    "subscribedToUser",
                    list_type(named_type(TYPE_NAME, false), false),
                    vec![],
                ),
                field_definition(
                    "userSubscribedTo",
                    list_type(named_type(TYPE_NAME, false), false),
                    vec![],
                ),
            ],
        ),
        input_object_type_definition(
            CREATE_INPUT,
            vec![
                input_value("name", named_type("String", false)),
                input_value("balance", named_type("Float", false)),
            ],
        ),
        input_object_type_definition(
            CHANGE_INPUT,
            vec![
                input_value("name", named_type("String", true)),
                input_value("balance", named_type("Float", true)),
            ],
        ),
    ]
}

pub(crate) fn queries() -> Vec<RootField> {
    vec![
        RootField::new(
            "user",
            named_type(TYPE_NAME, true),
            vec![input_value("id", named_type(UUID_TYPE, true))],
            |field, context| Box::pin(user(field, context)),
        ),
        RootField::new(
            "users",
            list_type(named_type(TYPE_NAME, false), false),
            vec![],
            |field, context| Box::pin(users(field, context)),
        ),
    ]
}

pub(crate) fn mutations() -> Vec<RootField> {
    let edge_arguments = || {
        vec![
            input_value("userId", named_type(UUID_TYPE, false)),
            input_value("authorId", named_type(UUID_TYPE, false)),
        ]
    };

    vec![
        RootField::new(
            "createUser",
            named_type(TYPE_NAME, true),
            vec![input_value("dto", named_type(CREATE_INPUT, false))],
            |field, context| Box::pin(create_user(field, context)),
        ),
        RootField::new(
            "changeUser",
            named_type(TYPE_NAME, true),
            vec![
                input_value("id", named_type(UUID_TYPE, false)),
                input_value("dto", named_type(CHANGE_INPUT, false)),
            ],
            |field, context| Box::pin(change_user(field, context)),
        ),
        RootField::new(
            "deleteUser",
            named_type("Boolean", true),
            vec![input_value("id", named_type(UUID_TYPE, true))],
            |field, context| Box::pin(delete_user(field, context)),
        ),
        RootField::new(
            "subscribeTo",
            named_type(TYPE_NAME, true),
            edge_arguments(),
            |field, context| Box::pin(subscribe_to(field, context)),
        ),
        RootField::new(
            "unsubscribeFrom",
            named_type(VOID_TYPE, true),
            edge_arguments(),
            |field, context| Box::pin(unsubscribe_from(field, context)),
        ),
    ]
}

async fn user(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let Some(id) = optional_argument::<Uuid>(field, "id")? else {
        return Ok(FieldValue::Null);
    };

    let user = context.store.find_unique_user(id).await?;
    Ok(FieldValue::optional(user.map(BlogObject::User)))
}

async fn users(_field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let users = context.store.find_many_users(UserFilter::All).await?;
    Ok(FieldValue::list(users.into_iter().map(BlogObject::User)))
}

async fn create_user(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let dto: CreateUser = required_argument(field, "dto")?;

    let user = context.store.create_user(dto).await?;
    Ok(FieldValue::Object(BlogObject::User(user)))
}

async fn change_user(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let id: Uuid = required_argument(field, "id")?;
    let dto: UpdateUser = required_argument(field, "dto")?;

    let user = context.store.update_user(id, dto).await?;
    Ok(FieldValue::Object(BlogObject::User(user)))
}

async fn delete_user(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    if let Some(id) = optional_argument::<Uuid>(field, "id")? {
        let deleted = context.store.delete_user(id).await?;
        debug!(user_id = %deleted.id, "Deleted user");
    }

    Ok(FieldValue::Null)
}

fn subscription_edge(field: &ValidatedField) -> Result<Subscription, ResolverError> {
    Ok(Subscription {
        subscriber_id: required_argument(field, "userId")?,
        author_id: required_argument(field, "authorId")?,
    })
}

/// Resolves to the subscriber
async fn subscribe_to(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let edge = subscription_edge(field)?;

    let subscriber = context.store.create_subscription(edge).await?;
    Ok(FieldValue::Object(BlogObject::User(subscriber)))
}

/// Resolves to `null` (as a `Void`). A missing edge is an error.
async fn unsubscribe_from(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let edge = subscription_edge(field)?;

    context.store.delete_subscription(edge).await?;
    Ok(FieldValue::Null)
}

pub(crate) async fn resolve_field(
    user: &User,
    field: &ValidatedField,
    context: &RequestContext,
) -> ResolverResult {
    match field.name.as_str() {
        "id" => Ok(FieldValue::leaf(serialize_uuid(user.id))),
        "name" => Ok(FieldValue::leaf(user.name.as_str())),
        "balance" => Ok(FieldValue::leaf(user.balance)),
        "profile" => profile_from_parent(user, context).await,
        "posts" => posts_from_parent(user, context).await,
        "subscribedToUser" => subscribers(user, context).await,
        "userSubscribedTo" => subscriptions(user, context).await,
        field_name => Err(ResolverError::InvalidField(
            field_name.to_owned(),
            TYPE_NAME,
        )),
    }
}

async fn profile_from_parent(user: &User, context: &RequestContext) -> ResolverResult {
    let profile = context
        .store
        .find_unique_profile(ProfileKey::UserId(user.id))
        .await?;
    Ok(FieldValue::optional(profile.map(BlogObject::Profile)))
}

async fn posts_from_parent(user: &User, context: &RequestContext) -> ResolverResult {
    let posts = context
        .store
        .find_many_posts(PostFilter::Author(user.id))
        .await?;
    Ok(FieldValue::list(posts.into_iter().map(BlogObject::Post)))
}

/// Users subscribed to this user
async fn subscribers(user: &User, context: &RequestContext) -> ResolverResult {
    let subscribers = context
        .store
        .find_many_users(UserFilter::SubscribersOf(user.id))
        .await?;
    Ok(FieldValue::list(subscribers.into_iter().map(BlogObject::User)))
}

/// Users this user is subscribed to
async fn subscriptions(user: &User, context: &RequestContext) -> ResolverResult {
    let authors = context
        .store
        .find_many_users(UserFilter::SubscriptionsOf(user.id))
        .await?;
    Ok(FieldValue::list(authors.into_iter().map(BlogObject::User)))
}
