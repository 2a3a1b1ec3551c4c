// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::types::TypeDefinition;
use blog_sql::{CreatePost, Post, PostFilter, UpdatePost};
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
    scalars::{UUID_TYPE, serialize_uuid},
    types::user,
    util::{optional_argument, required_argument},
};

pub(crate) const TYPE_NAME: &str = "Post";

const CREATE_INPUT: &str = "CreatePostInput";
const CHANGE_INPUT: &str = "ChangePostInput";

pub(crate) fn type_definitions() -> Vec<TypeDefinition> {
    vec![
        object_type_definition(
            TYPE_NAME,
            vec![
                field_definition("id", named_type(UUID_TYPE, true), vec![]),
                field_definition("title", named_type("String", true), vec![]),
                field_definition("content", named_type("String", true), vec![]),
                field_definition("authorId", named_type(UUID_TYPE, true), vec![]),
                field_definition("author", named_type(user::TYPE_NAME, true), vec![]),
            ],
        ),
        input_object_type_definition(
            CREATE_INPUT,
            vec![
                input_value("title", named_type("String", false)),
                input_value("content", named_type("String", false)),
                input_value("authorId", named_type(UUID_TYPE, false)),
            ],
        ),
        input_object_type_definition(
            CHANGE_INPUT,
            vec![
                input_value("title", named_type("String", true)),
                input_value("content", named_type("String", true)),
                input_value("authorId", named_type(UUID_TYPE, true)),
            ],
        ),
    ]
}

pub(crate) fn queries() -> Vec<RootField> {
    vec![
        RootField::new(
            "post",
            named_type(TYPE_NAME, true),
            vec![input_value("id", named_type(UUID_TYPE, true))],
            |field, context| Box::pin(post(field, context)),
        ),
        RootField::new(
            "posts",
            list_type(named_type(TYPE_NAME, false), false),
            vec![],
            |field, context| Box::pin(posts(field, context)),
        ),
    ]
}

pub(crate) fn mutations() -> Vec<RootField> {
    vec![
        RootField::new(
            "createPost",
            named_type(TYPE_NAME, true),
            vec![input_value("dto", named_type(CREATE_INPUT, false))],
            |field, context| Box::pin(create_post(field, context)),
        ),
        RootField::new(
            "changePost",
            named_type(TYPE_NAME, true),
            vec![
                input_value("id", named_type(UUID_TYPE, false)),
                input_value("dto", named_type(CHANGE_INPUT, false)),
            ],
            |field, context| Box::pin(change_post(field, context)),
        ),
        RootField::new(
            "deletePost",
            named_type("Boolean", true),
            vec![input_value("id", named_type(UUID_TYPE, true))],
            |field, context| Box::pin(delete_post(field, context)),
        ),
    ]
}

async fn post(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let Some(id) = optional_argument::<Uuid>(field, "id")? else {
        return Ok(FieldValue::Null);
    };

    let post = context.store.find_unique_post(id).await?;
    Ok(FieldValue::optional(post.map(BlogObject::Post)))
}

async fn posts(_field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let posts = context.store.find_many_posts(PostFilter::All).await?;
    Ok(FieldValue::list(posts.into_iter().map(BlogObject::Post)))
}

async fn create_post(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let dto: CreatePost = required_argument(field, "dto")?;

    let post = context.store.create_post(dto).await?;
    Ok(FieldValue::Object(BlogObject::Post(post)))
}

async fn change_post(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    let id: Uuid = required_argument(field, "id")?;
    let dto: UpdatePost = required_argument(field, "dto")?;

    let post = context.store.update_post(id, dto).await?;
    Ok(FieldValue::Object(BlogObject::Post(post)))
}

// Resolves to `null` (the deleted post is not returned)
async fn delete_post(field: &ValidatedField, context: &RequestContext) -> ResolverResult {
    if let Some(id) = optional_argument::<Uuid>(field, "id")? {
        context.store.delete_post(id).await?;
    }

    Ok(FieldValue::Null)
}

pub(crate) async fn resolve_field(
    post: &Post,
    field: &ValidatedField,
    context: &RequestContext,
) -> ResolverResult {
    match field.name.as_str() {
        "id" => Ok(FieldValue::leaf(serialize_uuid(post.id))),
        "title" => Ok(FieldValue::leaf(post.title.as_str())),
        "content" => Ok(FieldValue::leaf(post.content.as_str())),
        "authorId" => Ok(FieldValue::leaf(serialize_uuid(post.author_id))),
        "author" => user_from_post(post, context).await,
        field_name => Err(ResolverError::InvalidField(
            field_name.to_owned(),
            TYPE_NAME,
        )),
    }
}

async fn user_from_post(post: &Post, context: &RequestContext) -> ResolverResult {
    let author = context.store.find_unique_user(post.author_id).await?;
    Ok(FieldValue::optional(author.map(BlogObject::User)))
}
