// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Execution of a validated operation.
//!
//! Fields are resolved one after another in document order. A resolver error becomes a field error
//! and the field resolves to `null`. A `null` in a non-null position (either from a resolver or from
//! a failed field) replaces the nearest nullable ancestor, up to the whole `data` entry.

use async_graphql_parser::types::{BaseType, OperationType, Type};
use async_recursion::async_recursion;
use serde_json::{Map, Value};
use tracing::{error, instrument};

use crate::{
    field_resolver::{FieldResolver, FieldValue},
    plugin::{SubsystemGraphQLResolver, SubsystemResolutionError},
    query_response::{ExecutionResult, FieldError, PathSegment},
    schema::{MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME},
    validation::{field::ValidatedField, operation::ValidatedOperation},
};

/// A `null` that must replace the nearest nullable ancestor
#[derive(Debug)]
struct NullBubble;

#[instrument(
    name = "OperationResolver::resolve_operation",
    skip_all,
    fields(operation_name = ?operation.name)
)]
pub(crate) async fn resolve_operation<R: SubsystemGraphQLResolver>(
    resolver: &R,
    operation: &ValidatedOperation,
    context: &R::Context,
) -> ExecutionResult {
    let root_typename = match operation.typ {
        OperationType::Mutation => MUTATION_ROOT_TYPENAME,
        _ => QUERY_ROOT_TYPENAME,
    };

    let mut errors = vec![];
    let mut data = Map::new();

    for field in &operation.fields {
        let path = [PathSegment::Field(field.output_name())];

        let value = if field.name == "__typename" {
            Ok(Value::String(root_typename.to_string()))
        } else {
            match resolver.resolve(field, operation.typ, context).await {
                Ok(value) => {
                    complete_value(
                        value,
                        field,
                        &field.ty,
                        root_typename,
                        context,
                        &path,
                        &mut errors,
                    )
                    .await
                }
                Err(error) => record_error(error, field, &path, &mut errors),
            }
        };

        match value {
            Ok(value) => {
                data.insert(field.output_name(), value);
            }
            Err(NullBubble) => {
                return ExecutionResult {
                    data: Some(Value::Null),
                    errors,
                };
            }
        }
    }

    ExecutionResult {
        data: Some(Value::Object(data)),
        errors,
    }
}

/// Shape a resolved value according to the field's type and selection
#[async_recursion]
async fn complete_value<T, C>(
    value: FieldValue<T>,
    field: &ValidatedField,
    ty: &Type,
    parent_typename: &str,
    context: &C,
    path: &[PathSegment],
    errors: &mut Vec<FieldError>,
) -> Result<Value, NullBubble>
where
    T: FieldResolver<C> + 'static,
    C: Send + Sync + 'static,
{
    let completed = match value {
        FieldValue::Null | FieldValue::Leaf(Value::Null) => {
            if ty.nullable {
                return Ok(Value::Null);
            }
            errors.push(
                FieldError::new(format!(
                    "Cannot return null for non-nullable field {parent_typename}.{}.",
                    field.name
                ))
                .at(field.pos)
                .with_path(path),
            );
            return Err(NullBubble);
        }
        FieldValue::Leaf(value) => Ok(value),
        FieldValue::Object(object) => resolve_object(&object, &field.subfields, context, path, errors)
            .await
            .map(Value::Object),
        FieldValue::List(items) => {
            // A non-list type here means the resolver returned a list where a single value was
            // expected; treat each item as having the declared type.
            let item_type = match &ty.base {
                BaseType::List(item_type) => item_type.as_ref(),
                BaseType::Named(_) => ty,
            };

            complete_list(
                items,
                field,
                item_type,
                parent_typename,
                context,
                path,
                errors,
            )
            .await
            .map(Value::Array)
        }
    };

    match completed {
        Err(NullBubble) if ty.nullable => Ok(Value::Null),
        completed => completed,
    }
}

async fn complete_list<T, C>(
    items: Vec<FieldValue<T>>,
    field: &ValidatedField,
    item_type: &Type,
    parent_typename: &str,
    context: &C,
    path: &[PathSegment],
    errors: &mut Vec<FieldError>,
) -> Result<Vec<Value>, NullBubble>
where
    T: FieldResolver<C> + 'static,
    C: Send + Sync + 'static,
{
    let mut completed = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let item_path = child_path(path, PathSegment::Index(index));
        completed.push(
            complete_value(
                item,
                field,
                item_type,
                parent_typename,
                context,
                &item_path,
                errors,
            )
            .await?,
        );
    }

    Ok(completed)
}

async fn resolve_object<T, C>(
    object: &T,
    fields: &[ValidatedField],
    context: &C,
    path: &[PathSegment],
    errors: &mut Vec<FieldError>,
) -> Result<Map<String, Value>, NullBubble>
where
    T: FieldResolver<C> + 'static,
    C: Send + Sync + 'static,
{
    let mut resolved = Map::new();

    for field in fields {
        let field_path = child_path(path, PathSegment::Field(field.output_name()));

        let value = if field.name == "__typename" {
            Ok(Value::String(object.typename().to_string()))
        } else {
            match object.resolve_field(field, context).await {
                Ok(value) => {
                    complete_value(
                        value,
                        field,
                        &field.ty,
                        object.typename(),
                        context,
                        &field_path,
                        errors,
                    )
                    .await
                }
                Err(error) => record_error(error, field, &field_path, errors),
            }
        };

        resolved.insert(field.output_name(), value?);
    }

    Ok(resolved)
}

/// Attach the resolver error to the response; internal errors are logged and reported without
/// their details.
fn record_error(
    error: SubsystemResolutionError,
    field: &ValidatedField,
    path: &[PathSegment],
    errors: &mut Vec<FieldError>,
) -> Result<Value, NullBubble> {
    let message = error.user_error_message().unwrap_or_else(|| {
        error!(%error, field = %field.name, "Failed to resolve field");
        "Internal server error".to_string()
    });

    errors.push(FieldError::new(message).at(field.pos).with_path(path));

    if field.ty.nullable {
        Ok(Value::Null)
    } else {
        Err(NullBubble)
    }
}

fn child_path(path: &[PathSegment], segment: PathSegment) -> Vec<PathSegment> {
    let mut child = path.to_vec();
    child.push(segment);
    child
}
