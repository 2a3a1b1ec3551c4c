// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use serde_json::Value;

use crate::{plugin::SubsystemResolutionError, validation::field::ValidatedField};

/// The value produced for one field, before its selection (if any) is applied.
#[derive(Debug)]
pub enum FieldValue<T> {
    Null,
    /// A scalar or enum value, already in its serialized form
    Leaf(Value),
    /// An object whose selected fields are resolved through its [FieldResolver] implementation
    Object(T),
    List(Vec<FieldValue<T>>),
}

impl<T> FieldValue<T> {
    pub fn leaf(value: impl Into<Value>) -> Self {
        FieldValue::Leaf(value.into())
    }

    pub fn optional_leaf(value: Option<impl Into<Value>>) -> Self {
        value.map(FieldValue::leaf).unwrap_or(FieldValue::Null)
    }

    pub fn optional(value: Option<T>) -> Self {
        value.map(FieldValue::Object).unwrap_or(FieldValue::Null)
    }

    pub fn list(values: impl IntoIterator<Item = T>) -> Self {
        FieldValue::List(values.into_iter().map(FieldValue::Object).collect())
    }
}

#[async_trait]
pub trait FieldResolver<C>
where
    Self: std::fmt::Debug + Send + Sync + Sized,
    C: Send + Sync,
{
    /// The GraphQL type name of this object (the value of `__typename` and the parent type in
    /// error messages)
    fn typename(&self) -> &'static str;

    // {
    //   name: ???
    // }
    // `field` is `name` and ??? is the return value
    async fn resolve_field(
        &self,
        field: &ValidatedField,
        context: &C,
    ) -> Result<FieldValue<Self>, SubsystemResolutionError>;
}
