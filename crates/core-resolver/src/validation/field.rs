// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{Pos, types::Type};
use async_graphql_value::{ConstValue, Name, indexmap::IndexMap};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct ValidatedField {
    pub alias: Option<Name>,
    /// The name of the field.
    pub name: Name,
    /// The arguments to the field, empty if no arguments are provided.
    pub arguments: IndexMap<String, ConstValue>,

    /// The subfields being selected in this field, if it is an object. Empty if no fields are
    /// being selected.
    pub subfields: Vec<ValidatedField>,

    /// Where the field appears in the query document.
    pub pos: Pos,
    /// The declared output type of the field.
    pub ty: Type,
}

impl ValidatedField {
    pub fn output_name(&self) -> String {
        self.alias.as_ref().unwrap_or(&self.name).to_string()
    }

    /// The argument's value, treating an explicit `null` the same as an absent argument.
    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments
            .get(name)
            .filter(|value| !matches!(value, ConstValue::Null))
    }

    pub fn argument_as<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<T>, serde_json::Error> {
        self.argument(name)
            .map(|value| {
                value
                    .clone()
                    .into_json()
                    .and_then(serde_json::from_value::<T>)
            })
            .transpose()
    }
}
