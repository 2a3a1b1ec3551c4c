// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, HashSet};

use async_graphql_parser::types::{FieldDefinition, TypeDefinition, TypeKind};
use async_graphql_value::ConstValue;
use thiserror::Error;

use crate::{
    plugin::SubsystemGraphQLResolver,
    type_normalization::{object_type_definition, scalar_type_definition, underlying_type},
};

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Input coercion for a custom scalar: turns a literal (or variable) value into its canonical form.
pub type ScalarCoercion = fn(&ConstValue) -> Result<ConstValue, String>;

/// A scalar beyond the built-in ones, along with its input coercion.
#[derive(Debug, Clone)]
pub struct CustomScalar {
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub coerce: ScalarCoercion,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("Type '{type_name}' referenced by '{referenced_by}' is not defined")]
    UndefinedType {
        type_name: String,
        referenced_by: String,
    },

    #[error("Type '{type_name}' used by '{referenced_by}' is not an input type")]
    NotAnInputType {
        type_name: String,
        referenced_by: String,
    },

    #[error("Type '{type_name}' used by '{referenced_by}' is not an output type")]
    NotAnOutputType {
        type_name: String,
        referenced_by: String,
    },

    #[error("A schema must define at least one query")]
    NoQueries,
}

/// The registry of every type an operation may refer to.
///
/// Types refer to each other by name, so cyclic shapes (a user with posts, each with an author)
/// need no special treatment. References are checked once, when the schema is created.
#[derive(Debug, Clone)]
pub struct Schema {
    pub type_definitions: Vec<TypeDefinition>,
    scalar_coercions: HashMap<String, ScalarCoercion>,
}

impl Schema {
    pub fn new_from_resolver<R: SubsystemGraphQLResolver>(
        subsystem_resolver: &R,
    ) -> Result<Schema, SchemaError> {
        Self::new(
            subsystem_resolver.schema_types(),
            subsystem_resolver.schema_queries(),
            subsystem_resolver.schema_mutations(),
            subsystem_resolver.schema_scalars(),
        )
    }

    pub fn new(
        type_definitions: Vec<TypeDefinition>,
        queries: Vec<FieldDefinition>,
        mutations: Vec<FieldDefinition>,
        custom_scalars: Vec<CustomScalar>,
    ) -> Result<Schema, SchemaError> {
        if queries.is_empty() {
            return Err(SchemaError::NoQueries);
        }

        let mut type_definitions = type_definitions;

        type_definitions.extend(
            BUILTIN_SCALARS
                .iter()
                .map(|name| scalar_type_definition(name, None)),
        );
        type_definitions.extend(
            custom_scalars
                .iter()
                .map(|scalar| scalar_type_definition(scalar.name, scalar.description)),
        );

        type_definitions.push(object_type_definition(QUERY_ROOT_TYPENAME, queries));

        if !mutations.is_empty() {
            type_definitions.push(object_type_definition(MUTATION_ROOT_TYPENAME, mutations));
        }

        let schema = Schema {
            type_definitions,
            scalar_coercions: custom_scalars
                .into_iter()
                .map(|scalar| (scalar.name.to_string(), scalar.coerce))
                .collect(),
        };

        schema.check_references()?;

        Ok(schema)
    }

    /// Ensure every type name is unique and every referenced type is defined and of the right
    /// kind (input positions need scalars, enums, or input objects; output positions need
    /// anything but input objects).
    fn check_references(&self) -> Result<(), SchemaError> {
        let mut declared = HashSet::new();
        for td in &self.type_definitions {
            if !declared.insert(td.name.node.as_str()) {
                return Err(SchemaError::DuplicateType(td.name.node.to_string()));
            }
        }

        let check_input = |type_name: &str, referenced_by: String| match self
            .get_type_definition(type_name)
        {
            None => Err(SchemaError::UndefinedType {
                type_name: type_name.to_string(),
                referenced_by,
            }),
            Some(td) if matches!(td.kind, TypeKind::Object(_)) => Err(SchemaError::NotAnInputType {
                type_name: type_name.to_string(),
                referenced_by,
            }),
            Some(_) => Ok(()),
        };

        for td in &self.type_definitions {
            let type_name = td.name.node.as_str();
            match &td.kind {
                TypeKind::Object(object_type) => {
                    for field in &object_type.fields {
                        let field_name = field.node.name.node.as_str();
                        let field_type_name = underlying_type(&field.node.ty.node).as_str();
                        let referenced_by = format!("{type_name}.{field_name}");

                        match self.get_type_definition(field_type_name) {
                            None => {
                                return Err(SchemaError::UndefinedType {
                                    type_name: field_type_name.to_string(),
                                    referenced_by,
                                });
                            }
                            Some(td) if matches!(td.kind, TypeKind::InputObject(_)) => {
                                return Err(SchemaError::NotAnOutputType {
                                    type_name: field_type_name.to_string(),
                                    referenced_by,
                                });
                            }
                            Some(_) => {}
                        }

                        for argument in &field.node.arguments {
                            check_input(
                                underlying_type(&argument.node.ty.node).as_str(),
                                format!("{referenced_by}({})", argument.node.name.node),
                            )?;
                        }
                    }
                }
                TypeKind::InputObject(input_object_type) => {
                    for field in &input_object_type.fields {
                        check_input(
                            underlying_type(&field.node.ty.node).as_str(),
                            format!("{type_name}.{}", field.node.name.node),
                        )?;
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub fn get_type_definition(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.type_definitions
            .iter()
            .find(|td| td.name.node.as_str() == type_name)
    }

    pub fn get_field_definition(
        &self,
        type_name: &str,
        field_name: &str,
    ) -> Option<&FieldDefinition> {
        match &self.get_type_definition(type_name)?.kind {
            TypeKind::Object(object_type) => object_type
                .fields
                .iter()
                .find(|field| field.node.name.node.as_str() == field_name)
                .map(|field| &field.node),
            _ => None,
        }
    }

    pub fn has_mutations(&self) -> bool {
        self.get_type_definition(MUTATION_ROOT_TYPENAME).is_some()
    }

    /// Scalars and enums are leaf types: they are selected without subfields.
    pub fn is_leaf_type(&self, type_name: &str) -> bool {
        matches!(
            self.get_type_definition(type_name).map(|td| &td.kind),
            Some(TypeKind::Scalar | TypeKind::Enum(_))
        )
    }

    pub fn is_enum_value(&self, enum_name: &str, value: &str) -> bool {
        match self.get_type_definition(enum_name).map(|td| &td.kind) {
            Some(TypeKind::Enum(enum_type)) => enum_type
                .values
                .iter()
                .any(|enum_value| enum_value.node.value.node.as_str() == value),
            _ => false,
        }
    }

    /// Coercion for a custom scalar, `None` for built-in scalars and non-scalar types.
    pub fn scalar_coercion(&self, type_name: &str) -> Option<ScalarCoercion> {
        self.scalar_coercions.get(type_name).copied()
    }
}
