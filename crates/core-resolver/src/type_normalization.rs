// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Helpers to build schema definitions in code.
//!
//! Definitions created here carry default positions, since they don't originate from a parsed
//! document.

use async_graphql_parser::{
    Pos, Positioned,
    types::{
        BaseType, EnumType, EnumValueDefinition, FieldDefinition, InputObjectType,
        InputValueDefinition, ObjectType, Type, TypeDefinition, TypeKind,
    },
};
use async_graphql_value::Name;

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

pub fn named_type(name: &str, nullable: bool) -> Type {
    Type {
        base: BaseType::Named(Name::new(name)),
        nullable,
    }
}

pub fn list_type(element_type: Type, nullable: bool) -> Type {
    Type {
        base: BaseType::List(Box::new(element_type)),
        nullable,
    }
}

pub fn input_value(name: &str, ty: Type) -> InputValueDefinition {
    InputValueDefinition {
        description: None,
        name: default_positioned_name(name),
        ty: default_positioned(ty),
        default_value: None,
        directives: vec![],
    }
}

pub fn field_definition(
    name: &str,
    ty: Type,
    arguments: Vec<InputValueDefinition>,
) -> FieldDefinition {
    FieldDefinition {
        description: None,
        name: default_positioned_name(name),
        arguments: arguments.into_iter().map(default_positioned).collect(),
        ty: default_positioned(ty),
        directives: vec![],
    }
}

pub fn object_type_definition(name: &str, fields: Vec<FieldDefinition>) -> TypeDefinition {
    type_definition(
        name,
        TypeKind::Object(ObjectType {
            implements: vec![],
            fields: fields.into_iter().map(default_positioned).collect(),
        }),
    )
}

pub fn input_object_type_definition(
    name: &str,
    fields: Vec<InputValueDefinition>,
) -> TypeDefinition {
    type_definition(
        name,
        TypeKind::InputObject(InputObjectType {
            fields: fields.into_iter().map(default_positioned).collect(),
        }),
    )
}

pub fn enum_type_definition(name: &str, values: &[&str]) -> TypeDefinition {
    type_definition(
        name,
        TypeKind::Enum(EnumType {
            values: values
                .iter()
                .map(|value| {
                    default_positioned(EnumValueDefinition {
                        description: None,
                        value: default_positioned_name(value),
                        directives: vec![],
                    })
                })
                .collect(),
        }),
    )
}

pub fn scalar_type_definition(name: &str, description: Option<&str>) -> TypeDefinition {
    TypeDefinition {
        description: description.map(|d| default_positioned(d.to_string())),
        ..type_definition(name, TypeKind::Scalar)
    }
}

fn type_definition(name: &str, kind: TypeKind) -> TypeDefinition {
    TypeDefinition {
        extend: false,
        description: None,
        name: default_positioned_name(name),
        directives: vec![],
        kind,
    }
}

/// The named type at the bottom of any list wrapping.
pub fn underlying_type(typ: &Type) -> &Name {
    match &typ.base {
        BaseType::Named(name) => name,
        BaseType::List(typ) => underlying_type(typ),
    }
}
