// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Scalars and enums shared by the entity types.

use async_graphql_parser::types::TypeDefinition;
use async_graphql_value::ConstValue;
use blog_sql::MemberTypeId;
use core_resolver::{schema::CustomScalar, type_normalization::enum_type_definition};
use uuid::Uuid;

pub const UUID_TYPE: &str = "UUID";
pub const VOID_TYPE: &str = "Void";
pub const MEMBER_TYPE_ID_TYPE: &str = "MemberTypeId";

pub fn custom_scalars() -> Vec<CustomScalar> {
    vec![
        CustomScalar {
            name: UUID_TYPE,
            description: Some("A UUID in its canonical (lowercase, hyphenated) form"),
            coerce: coerce_uuid,
        },
        CustomScalar {
            name: VOID_TYPE,
            description: Some("Represents the absence of a value (always null)"),
            coerce: coerce_void,
        },
    ]
}

pub fn member_type_id_definition() -> TypeDefinition {
    let values = MemberTypeId::ALL.map(|id| id.as_str());
    enum_type_definition(MEMBER_TYPE_ID_TYPE, &values)
}

pub fn parse_uuid(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value).map_err(|_| format!("Value is not a valid UUID: {value}"))
}

pub fn serialize_uuid(id: Uuid) -> String {
    id.hyphenated().to_string()
}

fn coerce_uuid(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::String(value) => {
            parse_uuid(value).map(|id| ConstValue::String(serialize_uuid(id)))
        }
        _ => Err(format!("Value is not a valid UUID: {value}")),
    }
}

// Only `null` is a valid `Void`, which never reaches coercion.
fn coerce_void(value: &ConstValue) -> Result<ConstValue, String> {
    Err(format!("Void cannot represent value: {value}"))
}
