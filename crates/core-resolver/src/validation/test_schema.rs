// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A small concert/venue schema for validation tests.

use async_graphql_parser::{parse_query, types::ExecutableDocument};
use async_graphql_value::ConstValue;

use crate::{
    schema::{CustomScalar, Schema},
    type_normalization::{
        enum_type_definition, field_definition, input_object_type_definition, input_value,
        list_type, named_type, object_type_definition,
    },
};

/// Accepts four-digit strings.
fn coerce_code(value: &ConstValue) -> Result<ConstValue, String> {
    match value {
        ConstValue::String(code) if code.len() == 4 && code.chars().all(|c| c.is_ascii_digit()) => {
            Ok(value.clone())
        }
        _ => Err("invalid code".to_string()),
    }
}

pub(crate) fn create_test_schema(with_mutations: bool) -> Schema {
    let types = vec![
        enum_type_definition("Genre", &["rock", "jazz"]),
        object_type_definition(
            "Concert",
            vec![
                field_definition("id", named_type("Int", false), vec![]),
                field_definition("title", named_type("String", true), vec![]),
                field_definition("genre", named_type("Genre", true), vec![]),
                field_definition("code", named_type("Code", true), vec![]),
                field_definition("venue", named_type("Venue", true), vec![]),
            ],
        ),
        object_type_definition(
            "Venue",
            vec![
                field_definition("id", named_type("Int", false), vec![]),
                field_definition("name", named_type("String", true), vec![]),
                field_definition("published", named_type("Boolean", true), vec![]),
                field_definition(
                    "concerts",
                    list_type(named_type("Concert", false), false),
                    vec![],
                ),
            ],
        ),
        input_object_type_definition(
            "ConcertInput",
            vec![
                input_value("title", named_type("String", false)),
                input_value("genre", named_type("Genre", true)),
                input_value("venueId", named_type("Int", true)),
            ],
        ),
    ];

    let queries = vec![
        field_definition(
            "concert",
            named_type("Concert", true),
            vec![input_value("id", named_type("Int", false))],
        ),
        field_definition(
            "concerts",
            list_type(named_type("Concert", false), false),
            vec![input_value("genre", named_type("Genre", true))],
        ),
        field_definition(
            "concertByCode",
            named_type("Concert", true),
            vec![input_value("code", named_type("Code", false))],
        ),
        field_definition(
            "venue",
            named_type("Venue", true),
            vec![input_value("id", named_type("Int", false))],
        ),
    ];

    let mutations = if with_mutations {
        vec![
            field_definition(
                "createConcert",
                named_type("Concert", true),
                vec![input_value("data", named_type("ConcertInput", false))],
            ),
            field_definition(
                "createConcerts",
                list_type(named_type("Concert", false), false),
                vec![input_value(
                    "data",
                    list_type(named_type("ConcertInput", false), false),
                )],
            ),
        ]
    } else {
        vec![]
    };

    Schema::new(
        types,
        queries,
        mutations,
        vec![CustomScalar {
            name: "Code",
            description: None,
            coerce: coerce_code,
        }],
    )
    .unwrap()
}

pub(crate) fn create_query_document(query_str: &str) -> ExecutableDocument {
    parse_query(query_str).unwrap()
}
