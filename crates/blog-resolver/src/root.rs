// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The `Query` and `Mutation` roots, composed from the root fields of each entity type.

use crate::{
    root_field::RootField,
    types::{member_type, post, profile, user},
};

pub(crate) fn query_fields() -> Vec<RootField> {
    [
        member_type::queries(),
        post::queries(),
        profile::queries(),
        user::queries(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

pub(crate) fn mutation_fields() -> Vec<RootField> {
    [user::mutations(), profile::mutations(), post::mutations()]
        .into_iter()
        .flatten()
        .collect()
}
