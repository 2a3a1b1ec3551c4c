// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Entity types: their GraphQL shape, root fields, and field resolvers.
//!
//! Relational fields issue one data store call per parent object; nothing is batched or cached.

pub(crate) mod member_type;
pub(crate) mod post;
pub(crate) mod profile;
pub(crate) mod user;
