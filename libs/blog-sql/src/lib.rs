// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Data access for the blog model.
//!
//! [DataStore] is the only way the GraphQL layer reaches persistent state. It exposes, per entity,
//! point lookups, (optionally filtered) fetches, and create/update/delete operations. The
//! PostgreSQL implementation ([PgStore]) issues exactly one statement per call; nothing is cached
//! or batched.

mod database_error;
mod model;
mod sql;
mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use database_error::DatabaseError;
pub use model::{
    CreatePost, CreateProfile, CreateUser, MemberType, MemberTypeId, Post, PostFilter, Profile,
    ProfileFilter, ProfileKey, Subscription, UpdatePost, UpdateProfile, UpdateUser, User,
    UserFilter, default_member_types,
};
pub use sql::database_pool::DatabasePool;
pub use sql::pg_store::PgStore;
pub use store::DataStore;
