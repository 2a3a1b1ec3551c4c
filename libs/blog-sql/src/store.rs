// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    CreatePost, CreateProfile, CreateUser, DatabaseError, MemberType, MemberTypeId, Post,
    PostFilter, Profile, ProfileFilter, ProfileKey, Subscription, UpdatePost, UpdateProfile,
    UpdateUser, User, UserFilter,
};

/// Persistent storage for the blog model.
///
/// Every call is an independent round trip. Updates and deletes of a missing record fail with
/// [DatabaseError::RecordNotFound]; uniqueness and referential failures surface as
/// [DatabaseError::ConstraintViolation].
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn find_unique_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;
    async fn find_many_users(&self, filter: UserFilter) -> Result<Vec<User>, DatabaseError>;
    async fn create_user(&self, data: CreateUser) -> Result<User, DatabaseError>;
    async fn update_user(&self, id: Uuid, data: UpdateUser) -> Result<User, DatabaseError>;
    /// Removes the user along with its profile, posts, and subscription edges.
    async fn delete_user(&self, id: Uuid) -> Result<User, DatabaseError>;

    /// Adds the edge and returns the subscriber.
    async fn create_subscription(&self, edge: Subscription) -> Result<User, DatabaseError>;
    async fn delete_subscription(&self, edge: Subscription) -> Result<Subscription, DatabaseError>;

    async fn find_unique_profile(&self, key: ProfileKey) -> Result<Option<Profile>, DatabaseError>;
    async fn find_many_profiles(
        &self,
        filter: ProfileFilter,
    ) -> Result<Vec<Profile>, DatabaseError>;
    async fn create_profile(&self, data: CreateProfile) -> Result<Profile, DatabaseError>;
    async fn update_profile(
        &self,
        id: Uuid,
        data: UpdateProfile,
    ) -> Result<Profile, DatabaseError>;
    async fn delete_profile(&self, id: Uuid) -> Result<Profile, DatabaseError>;

    async fn find_unique_post(&self, id: Uuid) -> Result<Option<Post>, DatabaseError>;
    async fn find_many_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DatabaseError>;
    async fn create_post(&self, data: CreatePost) -> Result<Post, DatabaseError>;
    async fn update_post(&self, id: Uuid, data: UpdatePost) -> Result<Post, DatabaseError>;
    async fn delete_post(&self, id: Uuid) -> Result<Post, DatabaseError>;

    async fn find_unique_member_type(
        &self,
        id: MemberTypeId,
    ) -> Result<Option<MemberType>, DatabaseError>;
    async fn find_many_member_types(&self) -> Result<Vec<MemberType>, DatabaseError>;
}
