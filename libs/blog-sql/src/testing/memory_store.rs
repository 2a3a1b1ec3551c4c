// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{
    Mutex, MutexGuard,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    CreatePost, CreateProfile, CreateUser, DataStore, DatabaseError, MemberType, MemberTypeId,
    Post, PostFilter, Profile, ProfileFilter, ProfileKey, Subscription, UpdatePost, UpdateProfile,
    UpdateUser, User, UserFilter, default_member_types,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    posts: Vec<Post>,
    member_types: Vec<MemberType>,
    subscriptions: Vec<Subscription>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|user| user.id == id)
    }

    fn check_user_exists(&self, id: Uuid, relation: &str) -> Result<(), DatabaseError> {
        if self.user_exists(id) {
            Ok(())
        } else {
            Err(DatabaseError::ConstraintViolation(format!(
                "Foreign key constraint failed on the field: {relation}"
            )))
        }
    }
}

/// Store holding rows in memory, enforcing the same constraints as the PostgreSQL schema.
///
/// Every [DataStore] call counts as one round trip, which lets tests assert on access patterns.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store with the member types seeded.
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables {
                member_types: default_member_types(),
                ..Default::default()
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_call_count(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn find_unique_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let tables = self.tables();
        Ok(tables.users.iter().find(|user| user.id == id).cloned())
    }

    async fn find_many_users(&self, filter: UserFilter) -> Result<Vec<User>, DatabaseError> {
        let tables = self.tables();
        let matches = |user: &User| match filter {
            UserFilter::All => true,
            UserFilter::SubscribersOf(author_id) => tables
                .subscriptions
                .contains(&Subscription {
                    subscriber_id: user.id,
                    author_id,
                }),
            UserFilter::SubscriptionsOf(subscriber_id) => tables
                .subscriptions
                .contains(&Subscription {
                    subscriber_id,
                    author_id: user.id,
                }),
        };
        Ok(tables
            .users
            .iter()
            .filter(|user| matches(user))
            .cloned()
            .collect())
    }

    async fn create_user(&self, data: CreateUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables();
        let user = User {
            id: Uuid::new_v4(),
            name: data.name,
            balance: data.balance,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, data: UpdateUser) -> Result<User, DatabaseError> {
        let mut tables = self.tables();
        let user = tables
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(DatabaseError::not_found("user"))?;

        if let Some(name) = data.name {
            user.name = name;
        }
        if let Some(balance) = data.balance {
            user.balance = balance;
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, DatabaseError> {
        let mut tables = self.tables();
        let index = tables
            .users
            .iter()
            .position(|user| user.id == id)
            .ok_or(DatabaseError::not_found("user"))?;
        let user = tables.users.remove(index);

        tables.profiles.retain(|profile| profile.user_id != id);
        tables.posts.retain(|post| post.author_id != id);
        tables
            .subscriptions
            .retain(|edge| edge.subscriber_id != id && edge.author_id != id);

        Ok(user)
    }

    async fn create_subscription(&self, edge: Subscription) -> Result<User, DatabaseError> {
        let mut tables = self.tables();
        tables.check_user_exists(edge.subscriber_id, "subscriberId")?;
        tables.check_user_exists(edge.author_id, "authorId")?;
        if tables.subscriptions.contains(&edge) {
            return Err(DatabaseError::ConstraintViolation(
                "Unique constraint failed on the fields: (subscriberId, authorId)".into(),
            ));
        }
        tables.subscriptions.push(edge);

        tables
            .users
            .iter()
            .find(|user| user.id == edge.subscriber_id)
            .cloned()
            .ok_or(DatabaseError::not_found("user"))
    }

    async fn delete_subscription(&self, edge: Subscription) -> Result<Subscription, DatabaseError> {
        let mut tables = self.tables();
        let index = tables
            .subscriptions
            .iter()
            .position(|existing| *existing == edge)
            .ok_or(DatabaseError::not_found("subscription"))?;
        Ok(tables.subscriptions.remove(index))
    }

    async fn find_unique_profile(&self, key: ProfileKey) -> Result<Option<Profile>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .profiles
            .iter()
            .find(|profile| match key {
                ProfileKey::Id(id) => profile.id == id,
                ProfileKey::UserId(user_id) => profile.user_id == user_id,
            })
            .cloned())
    }

    async fn find_many_profiles(
        &self,
        filter: ProfileFilter,
    ) -> Result<Vec<Profile>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .profiles
            .iter()
            .filter(|profile| match filter {
                ProfileFilter::All => true,
                ProfileFilter::MemberType(member_type_id) => {
                    profile.member_type_id == member_type_id
                }
            })
            .cloned()
            .collect())
    }

    async fn create_profile(&self, data: CreateProfile) -> Result<Profile, DatabaseError> {
        let mut tables = self.tables();
        tables.check_user_exists(data.user_id, "userId")?;
        if tables
            .profiles
            .iter()
            .any(|profile| profile.user_id == data.user_id)
        {
            return Err(DatabaseError::ConstraintViolation(
                "Unique constraint failed on the fields: (userId)".into(),
            ));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            is_male: data.is_male,
            year_of_birth: data.year_of_birth,
            user_id: data.user_id,
            member_type_id: data.member_type_id,
        };
        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        data: UpdateProfile,
    ) -> Result<Profile, DatabaseError> {
        let mut tables = self.tables();
        let profile = tables
            .profiles
            .iter_mut()
            .find(|profile| profile.id == id)
            .ok_or(DatabaseError::not_found("profile"))?;

        if let Some(is_male) = data.is_male {
            profile.is_male = is_male;
        }
        if let Some(year_of_birth) = data.year_of_birth {
            profile.year_of_birth = year_of_birth;
        }
        if let Some(member_type_id) = data.member_type_id {
            profile.member_type_id = member_type_id;
        }
        Ok(profile.clone())
    }

    async fn delete_profile(&self, id: Uuid) -> Result<Profile, DatabaseError> {
        let mut tables = self.tables();
        let index = tables
            .profiles
            .iter()
            .position(|profile| profile.id == id)
            .ok_or(DatabaseError::not_found("profile"))?;
        Ok(tables.profiles.remove(index))
    }

    async fn find_unique_post(&self, id: Uuid) -> Result<Option<Post>, DatabaseError> {
        let tables = self.tables();
        Ok(tables.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn find_many_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .posts
            .iter()
            .filter(|post| match filter {
                PostFilter::All => true,
                PostFilter::Author(author_id) => post.author_id == author_id,
            })
            .cloned()
            .collect())
    }

    async fn create_post(&self, data: CreatePost) -> Result<Post, DatabaseError> {
        let mut tables = self.tables();
        tables.check_user_exists(data.author_id, "authorId")?;

        let post = Post {
            id: Uuid::new_v4(),
            title: data.title,
            content: data.content,
            author_id: data.author_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: Uuid, data: UpdatePost) -> Result<Post, DatabaseError> {
        let mut tables = self.tables();
        if let Some(author_id) = data.author_id {
            tables.check_user_exists(author_id, "authorId")?;
        }
        let post = tables
            .posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(DatabaseError::not_found("post"))?;

        if let Some(title) = data.title {
            post.title = title;
        }
        if let Some(content) = data.content {
            post.content = content;
        }
        if let Some(author_id) = data.author_id {
            post.author_id = author_id;
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<Post, DatabaseError> {
        let mut tables = self.tables();
        let index = tables
            .posts
            .iter()
            .position(|post| post.id == id)
            .ok_or(DatabaseError::not_found("post"))?;
        Ok(tables.posts.remove(index))
    }

    async fn find_unique_member_type(
        &self,
        id: MemberTypeId,
    ) -> Result<Option<MemberType>, DatabaseError> {
        let tables = self.tables();
        Ok(tables
            .member_types
            .iter()
            .find(|member_type| member_type.id == id)
            .cloned())
    }

    async fn find_many_member_types(&self) -> Result<Vec<MemberType>, DatabaseError> {
        let tables = self.tables();
        Ok(tables.member_types.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn user(store: &MemoryStore, name: &str) -> User {
        store
            .create_user(CreateUser {
                name: name.to_string(),
                balance: 10.0,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn seeded_member_types() {
        let store = MemoryStore::new();

        let member_types = store.find_many_member_types().await.unwrap();
        assert_eq!(member_types, default_member_types());
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn profile_constraints() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;

        let create = |user_id| CreateProfile {
            is_male: false,
            year_of_birth: 1990,
            user_id,
            member_type_id: MemberTypeId::Basic,
        };

        store.create_profile(create(alice.id)).await.unwrap();
        assert!(matches!(
            store.create_profile(create(alice.id)).await,
            Err(DatabaseError::ConstraintViolation(_))
        ));
        assert!(matches!(
            store.create_profile(create(Uuid::new_v4())).await,
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }

    #[tokio::test]
    async fn subscriptions_are_directed() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        let edge = Subscription {
            subscriber_id: alice.id,
            author_id: bob.id,
        };
        assert_eq!(store.create_subscription(edge).await.unwrap(), alice);
        assert!(store.create_subscription(edge).await.is_err());

        assert_eq!(
            store
                .find_many_users(UserFilter::SubscribersOf(bob.id))
                .await
                .unwrap(),
            vec![alice.clone()]
        );
        assert_eq!(
            store
                .find_many_users(UserFilter::SubscriptionsOf(alice.id))
                .await
                .unwrap(),
            vec![bob.clone()]
        );
        assert!(
            store
                .find_many_users(UserFilter::SubscribersOf(alice.id))
                .await
                .unwrap()
                .is_empty()
        );

        store.delete_subscription(edge).await.unwrap();
        assert!(matches!(
            store.delete_subscription(edge).await,
            Err(DatabaseError::RecordNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_user_cascades() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        store
            .create_post(CreatePost {
                title: "t".into(),
                content: "c".into(),
                author_id: alice.id,
            })
            .await
            .unwrap();
        store
            .create_subscription(Subscription {
                subscriber_id: bob.id,
                author_id: alice.id,
            })
            .await
            .unwrap();

        store.delete_user(alice.id).await.unwrap();

        assert!(store.find_many_posts(PostFilter::All).await.unwrap().is_empty());
        assert!(
            store
                .find_many_users(UserFilter::SubscriptionsOf(bob.id))
                .await
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            store.delete_user(alice.id).await,
            Err(DatabaseError::RecordNotFound { .. })
        ));
    }
}
