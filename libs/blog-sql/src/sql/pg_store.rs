// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use tokio_postgres::{Row, types::ToSql};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    CreatePost, CreateProfile, CreateUser, DataStore, DatabaseError, DatabasePool, MemberType,
    MemberTypeId, Post, PostFilter, Profile, ProfileFilter, ProfileKey, Subscription, UpdatePost,
    UpdateProfile, UpdateUser, User, UserFilter,
};

const SCHEMA_SQL: &str = include_str!("schema.sql");

const USER_COLUMNS: &str = r#"u."id", u."name", u."balance""#;
const PROFILE_COLUMNS: &str = r#""id", "isMale", "yearOfBirth", "userId", "memberTypeId""#;
const POST_COLUMNS: &str = r#""id", "title", "content", "authorId""#;
const MEMBER_TYPE_COLUMNS: &str = r#""id", "discount", "postsLimitPerMonth""#;

/// [DataStore] backed by PostgreSQL.
pub struct PgStore {
    pool: DatabasePool,
}

impl PgStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Creates any missing tables and seeds the member types.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let client = self.pool.get_client().await?;
        client.batch_execute(SCHEMA_SQL).await?;
        Ok(())
    }

    async fn query(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, DatabaseError> {
        debug!(statement, "Executing");
        let client = self.pool.get_client().await?;
        Ok(client.query(statement, params).await?)
    }

    async fn query_opt(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, DatabaseError> {
        debug!(statement, "Executing");
        let client = self.pool.get_client().await?;
        Ok(client.query_opt(statement, params).await?)
    }

    async fn query_existing(
        &self,
        entity: &'static str,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Row, DatabaseError> {
        self.query_opt(statement, params)
            .await?
            .ok_or(DatabaseError::not_found(entity))
    }
}

fn user_from_row(row: &Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        balance: row.try_get("balance")?,
    })
}

fn member_type_id_from_row(row: &Row, column: &str) -> Result<MemberTypeId, DatabaseError> {
    let value: String = row.try_get(column)?;
    value.parse().map_err(DatabaseError::InvalidValue)
}

fn profile_from_row(row: &Row) -> Result<Profile, DatabaseError> {
    Ok(Profile {
        id: row.try_get("id")?,
        is_male: row.try_get("isMale")?,
        year_of_birth: row.try_get("yearOfBirth")?,
        user_id: row.try_get("userId")?,
        member_type_id: member_type_id_from_row(row, "memberTypeId")?,
    })
}

fn post_from_row(row: &Row) -> Result<Post, DatabaseError> {
    Ok(Post {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        author_id: row.try_get("authorId")?,
    })
}

fn member_type_from_row(row: &Row) -> Result<MemberType, DatabaseError> {
    Ok(MemberType {
        id: member_type_id_from_row(row, "id")?,
        discount: row.try_get("discount")?,
        posts_limit_per_month: row.try_get("postsLimitPerMonth")?,
    })
}

fn collect<T>(
    rows: Vec<Row>,
    from_row: fn(&Row) -> Result<T, DatabaseError>,
) -> Result<Vec<T>, DatabaseError> {
    rows.iter().map(from_row).collect()
}

#[async_trait]
impl DataStore for PgStore {
    #[instrument(skip(self))]
    async fn find_unique_user(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let statement = format!(r#"SELECT {USER_COLUMNS} FROM "User" u WHERE u."id" = $1"#);
        self.query_opt(&statement, &[&id])
            .await?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_many_users(&self, filter: UserFilter) -> Result<Vec<User>, DatabaseError> {
        let rows = match filter {
            UserFilter::All => {
                let statement = format!(r#"SELECT {USER_COLUMNS} FROM "User" u"#);
                self.query(&statement, &[]).await?
            }
            UserFilter::SubscribersOf(author_id) => {
                let statement = format!(
                    r#"SELECT {USER_COLUMNS} FROM "User" u WHERE EXISTS (SELECT 1 FROM "SubscribersOnAuthors" s WHERE s."subscriberId" = u."id" AND s."authorId" = $1)"#
                );
                self.query(&statement, &[&author_id]).await?
            }
            UserFilter::SubscriptionsOf(subscriber_id) => {
                let statement = format!(
                    r#"SELECT {USER_COLUMNS} FROM "User" u WHERE EXISTS (SELECT 1 FROM "SubscribersOnAuthors" s WHERE s."authorId" = u."id" AND s."subscriberId" = $1)"#
                );
                self.query(&statement, &[&subscriber_id]).await?
            }
        };
        collect(rows, user_from_row)
    }

    #[instrument(skip(self))]
    async fn create_user(&self, data: CreateUser) -> Result<User, DatabaseError> {
        let statement = format!(
            r#"INSERT INTO "User" AS u ("id", "name", "balance") VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"#
        );
        let row = self
            .query_existing(
                "user",
                &statement,
                &[&Uuid::new_v4(), &data.name, &data.balance],
            )
            .await?;
        user_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn update_user(&self, id: Uuid, data: UpdateUser) -> Result<User, DatabaseError> {
        let statement = format!(
            r#"UPDATE "User" AS u SET "name" = COALESCE($2, u."name"), "balance" = COALESCE($3, u."balance") WHERE u."id" = $1 RETURNING {USER_COLUMNS}"#
        );
        let row = self
            .query_existing("user", &statement, &[&id, &data.name, &data.balance])
            .await?;
        user_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, id: Uuid) -> Result<User, DatabaseError> {
        let statement =
            format!(r#"DELETE FROM "User" AS u WHERE u."id" = $1 RETURNING {USER_COLUMNS}"#);
        let row = self.query_existing("user", &statement, &[&id]).await?;
        user_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn create_subscription(&self, edge: Subscription) -> Result<User, DatabaseError> {
        let statement = format!(
            r#"WITH edge AS (INSERT INTO "SubscribersOnAuthors" ("subscriberId", "authorId") VALUES ($1, $2) RETURNING "subscriberId") SELECT {USER_COLUMNS} FROM "User" u JOIN edge ON u."id" = edge."subscriberId""#
        );
        let row = self
            .query_existing(
                "user",
                &statement,
                &[&edge.subscriber_id, &edge.author_id],
            )
            .await?;
        user_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn delete_subscription(&self, edge: Subscription) -> Result<Subscription, DatabaseError> {
        let statement = r#"DELETE FROM "SubscribersOnAuthors" WHERE "subscriberId" = $1 AND "authorId" = $2 RETURNING "subscriberId", "authorId""#;
        let row = self
            .query_existing(
                "subscription",
                statement,
                &[&edge.subscriber_id, &edge.author_id],
            )
            .await?;
        Ok(Subscription {
            subscriber_id: row.try_get("subscriberId")?,
            author_id: row.try_get("authorId")?,
        })
    }

    #[instrument(skip(self))]
    async fn find_unique_profile(&self, key: ProfileKey) -> Result<Option<Profile>, DatabaseError> {
        let (column, value) = match key {
            ProfileKey::Id(id) => ("id", id),
            ProfileKey::UserId(user_id) => ("userId", user_id),
        };
        let statement = format!(r#"SELECT {PROFILE_COLUMNS} FROM "Profile" WHERE "{column}" = $1"#);
        self.query_opt(&statement, &[&value])
            .await?
            .as_ref()
            .map(profile_from_row)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_many_profiles(
        &self,
        filter: ProfileFilter,
    ) -> Result<Vec<Profile>, DatabaseError> {
        let rows = match filter {
            ProfileFilter::All => {
                let statement = format!(r#"SELECT {PROFILE_COLUMNS} FROM "Profile""#);
                self.query(&statement, &[]).await?
            }
            ProfileFilter::MemberType(member_type_id) => {
                let statement = format!(
                    r#"SELECT {PROFILE_COLUMNS} FROM "Profile" WHERE "memberTypeId" = $1"#
                );
                self.query(&statement, &[&member_type_id.as_str()]).await?
            }
        };
        collect(rows, profile_from_row)
    }

    #[instrument(skip(self))]
    async fn create_profile(&self, data: CreateProfile) -> Result<Profile, DatabaseError> {
        let statement = format!(
            r#"INSERT INTO "Profile" ({PROFILE_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {PROFILE_COLUMNS}"#
        );
        let row = self
            .query_existing(
                "profile",
                &statement,
                &[
                    &Uuid::new_v4(),
                    &data.is_male,
                    &data.year_of_birth,
                    &data.user_id,
                    &data.member_type_id.as_str(),
                ],
            )
            .await?;
        profile_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn update_profile(
        &self,
        id: Uuid,
        data: UpdateProfile,
    ) -> Result<Profile, DatabaseError> {
        let statement = format!(
            r#"UPDATE "Profile" SET "isMale" = COALESCE($2, "isMale"), "yearOfBirth" = COALESCE($3, "yearOfBirth"), "memberTypeId" = COALESCE($4, "memberTypeId") WHERE "id" = $1 RETURNING {PROFILE_COLUMNS}"#
        );
        let member_type_id = data.member_type_id.map(|id| id.as_str());
        let row = self
            .query_existing(
                "profile",
                &statement,
                &[&id, &data.is_male, &data.year_of_birth, &member_type_id],
            )
            .await?;
        profile_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn delete_profile(&self, id: Uuid) -> Result<Profile, DatabaseError> {
        let statement =
            format!(r#"DELETE FROM "Profile" WHERE "id" = $1 RETURNING {PROFILE_COLUMNS}"#);
        let row = self.query_existing("profile", &statement, &[&id]).await?;
        profile_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn find_unique_post(&self, id: Uuid) -> Result<Option<Post>, DatabaseError> {
        let statement = format!(r#"SELECT {POST_COLUMNS} FROM "Post" WHERE "id" = $1"#);
        self.query_opt(&statement, &[&id])
            .await?
            .as_ref()
            .map(post_from_row)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_many_posts(&self, filter: PostFilter) -> Result<Vec<Post>, DatabaseError> {
        let rows = match filter {
            PostFilter::All => {
                let statement = format!(r#"SELECT {POST_COLUMNS} FROM "Post""#);
                self.query(&statement, &[]).await?
            }
            PostFilter::Author(author_id) => {
                let statement =
                    format!(r#"SELECT {POST_COLUMNS} FROM "Post" WHERE "authorId" = $1"#);
                self.query(&statement, &[&author_id]).await?
            }
        };
        collect(rows, post_from_row)
    }

    #[instrument(skip(self))]
    async fn create_post(&self, data: CreatePost) -> Result<Post, DatabaseError> {
        let statement = format!(
            r#"INSERT INTO "Post" ({POST_COLUMNS}) VALUES ($1, $2, $3, $4) RETURNING {POST_COLUMNS}"#
        );
        let row = self
            .query_existing(
                "post",
                &statement,
                &[&Uuid::new_v4(), &data.title, &data.content, &data.author_id],
            )
            .await?;
        post_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn update_post(&self, id: Uuid, data: UpdatePost) -> Result<Post, DatabaseError> {
        let statement = format!(
            r#"UPDATE "Post" SET "title" = COALESCE($2, "title"), "content" = COALESCE($3, "content"), "authorId" = COALESCE($4, "authorId") WHERE "id" = $1 RETURNING {POST_COLUMNS}"#
        );
        let row = self
            .query_existing(
                "post",
                &statement,
                &[&id, &data.title, &data.content, &data.author_id],
            )
            .await?;
        post_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: Uuid) -> Result<Post, DatabaseError> {
        let statement = format!(r#"DELETE FROM "Post" WHERE "id" = $1 RETURNING {POST_COLUMNS}"#);
        let row = self.query_existing("post", &statement, &[&id]).await?;
        post_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn find_unique_member_type(
        &self,
        id: MemberTypeId,
    ) -> Result<Option<MemberType>, DatabaseError> {
        let statement =
            format!(r#"SELECT {MEMBER_TYPE_COLUMNS} FROM "MemberType" WHERE "id" = $1"#);
        self.query_opt(&statement, &[&id.as_str()])
            .await?
            .as_ref()
            .map(member_type_from_row)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_many_member_types(&self) -> Result<Vec<MemberType>, DatabaseError> {
        let statement = format!(r#"SELECT {MEMBER_TYPE_COLUMNS} FROM "MemberType""#);
        let rows = self.query(&statement, &[]).await?;
        collect(rows, member_type_from_row)
    }
}
