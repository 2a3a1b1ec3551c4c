// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a membership tier. The set of tiers is fixed and seeded with the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberTypeId {
    Basic,
    Business,
}

impl MemberTypeId {
    pub const ALL: [MemberTypeId; 2] = [MemberTypeId::Basic, MemberTypeId::Business];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "basic",
            MemberTypeId::Business => "business",
        }
    }
}

impl Display for MemberTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(MemberTypeId::Basic),
            "business" => Ok(MemberTypeId::Business),
            _ => Err(format!("Unknown member type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberType {
    pub id: MemberTypeId,
    pub discount: f64,
    pub posts_limit_per_month: i32,
}

/// The rows seeded into an empty database.
pub fn default_member_types() -> Vec<MemberType> {
    vec![
        MemberType {
            id: MemberTypeId::Basic,
            discount: 2.3,
            posts_limit_per_month: 20,
        },
        MemberType {
            id: MemberTypeId::Business,
            discount: 7.7,
            posts_limit_per_month: 100,
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// A directed "subscriber follows author" edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub subscriber_id: Uuid,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub name: String,
    pub balance: f64,
}

/// Partial update: `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfile {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<Uuid>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UserFilter {
    All,
    /// Users that follow the given author.
    SubscribersOf(Uuid),
    /// Users the given subscriber follows.
    SubscriptionsOf(Uuid),
}

/// Unique keys of a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileKey {
    Id(Uuid),
    UserId(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileFilter {
    All,
    MemberType(MemberTypeId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostFilter {
    All,
    Author(Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_type_id_text_form() {
        for id in MemberTypeId::ALL {
            assert_eq!(id.to_string().parse::<MemberTypeId>(), Ok(id));
        }
        assert!("premium".parse::<MemberTypeId>().is_err());
        assert!("BASIC".parse::<MemberTypeId>().is_err());
    }

    #[test]
    fn partial_update_from_json() {
        let update: UpdateProfile =
            serde_json::from_value(serde_json::json!({"yearOfBirth": 1990})).unwrap();

        assert_eq!(
            update,
            UpdateProfile {
                year_of_birth: Some(1990),
                ..Default::default()
            }
        );
    }
}
