// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::{Value, json};
use uuid::Uuid;

use blog_sql::{CreateProfile, DataStore, MemberTypeId, Subscription};

mod test_system;

use test_system::{TestSystem, error_messages};

#[tokio::test]
async fn seeded_member_types() {
    let system = TestSystem::new();

    let response = system
        .execute(
            "{ memberTypes { id discount postsLimitPerMonth __typename } }",
            Value::Null,
        )
        .await;

    assert_eq!(
        response,
        json!({
            "data": {
                "memberTypes": [
                    { "id": "basic", "discount": 2.3, "postsLimitPerMonth": 20, "__typename": "MemberType" },
                    { "id": "business", "discount": 7.7, "postsLimitPerMonth": 100, "__typename": "MemberType" }
                ]
            }
        })
    );
}

#[tokio::test]
async fn member_type_by_variable() {
    let system = TestSystem::new();

    let response = system
        .execute(
            "query MemberType($id: MemberTypeId) { memberType(id: $id) { id postsLimitPerMonth } }",
            json!({ "id": "business" }),
        )
        .await;

    assert_eq!(
        response,
        json!({ "data": { "memberType": { "id": "business", "postsLimitPerMonth": 100 } } })
    );
}

#[tokio::test]
async fn invalid_member_type() {
    let system = TestSystem::new();

    let response = system
        .execute("{ memberType(id: premium) { id } }", Value::Null)
        .await;
    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Value 'premium' does not exist in 'MemberTypeId' enum"
    );
    assert!(response.get("data").is_none());

    let response = system
        .execute(
            "query ($id: MemberTypeId) { memberType(id: $id) { id } }",
            json!({ "id": "BASIC" }),
        )
        .await;
    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Value 'BASIC' does not exist in 'MemberTypeId' enum"
    );

    assert_eq!(system.store.call_count(), 0);
}

#[tokio::test]
async fn invalid_uuid() {
    let system = TestSystem::new();

    let response = system
        .execute(r#"{ user(id: "not-a-uuid") { id } }"#, Value::Null)
        .await;

    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Argument 'id' is not a valid 'UUID': Value is not a valid UUID: not-a-uuid"
    );
    assert_eq!(system.store.call_count(), 0);
}

#[tokio::test]
async fn point_lookups() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 12.5).await;
    system.store.reset_call_count();

    let response = system
        .execute(
            "query ($id: UUID, $missing: UUID) { user(id: $id) { id name balance } missing: user(id: $missing) { id } }",
            json!({ "id": alice.id.to_string(), "missing": Uuid::new_v4().to_string() }),
        )
        .await;

    assert_eq!(
        response,
        json!({
            "data": {
                "user": { "id": alice.id.to_string(), "name": "Alice", "balance": 12.5 },
                "missing": null
            }
        })
    );
    assert_eq!(system.store.call_count(), 2);
}

#[tokio::test]
async fn point_lookup_without_id() {
    let system = TestSystem::new();

    let response = system
        .execute("{ user { id } post(id: null) { id } profile { id } }", Value::Null)
        .await;

    assert_eq!(
        response,
        json!({ "data": { "user": null, "post": null, "profile": null } })
    );
    assert_eq!(system.store.call_count(), 0);
}

#[tokio::test]
async fn relations() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let bob = system.create_user("Bob", 2.0).await;
    system.create_post(&alice, "Hello").await;
    system
        .store
        .create_profile(CreateProfile {
            is_male: false,
            year_of_birth: 1990,
            user_id: alice.id,
            member_type_id: MemberTypeId::Business,
        })
        .await
        .unwrap();
    system
        .store
        .create_subscription(Subscription {
            subscriber_id: bob.id,
            author_id: alice.id,
        })
        .await
        .unwrap();

    let response = system
        .execute(
            r#"{
                users {
                    name
                    profile { yearOfBirth memberTypeId memberType { discount } user { name } }
                    posts { title author { name } }
                    subscribedToUser { name }
                    userSubscribedTo { name }
                }
                memberTypes { id profiles { isMale } }
            }"#,
            Value::Null,
        )
        .await;

    assert_eq!(
        response,
        json!({
            "data": {
                "users": [
                    {
                        "name": "Alice",
                        "profile": {
                            "yearOfBirth": 1990,
                            "memberTypeId": "business",
                            "memberType": { "discount": 7.7 },
                            "user": { "name": "Alice" }
                        },
                        "posts": [{ "title": "Hello", "author": { "name": "Alice" } }],
                        "subscribedToUser": [{ "name": "Bob" }],
                        "userSubscribedTo": []
                    },
                    {
                        "name": "Bob",
                        "profile": null,
                        "posts": [],
                        "subscribedToUser": [],
                        "userSubscribedTo": [{ "name": "Alice" }]
                    }
                ],
                "memberTypes": [
                    { "id": "basic", "profiles": [] },
                    { "id": "business", "profiles": [{ "isMale": false }] }
                ]
            }
        })
    );
}

#[tokio::test]
async fn nested_lists_issue_one_call_per_parent() {
    const USERS: usize = 3;
    const POSTS_PER_USER: usize = 2;

    let system = TestSystem::new();
    for index in 0..USERS {
        let user = system.create_user(&format!("user-{index}"), 0.0).await;
        for post_index in 0..POSTS_PER_USER {
            system
                .create_post(&user, &format!("post-{index}-{post_index}"))
                .await;
        }
    }
    system.store.reset_call_count();

    let response = system
        .execute("{ users { posts { author { name } } } }", Value::Null)
        .await;

    let users = response["data"]["users"].as_array().unwrap();
    assert_eq!(users.len(), USERS);
    assert!(users.iter().all(|user| {
        user["posts"].as_array().map(Vec::len) == Some(POSTS_PER_USER)
    }));

    // One call for the users, one per user for their posts, and one per post for its author
    assert_eq!(
        system.store.call_count(),
        1 + USERS + USERS * POSTS_PER_USER
    );
}

#[tokio::test]
async fn depth_limit() {
    let system = TestSystem::new();
    system.create_user("Alice", 1.0).await;
    system.store.reset_call_count();

    // `author` at depth 6
    let response = system
        .execute(
            "{ users { posts { author { posts { author { posts { author { id } } } } } } } }",
            Value::Null,
        )
        .await;
    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"'' exceeds maximum operation depth of 5"
    );
    assert!(response.get("data").is_none());
    assert_eq!(system.store.call_count(), 0);

    // a leaf at depth 6 is too deep as well
    let response = system
        .execute(
            "query Deep { users { posts { author { posts { author { posts { id } } } } } } }",
            Value::Null,
        )
        .await;
    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"'Deep' exceeds maximum operation depth of 5"
    );
    assert!(response.get("data").is_none());
    assert_eq!(system.store.call_count(), 0);

    let response = system
        .execute(
            "{ users { posts { author { posts { author { __typename } } } } } }",
            Value::Null,
        )
        .await;
    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"'' exceeds maximum operation depth of 5"
    );
    assert_eq!(system.store.call_count(), 0);

    // leaves at depth 5 are accepted
    let response = system
        .execute(
            "{ users { posts { author { posts { author { id __typename } } } } } }",
            Value::Null,
        )
        .await;
    assert!(response.get("errors").is_none());
    assert_eq!(response["data"]["users"][0]["posts"], json!([]));
}

#[tokio::test]
async fn unknown_field() {
    let system = TestSystem::new();

    let response = system.execute("{ users { email } }", Value::Null).await;

    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Field 'email' is not valid for type 'User'"
    );
}

#[tokio::test]
async fn syntax_error() {
    let system = TestSystem::new();

    let response = system.execute("{ users { id ", Value::Null).await;
    let messages = error_messages(&response);

    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Syntax error:"));
    assert!(response.get("data").is_none());
}
