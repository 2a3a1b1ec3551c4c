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

use blog_sql::{CreateProfile, DataStore, MemberTypeId, PostFilter};

mod test_system;

use test_system::{TestSystem, error_messages};

#[tokio::test]
async fn create_user_then_query() {
    let system = TestSystem::new();

    let created = system
        .execute(
            r#"mutation { createUser(dto: { name: "Alice", balance: 10.25 }) { id name balance } }"#,
            Value::Null,
        )
        .await;
    let created = &created["data"]["createUser"];
    let id = created["id"].as_str().unwrap();
    assert!(Uuid::parse_str(id).is_ok());
    assert_eq!(created["name"], json!("Alice"));
    assert_eq!(created["balance"], json!(10.25));

    let queried = system
        .execute(
            "query ($id: UUID!) { user(id: $id) { id name balance } }",
            json!({ "id": id }),
        )
        .await;
    assert_eq!(
        queried,
        json!({ "data": { "user": { "id": id, "name": "Alice", "balance": 10.25 } } })
    );
}

#[tokio::test]
async fn create_user_from_variables() {
    let system = TestSystem::new();

    let response = system
        .execute(
            "mutation ($dto: CreateUserInput!) { createUser(dto: $dto) { name balance } }",
            json!({ "dto": { "name": "Bob", "balance": 3 } }),
        )
        .await;

    assert_eq!(
        response,
        json!({ "data": { "createUser": { "name": "Bob", "balance": 3.0 } } })
    );
}

#[tokio::test]
async fn partial_update() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let post = system.create_post(&alice, "Draft").await;

    let response = system
        .execute(
            r#"mutation ($id: UUID!) { changePost(id: $id, dto: { title: "x" }) { title content authorId } }"#,
            json!({ "id": post.id.to_string() }),
        )
        .await;

    assert_eq!(
        response,
        json!({
            "data": {
                "changePost": {
                    "title": "x",
                    "content": "Draft content",
                    "authorId": alice.id.to_string()
                }
            }
        })
    );
}

#[tokio::test]
async fn null_leaves_field_untouched() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;

    let response = system
        .execute(
            "mutation ($id: UUID!) { changeUser(id: $id, dto: { name: null, balance: 2.5 }) { name balance } }",
            json!({ "id": alice.id.to_string() }),
        )
        .await;

    assert_eq!(
        response,
        json!({ "data": { "changeUser": { "name": "Alice", "balance": 2.5 } } })
    );
}

#[tokio::test]
async fn change_profile_member_type() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let profile = system
        .store
        .create_profile(CreateProfile {
            is_male: false,
            year_of_birth: 1990,
            user_id: alice.id,
            member_type_id: MemberTypeId::Basic,
        })
        .await
        .unwrap();

    let response = system
        .execute(
            "mutation ($id: UUID!) { changeProfile(id: $id, dto: { memberTypeId: business }) { yearOfBirth memberType { id } } }",
            json!({ "id": profile.id.to_string() }),
        )
        .await;

    assert_eq!(
        response,
        json!({
            "data": {
                "changeProfile": { "yearOfBirth": 1990, "memberType": { "id": "business" } }
            }
        })
    );
}

#[tokio::test]
async fn update_unknown_id() {
    let system = TestSystem::new();

    let response = system
        .execute(
            r#"mutation ($id: UUID!) { changeUser(id: $id, dto: { name: "x" }) { id } }"#,
            json!({ "id": Uuid::new_v4().to_string() }),
        )
        .await;

    assert_eq!(response["data"], json!({ "changeUser": null }));
    assert_eq!(response["errors"][0]["path"], json!(["changeUser"]));
    insta::assert_snapshot!(error_messages(&response).join("\n"), @"No user found");
}

#[tokio::test]
async fn duplicate_profile() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let query = "mutation ($userId: UUID!) { createProfile(dto: { isMale: true, yearOfBirth: 1985, userId: $userId, memberTypeId: basic }) { memberTypeId } }";
    let variables = json!({ "userId": alice.id.to_string() });

    let response = system.execute(query, variables.clone()).await;
    assert_eq!(
        response,
        json!({ "data": { "createProfile": { "memberTypeId": "basic" } } })
    );

    let response = system.execute(query, variables).await;
    assert_eq!(response["data"], json!({ "createProfile": null }));
    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Constraint violation: Unique constraint failed on the fields: (userId)"
    );
}

#[tokio::test]
async fn subscribe_and_unsubscribe() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let bob = system.create_user("Bob", 1.0).await;
    let variables = json!({ "userId": bob.id.to_string(), "authorId": alice.id.to_string() });

    let response = system
        .execute(
            "mutation ($userId: UUID!, $authorId: UUID!) { subscribeTo(userId: $userId, authorId: $authorId) { name userSubscribedTo { name } } }",
            variables.clone(),
        )
        .await;
    assert_eq!(
        response,
        json!({
            "data": {
                "subscribeTo": { "name": "Bob", "userSubscribedTo": [{ "name": "Alice" }] }
            }
        })
    );

    let unsubscribe = "mutation ($userId: UUID!, $authorId: UUID!) { unsubscribeFrom(userId: $userId, authorId: $authorId) }";

    let response = system.execute(unsubscribe, variables.clone()).await;
    assert_eq!(response, json!({ "data": { "unsubscribeFrom": null } }));

    // The edge is gone now
    let response = system.execute(unsubscribe, variables).await;
    assert_eq!(response["data"], json!({ "unsubscribeFrom": null }));
    assert_eq!(response["errors"][0]["path"], json!(["unsubscribeFrom"]));
    insta::assert_snapshot!(error_messages(&response).join("\n"), @"No subscription found");
}

#[tokio::test]
async fn duplicate_subscription() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let bob = system.create_user("Bob", 1.0).await;
    let subscribe = "mutation ($userId: UUID!, $authorId: UUID!) { subscribeTo(userId: $userId, authorId: $authorId) { name } }";
    let variables = json!({ "userId": bob.id.to_string(), "authorId": alice.id.to_string() });

    system.execute(subscribe, variables.clone()).await;
    let response = system.execute(subscribe, variables).await;

    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Constraint violation: Unique constraint failed on the fields: (subscriberId, authorId)"
    );
}

#[tokio::test]
async fn deletes_resolve_to_null() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let post = system.create_post(&alice, "Draft").await;

    let response = system
        .execute(
            "mutation ($postId: UUID, $userId: UUID) { deletePost(id: $postId) deleteUser(id: $userId) }",
            json!({ "postId": post.id.to_string(), "userId": alice.id.to_string() }),
        )
        .await;

    assert_eq!(
        response,
        json!({ "data": { "deletePost": null, "deleteUser": null } })
    );
    assert!(
        system
            .store
            .find_many_posts(PostFilter::All)
            .await
            .unwrap()
            .is_empty()
    );

    let response = system
        .execute(
            "mutation ($id: UUID) { deleteUser(id: $id) }",
            json!({ "id": alice.id.to_string() }),
        )
        .await;
    insta::assert_snapshot!(error_messages(&response).join("\n"), @"No user found");
}

#[tokio::test]
async fn mutations_run_in_document_order() {
    let system = TestSystem::new();

    system
        .execute(
            r#"mutation {
                first: createUser(dto: { name: "First", balance: 1 }) { id }
                second: createUser(dto: { name: "Second", balance: 2 }) { id }
            }"#,
            Value::Null,
        )
        .await;

    let response = system.execute("{ users { name } }", Value::Null).await;
    assert_eq!(
        response["data"]["users"],
        json!([{ "name": "First" }, { "name": "Second" }])
    );
}

#[tokio::test]
async fn mutations_disabled() {
    let system = TestSystem::with_mutations(false);

    let response = system
        .execute(
            r#"mutation { createUser(dto: { name: "Alice", balance: 1 }) { id } }"#,
            Value::Null,
        )
        .await;

    insta::assert_snapshot!(
        error_messages(&response).join("\n"),
        @"Schema is not configured to execute mutation operation"
    );
    assert_eq!(system.store.call_count(), 0);
}

#[tokio::test]
async fn delete_profile() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let profile = system
        .store
        .create_profile(CreateProfile {
            is_male: false,
            year_of_birth: 1990,
            user_id: alice.id,
            member_type_id: MemberTypeId::Basic,
        })
        .await
        .unwrap();
    let variables = json!({ "id": profile.id.to_string() });

    let response = system
        .execute("mutation ($id: UUID) { deleteProfile(id: $id) }", variables.clone())
        .await;
    assert_eq!(response, json!({ "data": { "deleteProfile": null } }));

    let response = system
        .execute(
            "query ($id: UUID) { profile(id: $id) { id } profiles { id } }",
            variables.clone(),
        )
        .await;
    assert_eq!(
        response,
        json!({ "data": { "profile": null, "profiles": [] } })
    );

    let response = system
        .execute("mutation ($id: UUID) { deleteProfile(id: $id) }", variables)
        .await;
    assert_eq!(response["data"], json!({ "deleteProfile": null }));
    assert_eq!(response["errors"][0]["path"], json!(["deleteProfile"]));
    insta::assert_snapshot!(error_messages(&response).join("\n"), @"No profile found");
}

#[tokio::test]
async fn delete_user_cascades() {
    let system = TestSystem::new();
    let alice = system.create_user("Alice", 1.0).await;
    let bob = system.create_user("Bob", 1.0).await;
    system.create_post(&alice, "Draft").await;
    system
        .store
        .create_profile(CreateProfile {
            is_male: true,
            year_of_birth: 1980,
            user_id: alice.id,
            member_type_id: MemberTypeId::Business,
        })
        .await
        .unwrap();
    system
        .execute(
            "mutation ($userId: UUID!, $authorId: UUID!) { subscribeTo(userId: $userId, authorId: $authorId) { name } }",
            json!({ "userId": bob.id.to_string(), "authorId": alice.id.to_string() }),
        )
        .await;

    let response = system
        .execute(
            "mutation ($id: UUID) { deleteUser(id: $id) }",
            json!({ "id": alice.id.to_string() }),
        )
        .await;
    assert_eq!(response, json!({ "data": { "deleteUser": null } }));

    let response = system
        .execute(
            "{ users { name userSubscribedTo { name } } posts { id } profiles { id } }",
            Value::Null,
        )
        .await;
    assert_eq!(
        response,
        json!({
            "data": {
                "users": [{ "name": "Bob", "userSubscribedTo": [] }],
                "posts": [],
                "profiles": []
            }
        })
    );
}
