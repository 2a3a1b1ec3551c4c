// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use blog_resolver::{BlogSystemResolver, create_system_resolver};
use blog_sql::{CreatePost, CreateUser, DataStore, Post, User, testing::MemoryStore};
use common::operation_payload::OperationsPayload;
use serde_json::Value;

pub const QUERY_DEPTH_LIMIT: usize = 5;

pub struct TestSystem {
    pub store: Arc<MemoryStore>,
    pub resolver: BlogSystemResolver,
}

impl TestSystem {
    pub fn new() -> Self {
        Self::with_mutations(true)
    }

    pub fn with_mutations(mutations_enabled: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let resolver =
            create_system_resolver(store.clone(), mutations_enabled, QUERY_DEPTH_LIMIT).unwrap();

        Self { store, resolver }
    }

    pub async fn execute(&self, query: &str, variables: Value) -> Value {
        let payload = OperationsPayload::new(query).with_variables(variables);

        match self.resolver.resolve_operations(payload).await {
            Ok(result) => result.to_json().unwrap(),
            Err(error) => error.into_execution_result().to_json().unwrap(),
        }
    }

    pub async fn create_user(&self, name: &str, balance: f64) -> User {
        self.store
            .create_user(CreateUser {
                name: name.to_string(),
                balance,
            })
            .await
            .unwrap()
    }

    pub async fn create_post(&self, author: &User, title: &str) -> Post {
        self.store
            .create_post(CreatePost {
                title: title.to_string(),
                content: format!("{title} content"),
                author_id: author.id,
            })
            .await
            .unwrap()
    }
}

/// The messages of the response's errors
pub fn error_messages(response: &Value) -> Vec<String> {
    response["errors"]
        .as_array()
        .map(|errors| {
            errors
                .iter()
                .map(|error| error["message"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}
