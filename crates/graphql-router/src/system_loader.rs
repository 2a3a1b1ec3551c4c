// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use blog_env::{EnvError, Environment};
use blog_resolver::{BlogSystemResolver, create_system_resolver};
use blog_sql::DataStore;
use common::env_const::{get_query_depth_limit, mutations_enabled};
use core_resolver::schema::SchemaError;

#[derive(Error, Debug)]
pub enum SystemLoadingError {
    #[error("{0}")]
    Config(#[from] EnvError),

    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

pub struct SystemLoader;

impl SystemLoader {
    /// Build the system resolver over `store`, reading the depth limit and whether mutations are
    /// exposed from the environment.
    pub fn create_system_resolver(
        store: Arc<dyn DataStore>,
        env: &dyn Environment,
    ) -> Result<BlogSystemResolver, SystemLoadingError> {
        let query_depth_limit = get_query_depth_limit(env)?;
        let mutations_enabled = mutations_enabled(env)?;

        info!(query_depth_limit, mutations_enabled, "Creating system resolver");

        Ok(create_system_resolver(
            store,
            mutations_enabled,
            query_depth_limit,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use blog_env::MapEnvironment;
    use blog_sql::testing::MemoryStore;
    use common::env_const::{BLOG_ENABLE_MUTATIONS, BLOG_MAX_SELECTION_DEPTH};

    use common::operation_payload::OperationsPayload;
    use serde_json::json;

    use super::*;

    // The leaf `id` is at depth 7
    const DEPTH_7_QUERY: &str =
        "{ users { posts { author { posts { author { posts { author { id } } } } } } } }";

    async fn depth_errors(env: &MapEnvironment) -> Vec<String> {
        let store = Arc::new(MemoryStore::new());
        let resolver = SystemLoader::create_system_resolver(store, env).unwrap();

        match resolver
            .resolve_operations(OperationsPayload::new(DEPTH_7_QUERY))
            .await
        {
            Ok(result) => {
                assert_eq!(result.to_json().unwrap(), json!({ "data": { "users": [] } }));
                vec![]
            }
            Err(err) => err
                .user_errors()
                .into_iter()
                .map(|error| error.message)
                .collect(),
        }
    }

    #[tokio::test]
    async fn reads_depth_limit() {
        let env = MapEnvironment::from([(BLOG_MAX_SELECTION_DEPTH, "7")]);
        assert!(depth_errors(&env).await.is_empty());

        let env = MapEnvironment::from([(BLOG_MAX_SELECTION_DEPTH, "6")]);
        assert_eq!(
            depth_errors(&env).await,
            vec!["'' exceeds maximum operation depth of 6".to_string()]
        );

        assert_eq!(
            depth_errors(&MapEnvironment::new()).await,
            vec!["'' exceeds maximum operation depth of 5".to_string()]
        );
    }

    #[tokio::test]
    async fn reads_mutations_flag() {
        let env = MapEnvironment::from([(BLOG_ENABLE_MUTATIONS, "false")]);
        let store = Arc::new(MemoryStore::new());
        let resolver = SystemLoader::create_system_resolver(store, &env).unwrap();

        assert!(!resolver.schema.has_mutations());
    }

    #[test]
    fn invalid_configuration() {
        let store = Arc::new(MemoryStore::new());

        let env = MapEnvironment::from([(BLOG_MAX_SELECTION_DEPTH, "-1")]);
        let error = SystemLoader::create_system_resolver(store.clone(), &env).err();
        assert!(matches!(error, Some(SystemLoadingError::Config(_))));

        let env = MapEnvironment::from([(BLOG_ENABLE_MUTATIONS, "sometimes")]);
        let error = SystemLoader::create_system_resolver(store, &env).err();
        assert!(matches!(error, Some(SystemLoadingError::Config(_))));
    }
}
