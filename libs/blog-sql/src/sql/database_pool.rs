// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::str::FromStr;

use blog_env::Environment;
use common::env_const::{
    BLOG_CONNECTION_POOL_SIZE, BLOG_POSTGRES_PASSWORD, BLOG_POSTGRES_URL, BLOG_POSTGRES_USER,
    DEFAULT_CONNECTION_POOL_SIZE,
};
use deadpool_postgres::{Client, Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::{Config, NoTls};

use crate::database_error::{DatabaseError, WithContext};

pub struct DatabasePool {
    pool: Pool,
}

impl DatabasePool {
    pub fn from_env(env: &dyn Environment) -> Result<Self, DatabaseError> {
        let url = env.get(BLOG_POSTGRES_URL).ok_or(DatabaseError::Config(format!(
            "Env {BLOG_POSTGRES_URL} must be provided"
        )))?;

        let user = env.get(BLOG_POSTGRES_USER);
        let password = env.get(BLOG_POSTGRES_PASSWORD);
        let pool_size = env
            .get_usize(BLOG_CONNECTION_POOL_SIZE, DEFAULT_CONNECTION_POOL_SIZE)
            .map_err(|e| DatabaseError::Config(e.to_string()))?;

        Self::from_db_url(&url, pool_size, user, password)
    }

    pub fn from_db_url(
        url: &str,
        pool_size: usize,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DatabaseError> {
        let config = Config::from_str(url).map_err(|e| {
            DatabaseError::Delegate(e)
                .with_context("Failed to parse PostgreSQL connection string".into())
        })?;

        Self::from_config(pool_size, config, user, password)
    }

    pub fn from_config(
        pool_size: usize,
        mut config: Config,
        user: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DatabaseError> {
        if let Some(user) = &user {
            config.user(user);
        }
        if let Some(password) = &password {
            config.password(password);
        }

        let manager_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };

        let manager = Manager::from_config(config, NoTls, manager_config);

        let pool = Pool::builder(manager)
            .max_size(pool_size)
            .build()
            .map_err(|e| DatabaseError::Config(format!("Failed to create DB pool: {e}")))?;

        Ok(Self { pool })
    }

    pub async fn get_client(&self) -> Result<Client, DatabaseError> {
        self.pool
            .get()
            .await
            .map_err(DatabaseError::Pool)
            .with_context("Failed to get a database connection".into())
    }
}
