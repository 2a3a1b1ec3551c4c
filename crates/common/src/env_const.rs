// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use blog_env::{EnvError, Environment};

pub const BLOG_POSTGRES_URL: &str = "BLOG_POSTGRES_URL";
pub const BLOG_POSTGRES_USER: &str = "BLOG_POSTGRES_USER";
pub const BLOG_POSTGRES_PASSWORD: &str = "BLOG_POSTGRES_PASSWORD";
pub const BLOG_CONNECTION_POOL_SIZE: &str = "BLOG_CONNECTION_POOL_SIZE";

pub const BLOG_SERVER_HOST: &str = "BLOG_SERVER_HOST";
pub const BLOG_SERVER_PORT: &str = "BLOG_SERVER_PORT";

pub const BLOG_GRAPHQL_HTTP_PATH: &str = "BLOG_GRAPHQL_HTTP_PATH";
pub const BLOG_MAX_SELECTION_DEPTH: &str = "BLOG_MAX_SELECTION_DEPTH";
pub const BLOG_ENABLE_MUTATIONS: &str = "BLOG_ENABLE_MUTATIONS";

pub const DEFAULT_SERVER_PORT: u16 = 9876;
pub const DEFAULT_CONNECTION_POOL_SIZE: usize = 10;
pub const DEFAULT_QUERY_DEPTH: usize = 5;

pub fn get_graphql_http_path(env: &dyn Environment) -> String {
    env.get_or_else(BLOG_GRAPHQL_HTTP_PATH, "/graphql")
}

/// Maximum nesting of selection sets accepted for an incoming operation.
pub fn get_query_depth_limit(env: &dyn Environment) -> Result<usize, EnvError> {
    env.get_usize(BLOG_MAX_SELECTION_DEPTH, DEFAULT_QUERY_DEPTH)
}

pub fn mutations_enabled(env: &dyn Environment) -> Result<bool, EnvError> {
    env.enabled(BLOG_ENABLE_MUTATIONS, true)
}

pub fn get_server_port(env: &dyn Environment) -> Result<u16, EnvError> {
    match env.get(BLOG_SERVER_PORT) {
        Some(port) => port.trim().parse::<u16>().map_err(|_| EnvError::InvalidNumber {
            key: BLOG_SERVER_PORT.to_string(),
            value: port,
        }),
        None => Ok(DEFAULT_SERVER_PORT),
    }
}

#[cfg(test)]
mod tests {
    use blog_env::MapEnvironment;

    use super::*;

    #[test]
    fn defaults() {
        let env = MapEnvironment::new();

        assert_eq!(get_graphql_http_path(&env), "/graphql");
        assert_eq!(get_query_depth_limit(&env).unwrap(), 5);
        assert!(mutations_enabled(&env).unwrap());
        assert_eq!(get_server_port(&env).unwrap(), 9876);
    }

    #[test]
    fn overrides() {
        let env = MapEnvironment::from([
            (BLOG_GRAPHQL_HTTP_PATH, "/api"),
            (BLOG_MAX_SELECTION_DEPTH, "8"),
            (BLOG_ENABLE_MUTATIONS, "false"),
            (BLOG_SERVER_PORT, "3000"),
        ]);

        assert_eq!(get_graphql_http_path(&env), "/api");
        assert_eq!(get_query_depth_limit(&env).unwrap(), 8);
        assert!(!mutations_enabled(&env).unwrap());
        assert_eq!(get_server_port(&env).unwrap(), 3000);
    }

    #[test]
    fn invalid_values() {
        let env = MapEnvironment::from([
            (BLOG_MAX_SELECTION_DEPTH, "deep"),
            (BLOG_SERVER_PORT, "70000"),
        ]);

        assert!(get_query_depth_limit(&env).is_err());
        assert!(get_server_port(&env).is_err());
    }
}
