// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use http::StatusCode;
use tracing::{debug, error, instrument, warn};

use blog_env::Environment;
use blog_resolver::BlogSystemResolver;
use blog_sql::DataStore;
use common::env_const::get_graphql_http_path;
use common::http::{Headers, RequestHead, RequestPayload, ResponseBody, ResponsePayload};
use common::operation_payload::OperationsPayload;
use common::router::Router;
use core_resolver::ExecutionResult;

use crate::system_loader::{SystemLoader, SystemLoadingError};

pub struct GraphQLRouter {
    system_resolver: BlogSystemResolver,
    http_path: String,
}

impl GraphQLRouter {
    pub fn new(system_resolver: BlogSystemResolver, env: &dyn Environment) -> Self {
        Self {
            system_resolver,
            http_path: get_graphql_http_path(env),
        }
    }

    pub fn from_store(
        store: Arc<dyn DataStore>,
        env: &dyn Environment,
    ) -> Result<Self, SystemLoadingError> {
        let system_resolver = SystemLoader::create_system_resolver(store, env)?;

        Ok(Self::new(system_resolver, env))
    }

    fn suitable(&self, request_head: &(dyn RequestHead + Send + Sync)) -> bool {
        request_head.get_path() == self.http_path
            && request_head.get_method() == http::Method::POST
    }
}

#[async_trait]
impl Router for GraphQLRouter {
    /// Resolves an incoming GraphQL request.
    ///
    /// A body that isn't a valid `{ query, variables, operationName }` envelope gets a 400 with no
    /// body. Anything else gets a 200 with a JSON `{ data, errors }` body, including parse and
    /// validation failures.
    #[instrument(name = "GraphQLRouter::route", skip_all)]
    async fn route(&self, request: &mut (dyn RequestPayload + Send)) -> Option<ResponsePayload> {
        if !self.suitable(request.get_head()) {
            return None;
        }

        let operations_payload = match OperationsPayload::from_json(request.take_body()) {
            Ok(operations_payload) => operations_payload,
            Err(err) => {
                warn!(%err, "Invalid request body");
                return Some(empty_response(StatusCode::BAD_REQUEST));
            }
        };

        let result = match self
            .system_resolver
            .resolve_operations(operations_payload)
            .await
        {
            Ok(result) => result,
            Err(err) => {
                debug!(%err, "Operation rejected");
                err.into_execution_result()
            }
        };

        Some(json_response(&result))
    }
}

fn json_response(result: &ExecutionResult) -> ResponsePayload {
    match serde_json::to_vec(result) {
        Ok(bytes) => {
            let mut headers = Headers::new();
            headers.insert("content-type".into(), "application/json".into());

            ResponsePayload {
                body: ResponseBody::Bytes(bytes),
                headers,
                status_code: StatusCode::OK,
            }
        }
        Err(err) => {
            error!(%err, "Failed to serialize response");
            empty_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn empty_response(status_code: StatusCode) -> ResponsePayload {
    ResponsePayload {
        body: ResponseBody::None,
        headers: Headers::new(),
        status_code,
    }
}
