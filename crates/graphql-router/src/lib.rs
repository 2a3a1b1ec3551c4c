// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Framework-neutral handling of GraphQL requests.
//!
//! [GraphQLRouter] accepts a request (through the [common::http::RequestPayload] abstraction),
//! decodes the `{ query, variables, operationName }` envelope, resolves it and returns a JSON
//! response. Web frameworks (see `server-actix`) only need to adapt their request and response
//! types.
mod graphql_router;
mod system_loader;

pub use graphql_router::GraphQLRouter;
pub use system_loader::{SystemLoader, SystemLoadingError};
