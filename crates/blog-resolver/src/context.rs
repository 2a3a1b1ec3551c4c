// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use blog_sql::DataStore;

/// State available to every resolver invocation of one request.
#[derive(Clone)]
pub struct RequestContext {
    pub store: Arc<dyn DataStore>,
}

impl RequestContext {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }
}
