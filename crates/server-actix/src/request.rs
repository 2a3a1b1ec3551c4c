// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use actix_web::HttpRequest;
use serde_json::Value;

use common::http::{RequestHead, RequestPayload};

pub struct ActixRequestHead {
    // HttpRequest holds an Rc (so isn't Send), hence the copies
    method: actix_web::http::Method,
    path: String,
}

impl ActixRequestHead {
    pub fn from_request(req: &HttpRequest) -> ActixRequestHead {
        ActixRequestHead {
            method: req.method().clone(),
            path: req.path().to_string(),
        }
    }
}

impl RequestHead for ActixRequestHead {
    fn get_method(&self) -> http::Method {
        // Actix uses http-0.2, the rest of the system uses http-1.x
        match self.method {
            actix_web::http::Method::CONNECT => http::Method::CONNECT,
            actix_web::http::Method::GET => http::Method::GET,
            actix_web::http::Method::HEAD => http::Method::HEAD,
            actix_web::http::Method::OPTIONS => http::Method::OPTIONS,
            actix_web::http::Method::POST => http::Method::POST,
            actix_web::http::Method::PUT => http::Method::PUT,
            actix_web::http::Method::DELETE => http::Method::DELETE,
            actix_web::http::Method::PATCH => http::Method::PATCH,
            actix_web::http::Method::TRACE => http::Method::TRACE,
            ref method => http::Method::from_bytes(method.as_str().as_bytes()).unwrap_or_else(
                |_| {
                    tracing::warn!("Unsupported method: {}", method);
                    http::Method::OPTIONS
                },
            ),
        }
    }

    fn get_path(&self) -> String {
        self.path.clone()
    }
}

pub struct ActixRequestPayload {
    head: ActixRequestHead,
    body: Value,
}

impl ActixRequestPayload {
    /// A body that isn't JSON is passed on as `null` (which the router rejects).
    pub fn new(req: &HttpRequest, body: &[u8]) -> Self {
        Self {
            head: ActixRequestHead::from_request(req),
            body: serde_json::from_slice(body).unwrap_or(Value::Null),
        }
    }
}

impl RequestPayload for ActixRequestPayload {
    fn get_head(&self) -> &(dyn RequestHead + Send + Sync) {
        &self.head
    }

    fn take_body(&mut self) -> Value {
        self.body.take()
    }
}
