// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Framework-neutral view of HTTP requests and responses, so that routers can be exercised
//! without a running web server.

use http::StatusCode;
use serde_json::Value;

pub trait RequestPayload {
    fn get_head(&self) -> &(dyn RequestHead + Send + Sync);
    fn take_body(&mut self) -> Value;
}

#[derive(Debug, Clone, Default)]
pub struct Headers {
    inner: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self { inner: vec![] }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner
            .iter()
            .find(|(k, _)| k == &key.to_lowercase())
            .map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.inner.push((key.to_lowercase(), value));
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

pub struct ResponsePayload {
    pub body: ResponseBody,
    pub headers: Headers,
    pub status_code: StatusCode,
}

pub enum ResponseBody {
    Bytes(Vec<u8>),
    None,
}

impl ResponseBody {
    /// Parse the body as JSON (mostly useful in tests).
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            ResponseBody::Bytes(bytes) => serde_json::from_slice(bytes),
            ResponseBody::None => Ok(Value::Null),
        }
    }
}

/// Represents a HTTP request from which information can be extracted
pub trait RequestHead {
    fn get_path(&self) -> String;

    fn get_method(&self) -> http::Method;
}
