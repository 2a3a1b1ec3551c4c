// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub mod plugin;
pub mod schema;
pub mod system_resolver;
pub mod type_normalization;
pub mod validation;

mod field_resolver;
mod operation_resolver;
mod query_response;

pub use field_resolver::{FieldResolver, FieldValue};
pub use query_response::{ErrorLocation, ExecutionResult, FieldError, PathSegment};
