// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use blog_sql::DatabaseError;
use core_resolver::plugin::SubsystemResolutionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Invalid field {0} for {1}")]
    InvalidField(String, &'static str),

    #[error("Missing argument '{0}'")]
    MissingArgument(&'static str),

    #[error("Invalid argument '{0}': {1}")]
    InvalidArgument(&'static str, #[source] serde_json::Error),

    #[error("Subscription operations are not supported")]
    SubscriptionNotSupported,

    #[error("{0}")]
    Database(#[from] DatabaseError),
}

impl ResolverError {
    /// Message suitable for returning to a client. Data layer internals are hidden.
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            ResolverError::Database(error) => error.user_error_message(),
            _ => Some(self.to_string()),
        }
    }
}

impl From<ResolverError> for SubsystemResolutionError {
    fn from(error: ResolverError) -> Self {
        match error {
            ResolverError::InvalidField(field_name, container_type) => {
                SubsystemResolutionError::InvalidField(field_name, container_type)
            }
            error => match error.user_error_message() {
                Some(message) => SubsystemResolutionError::UserDisplayError(message),
                None => SubsystemResolutionError::Delegate(Box::new(error)),
            },
        }
    }
}
