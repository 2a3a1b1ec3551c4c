// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;
use tokio_postgres::error::SqlState;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No {entity} found")]
    RecordNotFound { entity: &'static str },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Unexpected column value: {0}")]
    InvalidValue(String),

    #[error("Delegate: {0}")]
    Delegate(#[source] tokio_postgres::Error),

    #[error("Pool: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("{0} {1}")]
    WithContext(String, #[source] Box<DatabaseError>),
}

impl DatabaseError {
    pub fn with_context(self, context: String) -> DatabaseError {
        DatabaseError::WithContext(context, Box::new(self))
    }

    pub fn not_found(entity: &'static str) -> DatabaseError {
        DatabaseError::RecordNotFound { entity }
    }

    /// Message suitable for returning to a client. Connection and driver failures are hidden.
    pub fn user_error_message(&self) -> Option<String> {
        match self {
            DatabaseError::RecordNotFound { .. } | DatabaseError::ConstraintViolation(_) => {
                Some(self.to_string())
            }
            DatabaseError::WithContext(_, inner) => inner.user_error_message(),
            _ => None,
        }
    }
}

impl From<tokio_postgres::Error> for DatabaseError {
    fn from(error: tokio_postgres::Error) -> Self {
        let constraint_violation = error.as_db_error().and_then(|db_error| {
            let code = db_error.code();
            if code == &SqlState::UNIQUE_VIOLATION
                || code == &SqlState::FOREIGN_KEY_VIOLATION
                || code == &SqlState::NOT_NULL_VIOLATION
            {
                Some(db_error.message().to_string())
            } else {
                None
            }
        });

        match constraint_violation {
            Some(message) => DatabaseError::ConstraintViolation(message),
            None => DatabaseError::Delegate(error),
        }
    }
}

pub trait WithContext {
    fn with_context(self, context: String) -> Self;
}

impl<T> WithContext for Result<T, DatabaseError> {
    fn with_context(self, context: String) -> Result<T, DatabaseError> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_visible_messages() {
        assert_eq!(
            DatabaseError::not_found("post").user_error_message(),
            Some("No post found".to_string())
        );
        assert_eq!(
            DatabaseError::ConstraintViolation("duplicate key".into())
                .with_context("While creating profile".into())
                .user_error_message(),
            Some("Constraint violation: duplicate key".to_string())
        );
        assert_eq!(
            DatabaseError::Config("bad url".into()).user_error_message(),
            None
        );
    }
}
