// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use core_resolver::validation::field::ValidatedField;
use serde::de::DeserializeOwned;

use crate::resolver_error::ResolverError;

/// The argument's value; `None` if absent or `null`.
pub(crate) fn optional_argument<T: DeserializeOwned>(
    field: &ValidatedField,
    name: &'static str,
) -> Result<Option<T>, ResolverError> {
    field
        .argument_as(name)
        .map_err(|error| ResolverError::InvalidArgument(name, error))
}

pub(crate) fn required_argument<T: DeserializeOwned>(
    field: &ValidatedField,
    name: &'static str,
) -> Result<T, ResolverError> {
    optional_argument(field, name)?.ok_or(ResolverError::MissingArgument(name))
}
