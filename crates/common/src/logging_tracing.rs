// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! # Tracing configuration setup.
//!
//! The server code is instrumented with Rust's `tracing` framework.
//!
//! Calling the `init` function will initialize a global tracing subscriber based on the values of
//! the `BLOG_LOG` environment variable which follows the same conventions as `RUST_LOG`. This will
//! provide console logging. Without `BLOG_LOG`, only warnings and errors are printed.

use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

const BLOG_LOG: &str = "BLOG_LOG";

/// Initialize the tracing subscriber.
///
/// Creates a compact `tracing_subscriber::fmt` layer filtered by `BLOG_LOG`. Calling it more than
/// once (for example from multiple tests) leaves the first subscriber in place.
pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer().compact();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(BLOG_LOG)
        .from_env_lossy();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
