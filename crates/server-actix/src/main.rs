// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use actix_web::{App, HttpServer, middleware, web};
use thiserror::Error;
use tracing_actix_web::TracingLogger;

use std::net::SocketAddr;
use std::time;
use std::{io::ErrorKind, sync::Arc};

use blog_env::{EnvError, Environment, SystemEnvironment};
use blog_sql::{DatabaseError, DatabasePool, PgStore};
use common::env_const::{BLOG_SERVER_HOST, get_graphql_http_path, get_server_port};
use common::logging_tracing;
use graphql_router::{GraphQLRouter, SystemLoadingError};
use server_actix::configure_router;

#[derive(Error)]
enum ServerError {
    #[error("Port {0} is already in use. Check if there is another process running at that port.")]
    PortInUse(u16),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    EnvError(#[from] EnvError),
    #[error("{0}")]
    Database(#[from] DatabaseError),
    #[error("{0}")]
    SystemLoading(#[from] SystemLoadingError),
}

// Delegate to `Display`, so that `main` returning an error prints the message rather than the
// derived `Debug` output
impl std::fmt::Debug for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    let start_time = time::Instant::now();

    logging_tracing::init();

    let env = SystemEnvironment;

    let store = PgStore::new(DatabasePool::from_env(&env)?);
    store.migrate().await?;

    let router = web::Data::new(GraphQLRouter::from_store(Arc::new(store), &env)?);

    let server_port = get_server_port(&env)?;
    let server_host = env.get_or_else(BLOG_SERVER_HOST, "localhost");

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::new(
                middleware::TrailingSlash::Trim,
            ))
            .configure(configure_router(router.clone()))
    });

    match server.bind((server_host.as_str(), server_port)) {
        Ok(server) => {
            let pretty_addr = pretty_addr(&server.addrs());

            println!(
                "Started server on {} in {:.2} ms",
                pretty_addr,
                start_time.elapsed().as_micros() as f64 / 1000.0
            );
            println!("- GraphQL endpoint hosted at:");
            println!("\thttp://{pretty_addr}{}", get_graphql_http_path(&env));

            Ok(server.run().await?)
        }
        Err(e) => Err(if e.kind() == ErrorKind::AddrInUse {
            ServerError::PortInUse(server_port)
        } else {
            ServerError::Io(e)
        }),
    }
}

fn pretty_addr(addrs: &[SocketAddr]) -> String {
    let loopback_addr = addrs.iter().find(|addr| addr.ip().is_loopback());

    match loopback_addr {
        Some(addr) => format!("localhost:{}", addr.port()),
        None => match addrs {
            // Print single address without square brackets
            [addr] => format!("{addr}"),
            _ => format!("{addrs:?}"),
        },
    }
}
