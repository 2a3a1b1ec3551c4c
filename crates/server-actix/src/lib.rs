// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod request;

use actix_web::{
    HttpRequest, HttpResponse,
    web::{self, ServiceConfig},
};

use common::http::{ResponseBody, ResponsePayload};
use common::router::Router;
use graphql_router::GraphQLRouter;
use request::ActixRequestPayload;

macro_rules! error_msg {
    ($msg:literal) => {
        concat!("{\"errors\": [{\"message\":\"", $msg, "\"}]}").as_bytes()
    };
}

/// Route every request to the GraphQL router. Requests it doesn't accept get a 404.
pub fn configure_router(router: web::Data<GraphQLRouter>) -> impl FnOnce(&mut ServiceConfig) {
    move |app| {
        app.app_data(router).default_service(web::to(resolve));
    }
}

async fn resolve(
    http_request: HttpRequest,
    body: web::Bytes,
    router: web::Data<GraphQLRouter>,
) -> HttpResponse {
    let mut request = ActixRequestPayload::new(&http_request, &body);

    match router.route(&mut request).await {
        Some(ResponsePayload {
            body,
            headers,
            status_code,
        }) => {
            let Ok(actix_status_code) =
                actix_web::http::StatusCode::from_u16(status_code.as_u16())
            else {
                tracing::error!("Invalid status code: {}", status_code);
                return HttpResponse::InternalServerError().body(error_msg!("Invalid status code"));
            };

            let mut builder = HttpResponse::build(actix_status_code);

            for header in headers.into_iter() {
                builder.append_header(header);
            }

            match body {
                ResponseBody::Bytes(bytes) => builder.body(bytes),
                ResponseBody::None => builder.finish(),
            }
        }
        None => HttpResponse::NotFound().finish(),
    }
}
