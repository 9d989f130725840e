//! Spawns a storefront server on an ephemeral port for HTTP-level tests.
//!
//! The server runs the same middleware and routes as the binary, backed by
//! fresh in-memory repositories, so every call starts from an empty store.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use storefront::Trace;
use storefront::domain::{ProductsService, UsersService};
use storefront::inbound::http::api_scope;
use storefront::inbound::http::health::{HealthState, live, ready};
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::outbound::memory::{InMemoryProductRepository, InMemoryUserRepository};

fn in_memory_state() -> HttpState {
    let users = Arc::new(UsersService::new(Arc::new(InMemoryUserRepository::new())));
    let products = Arc::new(ProductsService::new(Arc::new(
        InMemoryProductRepository::new(),
    )));
    HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_query: users,
        products: products.clone(),
        products_query: products,
    })
}

/// Start a server and return its base URL and a stop handle.
///
/// Must be called from within an Actix or `LocalSet` context.
pub(crate) fn spawn_storefront() -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;

    let http_data = web::Data::new(in_memory_state());
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(http_data.clone())
            .app_data(health.clone())
            .wrap(Trace)
            .service(api_scope())
            .service(ready)
            .service(live)
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .map_err(|err| err.to_string())?
    .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}
