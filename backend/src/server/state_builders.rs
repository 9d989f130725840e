//! Builders wiring repositories into the HTTP handler state.

use std::sync::Arc;

use actix_web::web;

use storefront::domain::ports::{ProductRepository, UserRepository};
use storefront::domain::{ProductsService, UsersService};
use storefront::inbound::http::state::{HttpState, HttpStatePorts};
use storefront::outbound::memory::{InMemoryProductRepository, InMemoryUserRepository};
use storefront::outbound::persistence::{DieselProductRepository, DieselUserRepository};

use super::ServerConfig;

/// Build the services over the given repositories and bundle them as state.
fn state_from_repositories<U, P>(users: Arc<U>, products: Arc<P>) -> HttpState
where
    U: UserRepository + 'static,
    P: ProductRepository + 'static,
{
    let users = Arc::new(UsersService::new(users));
    let products = Arc::new(ProductsService::new(products));
    HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_query: users,
        products: products.clone(),
        products_query: products,
    })
}

/// Use the Diesel repositories when a pool is configured, otherwise the
/// in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselProductRepository::new(pool.clone())),
        ),
        None => state_from_repositories(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryProductRepository::new()),
        ),
    };
    web::Data::new(state)
}
