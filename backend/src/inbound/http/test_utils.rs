//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::{ProductsService, UsersService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryProductRepository, InMemoryUserRepository};

/// Build handler state backed by empty in-memory stores.
pub fn in_memory_state() -> web::Data<HttpState> {
    let users = Arc::new(UsersService::new(Arc::new(InMemoryUserRepository::new())));
    let products = Arc::new(ProductsService::new(Arc::new(
        InMemoryProductRepository::new(),
    )));
    web::Data::new(HttpState::new(HttpStatePorts {
        users: users.clone(),
        users_query: users,
        products: products.clone(),
        products_query: products,
    }))
}
