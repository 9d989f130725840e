//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ProductsCommand, ProductsQuery, UsersCommand, UsersQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub products: Arc<dyn ProductsCommand>,
    pub products_query: Arc<dyn ProductsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub products: Arc<dyn ProductsCommand>,
    pub products_query: Arc<dyn ProductsQuery>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use storefront::domain::{ProductsService, UsersService};
    /// use storefront::inbound::http::state::{HttpState, HttpStatePorts};
    /// use storefront::outbound::memory::{InMemoryProductRepository, InMemoryUserRepository};
    ///
    /// let users = Arc::new(UsersService::new(Arc::new(InMemoryUserRepository::new())));
    /// let products = Arc::new(ProductsService::new(Arc::new(InMemoryProductRepository::new())));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users: users.clone(),
    ///     users_query: users,
    ///     products: products.clone(),
    ///     products_query: products,
    /// });
    /// let _users = state.users_query.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            users_query,
            products,
            products_query,
        } = ports;
        Self {
            users,
            users_query,
            products,
            products_query,
        }
    }
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}
