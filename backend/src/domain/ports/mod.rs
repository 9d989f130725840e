//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters. Driving ports (`*Query`, `*Command`) are consumed by the HTTP
//! adapter and implemented by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod product_repository;
mod products_command;
mod products_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductPersistenceError, ProductRepository};
#[cfg(test)]
pub use products_command::MockProductsCommand;
pub use products_command::ProductsCommand;
#[cfg(test)]
pub use products_query::MockProductsQuery;
pub use products_query::ProductsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
