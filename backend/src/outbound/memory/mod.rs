//! In-process repository adapters.
//!
//! Used when no database URL is configured and throughout the test suites.
//! Each store keeps rows in a `BTreeMap` keyed by id behind a mutex, so
//! listing order matches insertion order and uniqueness checks happen under
//! the same lock as the write.

mod product_repository;
mod user_repository;

pub use product_repository::InMemoryProductRepository;
pub use user_repository::InMemoryUserRepository;
