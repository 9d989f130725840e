//! Outbound adapters implementing the domain's repository ports.
//!
//! - `persistence`: PostgreSQL via Diesel, used when a database URL is set.
//! - `memory`: process-local stores for development and tests.

pub mod memory;
pub mod persistence;
