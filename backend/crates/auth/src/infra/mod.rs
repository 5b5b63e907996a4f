//! Infrastructure Layer
//!
//! PostgreSQL implementation of the user repository.

pub mod postgres;

pub use postgres::PgAuthRepository;
