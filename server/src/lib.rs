//! Employee CRUD service: axum handlers over a sea-orm repository.

pub mod config;
pub mod employee;
pub mod http;
pub mod seed;
