//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Session validation (JWT, mock)
//! - `http` - axum routes and middleware
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - sqlx-backed repositories
//! - `view` - Page rendering for the front-end shell

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod view;
