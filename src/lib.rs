//! Playground - a catalog of small utility tools with per-user saved state.
//!
//! Tools are listed, shown with the caller's saved data, updated and executed
//! over HTTP behind session authentication.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
