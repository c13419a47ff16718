//! HTTP API for the weddit catalog.
//!
//! Axum handlers over `weddit-db` repositories and `weddit-core` domain
//! logic. Routes live under `/api/v1` except the root-level health check.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;
