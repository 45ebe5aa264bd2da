//! # sensorsync-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve `POST /update-sensors`, the batch ingestion endpoint
//! - Serve `GET /health` for liveness probes
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into plain-text HTTP responses
//!
//! ## Dependency rule
//! Depends on `sensorsync-app` (for port traits and services) and
//! `sensorsync-domain` (for batch decoding and error types). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
