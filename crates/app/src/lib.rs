//! # sensorsync-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `DocumentStore` — point reads and guarded writes against a
//!     partitioned document container
//! - Define **driving/inbound ports** as use-case structs:
//!   - `IngestService` — apply a validated batch of readings to the store
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `sensorsync-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
