//! # sensorsync-domain
//!
//! Pure domain model for the sensorsync ingestion service.
//!
//! ## Responsibilities
//! - Foundational types: sensor identifiers, error conventions, timestamps
//! - Define **sensor documents** (the stored record for one sensor)
//! - Define **batches** (the validated shape of an ingestion request)
//! - Own the **merge policy**: how an incoming reading is folded into an
//!   existing document, and how a new document is created
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod sensor;
pub mod time;

pub mod batch;
pub mod document;
