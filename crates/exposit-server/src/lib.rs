//! exposit server library entry.
//!
//! Wires configuration, logging, the shared metric registry, and the HTTP
//! exposition endpoint. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
