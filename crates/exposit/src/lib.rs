//! Top-level facade crate for exposit.
//!
//! Re-exports the metrics core and the exposition server so users can depend on a single crate.

pub mod core {
    pub use exposit_core::*;
}

pub mod server {
    pub use exposit_server::*;
}
