//! Process observability: structured logging setup.

pub mod logging;
