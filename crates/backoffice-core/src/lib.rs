//! Service plumbing shared by the back-office binaries: configuration,
//! error rendering, tracing, request ids and query-building helpers.

pub mod config;
pub mod context;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
