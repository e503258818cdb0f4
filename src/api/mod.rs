//! HTTP API — the dashboard's service surface.
//!
//! Every endpoint is one stateless parse-and-classify cycle; the only
//! cross-request state is the read-once formulary and the explicit
//! selection sessions.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;
