//! OpenRouteService client - the routing collaborator.
//!
//! Handles geocoding and driving directions; produces the `Route` shape the
//! core consumes. Provider failures are propagated to the caller with
//! context, never retried or masked here.

pub mod client;
pub mod polyline;

pub use client::OrsClient;
