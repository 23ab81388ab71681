//! Shared client core for the lead bio generator.
//!
//! One library carries the whole reproducible contract — query building, the
//! service client, CSV serialization, and the per-flow state machine — so any
//! front end (the `leadgen` CLI here) is a thin view over it.

pub mod client;
pub mod config;
pub mod csv;
pub mod errors;
pub mod flow;
pub mod models;
