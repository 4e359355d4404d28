//! LeadQual API: library crate for the lead scoring REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and the end-to-end test
//! crate can build the router around their own scorer.

pub mod config;
pub mod csv_io;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
