//! hashcmp command line library
//!
//! Everything the `hashcmp` binary does outside of hashing itself: input
//! discovery, tampered copies, layered configuration, progress rendering and
//! result formatting.

pub mod config;
pub mod file_discovery;
pub mod output;
pub mod progress;
pub mod tamper;
pub mod terminal;
