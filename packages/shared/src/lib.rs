//! Shared utilities for the Hanare server and client.

pub mod logger;
pub mod time;
