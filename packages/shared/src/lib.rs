//! Shared utilities for Hiroba server and client.

pub mod logger;
pub mod time;
