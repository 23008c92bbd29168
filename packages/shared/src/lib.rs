//! Shared utilities for the Chatty server and its tooling.

pub mod logger;
pub mod time;
