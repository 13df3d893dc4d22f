//! Utilities shared by the Hiroba binaries.

pub mod logger;
pub mod time;
