//! Shared foundation for the yotei scheduling engine: configuration,
//! core error type, and pure date arithmetic.

pub mod config;
pub mod constants;
pub mod error;
pub mod util;
