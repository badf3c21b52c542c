//! Shared error plumbing and logging setup used across all nimbridge crates.

pub mod error;
pub mod logging;

pub use crate::error::{Error, FromMessage, Result};
