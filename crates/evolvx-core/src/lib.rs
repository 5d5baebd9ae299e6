//! Domain core of the Evolvx fitness client.
//!
//! Holds the session model and its persistence seam, typed API records, and
//! the pure computations screens run over API data (streaks, search,
//! progress scoring). Nothing in this crate performs I/O.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod progress;
pub mod session;
pub mod workout;

// Re-export common error type
pub use error::{EvolvxError, Result};
