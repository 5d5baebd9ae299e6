//! HTTP access to the Evolvx backend.
//!
//! [`ApiClient`] is the single shared client; [`RequestDecorator`]s run on
//! every request it builds, and [`BearerTokenDecorator`] attaches the stored
//! bearer token.

pub mod client;
pub mod decorator;
pub mod endpoints;

pub use client::{ApiClient, decode_response, empty_unless_unauthorized};
pub use decorator::{BearerTokenDecorator, RequestDecorator, Undecorated};
