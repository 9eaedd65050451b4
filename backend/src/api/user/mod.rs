//! User listing API.

pub mod handlers;
pub mod routes;
