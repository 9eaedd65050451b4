//! Central module for the application's non-authentication API endpoints.
//!
//! Holds the shared response/error plumbing, the OpenAPI document, and the
//! user listing routes. Registration and login live in `crate::auth`.

pub mod common;
pub mod docs;
pub mod user;
