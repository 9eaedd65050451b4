//! Authentication module for user registration, login and access control.
//!
//! This module provides the public interface for authentication-related
//! functionality: payload validation, registration, token issuance, and the
//! bearer-token middleware guarding protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
pub mod validators;
