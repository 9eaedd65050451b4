//! Module for core business logic services.
//!
//! Services sit between the HTTP handlers and the repositories and own the
//! rules that span both, such as password hashing and username uniqueness.

pub mod user_service;
