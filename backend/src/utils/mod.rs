//! Shared helpers that do not belong to a single domain module.

pub mod jwt;
