//! Data access layer. Each repository wraps the queries for one table.

pub mod user_repository;
