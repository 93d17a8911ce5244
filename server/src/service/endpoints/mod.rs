//! Route tables and handlers, grouped by domain.

pub mod admin;
pub mod auth;
pub mod scores;
