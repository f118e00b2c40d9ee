//! Core domain types and logic.

pub mod record;
pub mod table;
pub mod filter;
pub mod summary;
pub mod error;
