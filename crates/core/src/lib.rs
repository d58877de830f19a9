//! Domain layer for the library borrowing service.
//!
//! Holds the types, error enum and business rules shared by the database and
//! HTTP crates. Nothing in here performs I/O.

pub mod book;
pub mod borrowing;
pub mod error;
pub mod roles;
pub mod search;
pub mod types;
