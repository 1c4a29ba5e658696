//! Persisted key-value stores.
//!
//! # Responsibility
//! - Define the preference store contract used by the theme service.
//! - Provide in-memory and SQLite implementations.
//!
//! # Invariants
//! - The core only ever persists the theme flag through this contract.

pub mod preference_repo;
