//! Domain model for the page state core.
//!
//! # Responsibility
//! - Define the records components read and mutate.
//! - Keep presentation intents (`Effect`) as plain serializable data.
//!
//! # Invariants
//! - Every element the core touches is addressed by an `ElementRef`.
//! - Reveal and animation flags are latches: they never go back to `false`.

pub mod effect;
pub mod element;
pub mod form;
pub mod layout;
pub mod nav;
pub mod notification;
pub mod theme;
